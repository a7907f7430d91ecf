use std::path::PathBuf;

use clap::Parser;
use ipa_phonotype::{
    engines::silence::SilenceEngine,
    ipa::{segment, validate, PhoneInventory},
    Synthesizer,
};

#[derive(Debug, Parser)]
#[command(name = "ipa_check")]
#[command(about = "Validate, segment and synthesize IPA transcriptions")]
struct Args {
    /// IPA strings to check
    #[arg(default_value = "ˈkæt")]
    inputs: Vec<String>,

    /// Write the synthesized WAV to this path
    #[arg(long)]
    out: Option<PathBuf>,

    /// Phone inventory JSON file (built-in set if omitted or missing)
    #[arg(long)]
    inventory: Option<PathBuf>,

    /// Print each validation result as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let inventory = PhoneInventory::load_or_default(args.inventory.as_deref())?;
    let mut synth = Synthesizer::with_inventory(SilenceEngine::new(), inventory);

    for input in &args.inputs {
        println!("input:   {input}");

        let validation = validate(input);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&validation)?);
        }
        if validation.is_ok() {
            let segments: Vec<String> = segment(&validation.cleaned)
                .iter()
                .map(|s| format!("[{s}]"))
                .collect();
            println!("display: {}", validation.display_text());
            println!("segments: {}", segments.join(""));
        }

        match synth.synthesize(input) {
            Ok(out) => {
                println!("audio:   {} bytes", out.audio.len());
                for note in out.notes.unwrap_or_default() {
                    println!("note:    {note}");
                }
                if let Some(path) = &args.out {
                    std::fs::write(path, &out.audio)?;
                    println!("Saved to {}", path.display());
                }
            }
            Err(err) => {
                println!("error:   {err}");
                for issue in err.issues().unwrap_or_default() {
                    println!("  {issue}");
                }
            }
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_without_value_is_rejected() {
        assert!(Args::try_parse_from(["ipa_check", "--out"]).is_err());
        assert!(Args::try_parse_from(["ipa_check", "kæt", "--inventory"]).is_err());
    }

    #[test]
    fn flags_and_inputs_mix() {
        let args =
            Args::try_parse_from(["ipa_check", "ʔa", "--out", "a.wav", "ˈkæt", "--json"]).unwrap();
        assert_eq!(args.inputs, ["ʔa", "ˈkæt"]);
        assert_eq!(args.out, Some(PathBuf::from("a.wav")));
        assert!(args.inventory.is_none());
        assert!(args.json);
    }

    #[test]
    fn default_input_when_none_given() {
        let args = Args::try_parse_from(["ipa_check"]).unwrap();
        assert_eq!(args.inputs, ["ˈkæt"]);
    }
}
