//! IPA text pipeline: normalization, validation, segmentation and
//! capability checking.
//!
//! Every stage here is synchronous and pure. The only shared state is the
//! read-only code-point tables in [`charset`] and the [`PhoneInventory`],
//! both of which can be read from any number of threads.

pub mod charset;
pub mod normalize;
pub mod phoneset;
pub mod segment;
pub mod validate;

pub use normalize::{to_composed, to_decomposed, NormalForm, NormalizedString};
pub use phoneset::{
    check_capabilities, CapabilityItem, CapabilityReport, InventoryError, PhoneInventory,
    SymbolKind,
};
pub use segment::{reconstruct, segment, Segment};
pub use validate::{validate, IssueKind, ValidationIssue, ValidationResult};
