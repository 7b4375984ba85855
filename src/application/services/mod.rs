pub mod manifest_applier;
pub mod manifest_validator;

pub use manifest_applier::{ApplyReport, ManifestApplier, OperationOutcome};
pub use manifest_validator::{
    ManifestValidationError, ManifestValidator, ValidationReport, Violation, ViolationKind,
};
