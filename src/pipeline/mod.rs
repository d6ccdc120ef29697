//! Pipeline domain types and logic

pub mod assembler;
pub mod document;
pub mod errors;
pub mod matrix;
pub mod types;
pub mod version;

// Re-export public types from submodules
pub use assembler::assemble;
pub use document::{DEFAULT_VM_IMAGE, Job, PipelineDocument, PoolReference, Step};
pub use errors::{RenderError, ValidationError, VersionError};
pub use matrix::{CriEndpoints, KUBERNETES_VERSION_ENV, expand_version};
pub use types::Validate;
pub use version::{DEFAULT_VERSION, VersionIdentifier};
