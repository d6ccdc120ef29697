//! Prelude module for common imports

pub use crate::infrastructure::{AzurePipelinesBackend, GENERATED_BANNER, ReleaseData};
pub use crate::pipeline::document::{Job, PipelineDocument, PoolReference, Step};
pub use crate::pipeline::errors::{RenderError, ValidationError, VersionError};
pub use crate::pipeline::matrix::{CriEndpoints, expand_version};
pub use crate::pipeline::types::Validate;
pub use crate::pipeline::version::VersionIdentifier;
pub use crate::pipeline::assemble;
