//! Shared types, errors and configuration for Docsmith.

pub mod config;
pub mod error;
pub mod types;

pub use config::DocsmithConfig;
pub use error::{DsError, Result};
pub use types::{attach_documentation, DocStyle, FunctionKind, FunctionRecord, Language, Parameter};
