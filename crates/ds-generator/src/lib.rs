//! Documentation generation: turning extracted records into doc text.
//!
//! The parser never talks to a generator; callers extract records, run
//! them through a [`DocGenerator`] (usually via [`generate_all`]) and hand
//! the resulting name -> text map to the re-inserter.

pub mod batch;
pub mod http;
pub mod prompt;
pub mod template;
pub mod traits;

pub use batch::{generate_all, to_doc_map, BatchConfig};
pub use http::HttpGenerator;
pub use template::TemplateGenerator;
pub use traits::{DocGenerator, DocRequest, GeneratedDoc};
