//! Heuristic function/class extraction and documentation re-insertion
//! for Python and JavaScript/TypeScript.
//!
//! Scanning is line-oriented: headers are recognised with regexes and
//! bodies are delimited by indentation (Python) or brace balance
//! (JavaScript). Extraction is flat; a definition nested inside an
//! already recorded body is never reported on its own.

pub mod docstring;
pub mod error;
pub mod inserter;
pub mod javascript;
pub mod params;
pub mod python;
pub mod traits;

pub use docstring::{locate_jsdoc, locate_python_docstring, DocBlock};
pub use error::ParseError;
pub use inserter::{document, insert, DocumentedSource};
pub use javascript::JavaScriptParser;
pub use params::parse_parameters;
pub use python::PythonParser;
pub use traits::SourceParser;

use ds_core::{DsError, FunctionRecord, Language};
use tracing::{debug, warn};

/// Scanner for `language`.
pub fn parser_for(language: Language) -> &'static dyn SourceParser {
    match language {
        Language::Python => &PythonParser,
        Language::JavaScript => &JavaScriptParser,
    }
}

/// Extract every top-level definition from `source`.
///
/// Best effort: if the scan fails part way, the records found before the
/// failure are returned and the failure is logged.
pub fn extract(source: &str, language: Language) -> Vec<FunctionRecord> {
    extract_with(parser_for(language), source)
}

/// [`extract`] with an explicit scanner.
pub fn extract_with(parser: &dyn SourceParser, source: &str) -> Vec<FunctionRecord> {
    let language = parser.language();
    let lines = split_lines(source);
    let mut records = Vec::new();
    if let Err(err) = parser.scan(&lines, &mut records) {
        warn!(%language, error = %err, recovered = records.len(), "extraction stopped early");
    }
    debug!(%language, lines = lines.len(), records = records.len(), "extracted definitions");
    records
}

/// Like [`extract`] but reports a scan failure instead of returning partial results.
pub fn try_extract(source: &str, language: Language) -> Result<Vec<FunctionRecord>, ParseError> {
    try_extract_with(parser_for(language), source)
}

/// [`try_extract`] with an explicit scanner.
pub fn try_extract_with(parser: &dyn SourceParser, source: &str) -> Result<Vec<FunctionRecord>, ParseError> {
    let lines = split_lines(source);
    let mut records = Vec::new();
    parser.scan(&lines, &mut records)?;
    Ok(records)
}

/// Read a file and extract from it, choosing the language by extension.
pub fn extract_file(path: &str) -> ds_core::Result<Vec<FunctionRecord>> {
    let language = Language::from_path(path)
        .ok_or_else(|| DsError::UnsupportedLanguage(path.to_string()))?;
    parser_for(language).parse_file(path)
}

/// Split on `\n` or `\r\n`. A trailing newline does not produce an empty last line.
pub fn split_lines(source: &str) -> Vec<&str> {
    source.lines().collect()
}

/// Leading run of spaces and tabs.
pub(crate) fn leading_ws(line: &str) -> &str {
    let end = line.len() - line.trim_start_matches([' ', '\t']).len();
    &line[..end]
}

pub(crate) fn line_at<'a, S: AsRef<str>>(lines: &'a [S], index: usize) -> Result<&'a str, ParseError> {
    lines
        .get(index)
        .map(AsRef::as_ref)
        .ok_or(ParseError::LineOutOfRange { index, total: lines.len() })
}

/// Lines `start..=end` (0-based) joined with `\n`.
pub(crate) fn join_lines(lines: &[&str], start: usize, end: usize) -> Result<String, ParseError> {
    lines
        .get(start..=end)
        .map(|slice| slice.join("\n"))
        .ok_or(ParseError::LineOutOfRange { index: end, total: lines.len() })
}
