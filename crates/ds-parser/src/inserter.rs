//! Writing generated documentation back into source text.
//!
//! The source is re-extracted so line numbers reflect its current state,
//! then records are rewritten bottom-up: an edit only shifts lines below
//! it, so every record still to be processed keeps valid line numbers.

use crate::docstring::{locate_jsdoc, locate_python_docstring, normalize_doc};
use crate::{extract, leading_ws, split_lines};
use ds_core::Language;
use std::collections::HashMap;
use tracing::debug;

/// Extra indentation for a Python docstring relative to its header.
const PYTHON_BODY_INDENT: &str = "    ";
/// Extra indentation for a JSDoc block relative to its header.
const JAVASCRIPT_BODY_INDENT: &str = "  ";

/// Result of [`document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentedSource {
    pub content: String,
    /// Records whose documentation was written.
    pub updated: usize,
}

/// Insert documentation for every record named in `docs`, replacing any
/// existing docstring or JSDoc block.
pub fn insert(source: &str, language: Language, docs: &HashMap<String, String>) -> String {
    document(source, language, docs).content
}

/// Same as [`insert`], also reporting how many records were updated.
pub fn document(source: &str, language: Language, docs: &HashMap<String, String>) -> DocumentedSource {
    let records = extract(source, language);
    let mut lines: Vec<String> = split_lines(source).into_iter().map(String::from).collect();
    let mut updated = 0;

    for (idx, record) in records.iter().enumerate().rev() {
        let Some(doc) = docs.get(&record.name) else { continue };
        let doc_lines = normalize_doc(doc);
        if doc_lines.is_empty() {
            debug!(name = %record.name, "skipping empty documentation");
            continue;
        }

        let header = record.start_line - 1;
        let indent = leading_ws(&lines[header]).to_string();
        let (range, block) = match language {
            Language::Python => {
                let block = python_block(&doc_lines, &format!("{indent}{PYTHON_BODY_INDENT}"));
                let range = match locate_python_docstring(&lines, header, record.end_line - 1) {
                    Some(existing) => existing.start..existing.end + 1,
                    None => header + 1..header + 1,
                };
                (range, block)
            }
            Language::JavaScript => {
                let floor = idx.checked_sub(1).map_or(0, |prev| records[prev].end_line);
                let block = jsdoc_block(&doc_lines, &format!("{indent}{JAVASCRIPT_BODY_INDENT}"));
                let range = match locate_jsdoc(&lines, header, floor) {
                    Some(existing) => existing.start..existing.end + 1,
                    None => header..header,
                };
                (range, block)
            }
        };

        debug!(
            name = %record.name,
            replaced = range.len(),
            inserted = block.len(),
            "writing documentation"
        );
        lines.splice(range, block);
        updated += 1;
    }

    let mut content = lines.join("\n");
    if source.ends_with('\n') {
        content.push('\n');
    }
    DocumentedSource { content, updated }
}

fn python_block(doc: &[String], indent: &str) -> Vec<String> {
    let mut block = Vec::with_capacity(doc.len() + 2);
    block.push(format!("{indent}\"\"\""));
    for line in doc {
        if line.is_empty() {
            block.push(String::new());
        } else {
            block.push(format!("{indent}{}", line.replace("\"\"\"", "\\\"\\\"\\\"")));
        }
    }
    block.push(format!("{indent}\"\"\""));
    block
}

fn jsdoc_block(doc: &[String], indent: &str) -> Vec<String> {
    let mut block = Vec::with_capacity(doc.len() + 2);
    block.push(format!("{indent}/**"));
    for line in doc {
        if line.is_empty() {
            block.push(format!("{indent} *"));
        } else {
            block.push(format!("{indent} * {}", line.replace("*/", "*\\/")));
        }
    }
    block.push(format!("{indent} */"));
    block
}
