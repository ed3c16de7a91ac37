//! Python scanner: `def`/`class` headers, bodies delimited by indentation.

use crate::docstring::locate_python_docstring;
use crate::params::{parse_parameters, strip_receiver};
use crate::{join_lines, leading_ws, line_at, traits::SourceParser, ParseError};
use ds_core::{FunctionKind, FunctionRecord, Language};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

static DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<indent>[ \t]*)(?P<async>async\s+)?def\s+(?P<name>[A-Za-z_]\w*)\s*\((?P<params>.*?)\)\s*(?:->\s*(?P<ret>[^:]+?)\s*)?:",
    )
    .unwrap()
});

static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>[ \t]*)class\s+(?P<name>[A-Za-z_]\w*)\s*(?:\((?P<bases>.*)\))?\s*:").unwrap()
});

static DECORATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*@(?P<name>[A-Za-z_][\w.]*)").unwrap());

/// Python scanner.
pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self { Self }
}

impl Default for PythonParser {
    fn default() -> Self { Self::new() }
}

struct Header<'a> {
    indent: &'a str,
    name: &'a str,
    params: &'a str,
    return_type: Option<&'a str>,
    is_async: bool,
    is_class: bool,
}

fn capture<'a>(caps: &Captures<'a>, group: &'static str, line: usize) -> Result<&'a str, ParseError> {
    caps.name(group)
        .map(|m| m.as_str())
        .ok_or(ParseError::MissingCapture { line, group })
}

fn match_header(text: &str, line: usize) -> Result<Option<Header<'_>>, ParseError> {
    if let Some(caps) = DEF_RE.captures(text) {
        return Ok(Some(Header {
            indent: capture(&caps, "indent", line)?,
            name: capture(&caps, "name", line)?,
            params: capture(&caps, "params", line)?,
            return_type: caps.name("ret").map(|m| m.as_str().trim()),
            is_async: caps.name("async").is_some(),
            is_class: false,
        }));
    }
    if let Some(caps) = CLASS_RE.captures(text) {
        return Ok(Some(Header {
            indent: capture(&caps, "indent", line)?,
            name: capture(&caps, "name", line)?,
            params: "",
            return_type: None,
            is_async: false,
            is_class: true,
        }));
    }
    Ok(None)
}

/// Last line of the body opened at `header`.
///
/// The body runs while lines are blank or indented deeper than `indent_len`.
pub(crate) fn body_end(lines: &[&str], header: usize, indent_len: usize) -> usize {
    let mut end = header;
    for (i, line) in lines.iter().enumerate().skip(header + 1) {
        if line.trim().is_empty() || leading_ws(line).len() > indent_len {
            end = i;
        } else {
            break;
        }
    }
    end
}

/// Decorator names on the contiguous `@` lines directly above `header`, top first.
fn decorators_above(lines: &[&str], header: usize, floor: usize) -> Vec<String> {
    let mut names = Vec::new();
    let mut i = header;
    while i > floor {
        i -= 1;
        match DECORATOR_RE.captures(lines[i]) {
            Some(caps) => names.push(caps["name"].to_string()),
            None => break,
        }
    }
    names.reverse();
    names
}

impl SourceParser for PythonParser {
    fn language(&self) -> Language {
        Language::Python
    }

    fn scan(&self, lines: &[&str], out: &mut Vec<FunctionRecord>) -> Result<(), ParseError> {
        let mut floor = 0;
        let mut i = 0;
        while i < lines.len() {
            let text = line_at(lines, i)?;
            let Some(header) = match_header(text, i + 1)? else {
                i += 1;
                continue;
            };

            let end = body_end(lines, i, header.indent.len());
            let kind = if header.is_class {
                FunctionKind::Class
            } else if header.indent.is_empty() {
                FunctionKind::Function
            } else {
                FunctionKind::Method
            };

            let mut parameters = parse_parameters(header.params, Language::Python);
            strip_receiver(&mut parameters);

            let record = FunctionRecord {
                name: header.name.to_string(),
                kind,
                parameters,
                return_type: header.return_type.filter(|r| !r.is_empty()).map(String::from),
                existing_documentation: locate_python_docstring(lines, i, end).map(|d| d.text),
                start_line: i + 1,
                end_line: end + 1,
                original_code: join_lines(lines, i, end)?,
                generated_documentation: None,
                is_async: header.is_async,
                decorators: decorators_above(lines, i, floor),
            };
            debug!(name = %record.name, start = record.start_line, end = record.end_line, "python definition");
            out.push(record);

            floor = end + 1;
            i = end + 1;
        }
        Ok(())
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec![".py".into(), ".pyw".into()]
    }
}
