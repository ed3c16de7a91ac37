//! JavaScript/TypeScript scanner: single-line headers, bodies delimited by
//! brace balance.

use crate::docstring::locate_jsdoc;
use crate::params::parse_parameters;
use crate::{join_lines, line_at, traits::SourceParser, ParseError};
use ds_core::{FunctionKind, FunctionRecord, Language};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Names that look like `name(...) {` but open a control-flow block.
///
/// A call whose argument opens a block, such as `setTimeout(function() {`,
/// still matches the method shape and is recorded under the callee's name.
const KEYWORDS: &[&str] = &["if", "for", "while", "switch", "catch", "with", "return", "function"];

struct Shape {
    re: Regex,
    kind: FunctionKind,
}

/// Header shapes, tried in order.
static SHAPES: LazyLock<Vec<Shape>> = LazyLock::new(|| {
    vec![
        // function name(params): ret {
        Shape {
            re: Regex::new(
                r"^[ \t]*(?:export\s+)?(?:default\s+)?(?P<async>async\s+)?function\b\s*\*?\s*(?P<name>[A-Za-z_$][\w$]*)\s*(?:<[^>()]*>)?\s*\((?P<params>.*?)\)\s*(?::\s*(?P<ret>[^{]+?)\s*)?\{",
            )
            .unwrap(),
            kind: FunctionKind::Function,
        },
        // const name = (params): ret => {
        Shape {
            re: Regex::new(
                r"^[ \t]*(?:export\s+)?(?:(?:const|let|var)\s+)?(?P<name>[A-Za-z_$][\w$]*)\s*(?::[^=]+)?=\s*(?P<async>async\s+)?\((?P<params>.*?)\)\s*(?::\s*(?P<ret>[^=]+?)\s*)?=>\s*\{",
            )
            .unwrap(),
            kind: FunctionKind::Function,
        },
        // name(params): ret {
        Shape {
            re: Regex::new(
                r"^[ \t]*(?:(?:public|private|protected|static|readonly|override|abstract|get|set)\s+)*(?P<async>async\s+)?(?P<name>[A-Za-z_$][\w$]*)\s*\((?P<params>.*?)\)\s*(?::\s*(?P<ret>[^{]+?)\s*)?\{",
            )
            .unwrap(),
            kind: FunctionKind::Method,
        },
    ]
});

/// JavaScript/TypeScript scanner.
pub struct JavaScriptParser;

impl JavaScriptParser {
    pub fn new() -> Self { Self }
}

impl Default for JavaScriptParser {
    fn default() -> Self { Self::new() }
}

struct Header<'a> {
    name: &'a str,
    params: &'a str,
    return_type: Option<&'a str>,
    is_async: bool,
    kind: FunctionKind,
}

fn match_header(text: &str, line: usize) -> Result<Option<Header<'_>>, ParseError> {
    for shape in SHAPES.iter() {
        let Some(caps) = shape.re.captures(text) else { continue };
        let name = caps
            .name("name")
            .ok_or(ParseError::MissingCapture { line, group: "name" })?
            .as_str();
        if KEYWORDS.contains(&name) {
            continue;
        }
        return Ok(Some(Header {
            name,
            params: caps.name("params").map_or("", |m| m.as_str()),
            return_type: caps.name("ret").map(|m| m.as_str().trim()),
            is_async: caps.name("async").is_some(),
            kind: shape.kind,
        }));
    }
    Ok(None)
}

fn brace_delta(line: &str) -> i64 {
    line.chars().fold(0, |acc, c| match c {
        '{' => acc + 1,
        '}' => acc - 1,
        _ => acc,
    })
}

/// Line on which the brace count opened at `header` returns to zero.
///
/// Clamps to the last line when the count never closes.
pub(crate) fn body_end(lines: &[&str], header: usize) -> usize {
    let mut depth = brace_delta(lines[header]);
    if depth <= 0 {
        return header;
    }
    for (i, line) in lines.iter().enumerate().skip(header + 1) {
        depth += brace_delta(line);
        if depth <= 0 {
            return i;
        }
    }
    lines.len() - 1
}

impl SourceParser for JavaScriptParser {
    fn language(&self) -> Language {
        Language::JavaScript
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

            let end = body_end(lines, i);
            let record = FunctionRecord {
                name: header.name.to_string(),
                kind: header.kind,
                parameters: parse_parameters(header.params, Language::JavaScript),
                return_type: header.return_type.filter(|r| !r.is_empty()).map(String::from),
                existing_documentation: locate_jsdoc(lines, i, floor).map(|d| d.text),
                start_line: i + 1,
                end_line: end + 1,
                original_code: join_lines(lines, i, end)?,
                generated_documentation: None,
                is_async: header.is_async,
                decorators: Vec::new(),
            };
            debug!(name = %record.name, start = record.start_line, end = record.end_line, "javascript definition");
            out.push(record);

            floor = end + 1;
            i = end + 1;
        }
        Ok(())
    }

    fn supported_extensions(&self) -> Vec<String> {
        vec![
            ".js".into(), ".jsx".into(), ".mjs".into(), ".cjs".into(),
            ".ts".into(), ".tsx".into(),
        ]
    }
}
