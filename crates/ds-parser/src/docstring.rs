//! Locating existing documentation: Python docstrings inside a body and
//! JSDoc blocks directly above a JavaScript header.

use crate::leading_ws;

/// Documentation found in source, with its 0-based inclusive line span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

const DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// Find the docstring of the definition whose header is at `header` and whose
/// body ends at `body_end`.
///
/// Only the first statement of the body is considered: blank lines and `#`
/// comments are skipped, then that line must open with `"""` or `'''`
/// (optionally behind an `r`/`u` prefix). A docstring whose closing delimiter
/// is not found before `body_end` is treated as absent.
pub fn locate_python_docstring<S: AsRef<str>>(lines: &[S], header: usize, body_end: usize) -> Option<DocBlock> {
    let last = body_end.min(lines.len().checked_sub(1)?);
    let (start, first) = (header + 1..=last)
        .map(|i| (i, lines[i].as_ref()))
        .find(|(_, l)| {
            let t = l.trim();
            !t.is_empty() && !t.starts_with('#')
        })?;

    let opening = first.trim_start();
    let opening = opening
        .strip_prefix(['r', 'R', 'u', 'U'])
        .filter(|rest| DELIMITERS.iter().any(|d| rest.starts_with(d)))
        .unwrap_or(opening);
    let delim = DELIMITERS.into_iter().find(|d| opening.starts_with(d))?;
    let after = &opening[delim.len()..];

    if let Some(pos) = after.find(delim) {
        return Some(DocBlock {
            text: after[..pos].trim().to_string(),
            start,
            end: start,
        });
    }

    let mut rest = Vec::new();
    for end in start + 1..=last {
        let line = lines[end].as_ref();
        if let Some(pos) = line.find(delim) {
            rest.push(&line[..pos]);
            return Some(DocBlock {
                text: clean_docstring(after, &rest),
                start,
                end,
            });
        }
        rest.push(line);
    }
    None
}

/// Find a `/** ... */` block ending on the line directly above `header`.
///
/// The walk upward is contiguous and never goes below `floor`, the first line
/// not owned by a previously recorded definition.
pub fn locate_jsdoc<S: AsRef<str>>(lines: &[S], header: usize, floor: usize) -> Option<DocBlock> {
    if header == 0 || header <= floor || header > lines.len() {
        return None;
    }
    let end = header - 1;
    if !lines[end].as_ref().trim_end().ends_with("*/") {
        return None;
    }

    let mut start = end;
    loop {
        let t = lines[start].as_ref().trim_start();
        if t.starts_with("/**") {
            break;
        }
        if t.starts_with("/*") || start == floor {
            return None;
        }
        start -= 1;
    }

    let block: Vec<&str> = (start..=end).map(|i| lines[i].as_ref()).collect();
    Some(DocBlock {
        text: strip_jsdoc(&block),
        start,
        end,
    })
}

/// Comment markers removed, one space after each leading `*` dropped.
pub fn strip_jsdoc(block: &[&str]) -> String {
    let stripped: Vec<&str> = block
        .iter()
        .map(|line| {
            let mut t = line.trim();
            t = t.strip_prefix("/**").unwrap_or(t);
            t = t.strip_suffix("*/").unwrap_or(t);
            let t = t.trim_start();
            let t = match t.strip_prefix('*') {
                Some(body) => body.strip_prefix(' ').unwrap_or(body),
                None => t,
            };
            t.trim_end()
        })
        .collect();
    stripped.join("\n").trim().to_string()
}

/// Normalise documentation text into lines: trailing whitespace dropped,
/// surrounding blank lines dropped, common indentation removed.
pub fn normalize_doc(doc: &str) -> Vec<String> {
    let lines: Vec<&str> = doc.lines().map(str::trim_end).collect();
    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    let (Some(first), Some(last)) = (first, last) else {
        return Vec::new();
    };
    dedent(&lines[first..=last])
}

fn clean_docstring(first: &str, rest: &[&str]) -> String {
    let mut out = vec![first.trim().to_string()];
    out.extend(dedent(rest));
    out.join("\n").trim().to_string()
}

fn dedent(lines: &[&str]) -> Vec<String> {
    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_ws(l).len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| {
            if l.trim().is_empty() {
                String::new()
            } else {
                l[indent..].trim_end().to_string()
            }
        })
        .collect()
}
