//! Parameter-list parsing shared by both languages.
//!
//! The raw list is split on every comma; nested brackets are not tracked, so
//! destructured or generic-typed parameters with inner commas come out split.

use ds_core::{Language, Parameter};
use regex::Regex;
use std::sync::LazyLock;

static PY_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<name>\*{0,2}[A-Za-z_]\w*)(?P<rest>.*)$").unwrap()
});

static JS_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?P<name>(?:\.\.\.)?[A-Za-z_$][\w$]*)\??(?P<rest>.*)$").unwrap()
});

/// Parse a raw parameter list such as `a, b: int, c=5`.
pub fn parse_parameters(raw: &str, language: Language) -> Vec<Parameter> {
    let re = match language {
        Language::Python => &*PY_PARAM_RE,
        Language::JavaScript => &*JS_PARAM_RE,
    };
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(|segment| parse_segment(re, segment))
        .collect()
}

/// Drop a leading `self`/`cls` receiver from a Python parameter list.
pub fn strip_receiver(params: &mut Vec<Parameter>) {
    if params
        .first()
        .is_some_and(|p| p.name == "self" || p.name == "cls")
    {
        params.remove(0);
    }
}

fn parse_segment(re: &Regex, segment: &str) -> Option<Parameter> {
    let caps = re.captures(segment)?;
    let name = caps.name("name")?.as_str();
    let rest = caps.name("rest").map_or("", |m| m.as_str()).trim();

    let (annotation, default) = match find_assignment(rest) {
        Some(pos) => (&rest[..pos], Some(rest[pos + 1..].trim())),
        None => (rest, None),
    };

    let mut param = Parameter::new(name);
    if let Some(ty) = annotation.trim().strip_prefix(':').map(str::trim) {
        if !ty.is_empty() {
            param.type_annotation = Some(ty.to_string());
        }
    }
    if let Some(value) = default.filter(|v| !v.is_empty()) {
        param.default_value = Some(value.to_string());
    }
    Some(param)
}

/// First `=` that is not the start of an arrow `=>`.
fn find_assignment(s: &str) -> Option<usize> {
    s.char_indices()
        .find(|&(i, c)| c == '=' && !s[i + 1..].starts_with('>'))
        .map(|(i, _)| i)
}
