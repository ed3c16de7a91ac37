//! Prompt construction and response cleanup.

use crate::traits::DocRequest;
use ds_core::{DocStyle, FunctionKind};
use ds_parser::docstring::{normalize_doc, strip_jsdoc};

pub const SYSTEM_PROMPT: &str = "You write documentation comments for source code. \
Reply with the documentation text only: no code fences, no comment markers, no surrounding quotes.";

pub fn style_guide(style: DocStyle) -> &'static str {
    match style {
        DocStyle::Google => {
            "Google style: a one-line summary, a blank line, then `Args:`, `Returns:` and `Raises:` sections as needed."
        }
        DocStyle::Numpy => {
            "NumPy style: a one-line summary, a blank line, then `Parameters` and `Returns` sections underlined with dashes."
        }
        DocStyle::Sphinx => {
            "Sphinx style: a one-line summary followed by `:param name:`, `:type name:`, `:returns:` and `:rtype:` fields."
        }
        DocStyle::Jsdoc => {
            "JSDoc style: a one-line summary followed by `@param {type} name description` and `@returns {type} description` tags."
        }
    }
}

fn kind_label(kind: FunctionKind) -> &'static str {
    match kind {
        FunctionKind::Function => "function",
        FunctionKind::Method => "method",
        FunctionKind::Class => "class",
    }
}

/// User prompt for one definition.
pub fn build_prompt(request: &DocRequest, style: DocStyle) -> String {
    let mut prompt = format!(
        "Write documentation for the {} {} `{}`.\n{}\n",
        request.language,
        kind_label(request.kind),
        request.name,
        style_guide(style),
    );

    if !request.parameters.is_empty() {
        prompt.push_str("\nParameters:\n");
        for p in &request.parameters {
            prompt.push_str(&format!("- {}", p.name));
            if let Some(ty) = &p.type_annotation {
                prompt.push_str(&format!(": {ty}"));
            }
            if let Some(default) = &p.default_value {
                prompt.push_str(&format!(" = {default}"));
            }
            prompt.push('\n');
        }
    }
    if let Some(ret) = &request.return_type {
        prompt.push_str(&format!("\nReturn type: {ret}\n"));
    }

    prompt.push_str(&format!("\nSource:\n```{}\n{}\n```\n", request.language, request.body));
    prompt
}

/// Strip wrappers a model tends to add anyway: code fences, triple quotes,
/// `/** */` markers. Common indentation is removed.
pub fn clean_response(text: &str) -> String {
    let mut body = text.trim_end();

    if let Some(fenced) = body.trim_start().strip_prefix("```") {
        body = fenced.split_once('\n').map_or("", |(_, rest)| rest).trim_end();
        body = body.strip_suffix("```").unwrap_or(body).trim_end();
    }

    let inner = body.trim();
    for quote in ["\"\"\"", "'''"] {
        if inner.len() >= 2 * quote.len() && inner.starts_with(quote) && inner.ends_with(quote) {
            body = inner[quote.len()..inner.len() - quote.len()].trim();
            break;
        }
    }

    if inner.starts_with("/**") && inner.ends_with("*/") {
        let lines: Vec<&str> = inner.lines().collect();
        return strip_jsdoc(&lines);
    }

    normalize_doc(body).join("\n")
}
