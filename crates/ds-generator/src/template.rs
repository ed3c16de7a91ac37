//! Offline generator producing skeleton documentation from the signature.

use crate::traits::{DocGenerator, DocRequest};
use async_trait::async_trait;
use ds_core::{DocStyle, FunctionKind, Parameter, Result};

/// Fills in a summary line plus one entry per parameter and the return
/// type, in the requested style. Descriptions are placeholders.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateGenerator;

impl TemplateGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, request: &DocRequest, style: DocStyle) -> String {
        let summary = summary_line(&request.name);
        let params: Vec<&Parameter> = if request.kind == FunctionKind::Class {
            Vec::new()
        } else {
            request.parameters.iter().collect()
        };
        let ret = match request.kind {
            FunctionKind::Class => None,
            _ => request.return_type.as_deref(),
        };

        let mut out = vec![summary];
        match style {
            DocStyle::Google => google(&mut out, &params, ret),
            DocStyle::Numpy => numpy(&mut out, &params, ret),
            DocStyle::Sphinx => sphinx(&mut out, &params, ret),
            DocStyle::Jsdoc => jsdoc(&mut out, &params, ret),
        }
        out.join("\n")
    }
}

#[async_trait]
impl DocGenerator for TemplateGenerator {
    async fn generate(&self, request: &DocRequest, style: DocStyle) -> Result<String> {
        Ok(self.render(request, style))
    }

    fn name(&self) -> &str {
        "template"
    }
}

/// `parse_http_request` / `parseHttpRequest` -> `Parse http request.`
pub fn summary_line(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch == '_' || ch == '$' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    let sentence = words.join(" ");
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => format!("{name}."),
    }
}

fn bare_name(param: &Parameter) -> &str {
    param.name.trim_start_matches(['*', '.'])
}

fn google(out: &mut Vec<String>, params: &[&Parameter], ret: Option<&str>) {
    if !params.is_empty() {
        out.push(String::new());
        out.push("Args:".into());
        for p in params {
            let mut qualifiers: Vec<&str> = Vec::new();
            if let Some(ty) = &p.type_annotation {
                qualifiers.push(ty);
            }
            if p.default_value.is_some() {
                qualifiers.push("optional");
            }
            let head = if qualifiers.is_empty() {
                p.name.clone()
            } else {
                format!("{} ({})", p.name, qualifiers.join(", "))
            };
            let mut line = format!("    {head}: Description of {}.", bare_name(p));
            if let Some(default) = &p.default_value {
                line.push_str(&format!(" Defaults to {default}."));
            }
            out.push(line);
        }
    }
    if let Some(ret) = ret {
        out.push(String::new());
        out.push("Returns:".into());
        out.push(format!("    {ret}: Description of return value."));
    }
}

fn numpy(out: &mut Vec<String>, params: &[&Parameter], ret: Option<&str>) {
    if !params.is_empty() {
        out.push(String::new());
        out.push("Parameters".into());
        out.push("----------".into());
        for p in params {
            let line = match (&p.type_annotation, p.default_value.is_some()) {
                (Some(ty), true) => format!("{} : {ty}, optional", p.name),
                (Some(ty), false) => format!("{} : {ty}", p.name),
                (None, true) => format!("{} : optional", p.name),
                (None, false) => p.name.clone(),
            };
            out.push(line);
            out.push(format!("    Description of {}.", bare_name(p)));
        }
    }
    if let Some(ret) = ret {
        out.push(String::new());
        out.push("Returns".into());
        out.push("-------".into());
        out.push(ret.to_string());
        out.push("    Description of return value.".into());
    }
}

fn sphinx(out: &mut Vec<String>, params: &[&Parameter], ret: Option<&str>) {
    if params.is_empty() && ret.is_none() {
        return;
    }
    out.push(String::new());
    for p in params {
        let name = bare_name(p);
        out.push(format!(":param {name}: Description of {name}."));
        if let Some(ty) = &p.type_annotation {
            out.push(format!(":type {name}: {ty}"));
        }
    }
    if let Some(ret) = ret {
        out.push(":returns: Description of return value.".into());
        out.push(format!(":rtype: {ret}"));
    }
}

fn jsdoc(out: &mut Vec<String>, params: &[&Parameter], ret: Option<&str>) {
    for p in params {
        let ty = p.type_annotation.as_deref().unwrap_or("*");
        let name = bare_name(p);
        let slot = match &p.default_value {
            Some(default) => format!("[{name}={default}]"),
            None => name.to_string(),
        };
        out.push(format!("@param {{{ty}}} {slot} - Description of {name}."));
    }
    if let Some(ret) = ret {
        out.push(format!("@returns {{{ret}}} Description of return value."));
    }
}
