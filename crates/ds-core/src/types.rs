use crate::error::DsError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Source language accepted by the parser.
///
/// TypeScript is scanned with the JavaScript rules; type annotations are
/// carried through as opaque text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    #[serde(alias = "typescript", alias = "js", alias = "ts")]
    JavaScript,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
        }
    }

    /// Map a file extension (without the dot) to a language.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyw" => Some(Self::Python),
            "js" | "jsx" | "mjs" | "cjs" | "ts" | "tsx" => Some(Self::JavaScript),
            _ => None,
        }
    }

    /// Detect the language of a file from its name.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Documentation style used when the caller does not pick one.
    pub fn default_style(&self) -> DocStyle {
        match self {
            Self::Python => DocStyle::Google,
            Self::JavaScript => DocStyle::Jsdoc,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = DsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "javascript" | "js" | "typescript" | "ts" => Ok(Self::JavaScript),
            other => Err(DsError::UnsupportedLanguage(other.to_string())),
        }
    }
}

/// Documentation style requested from the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStyle {
    Google,
    Numpy,
    Sphinx,
    Jsdoc,
}

impl DocStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Numpy => "numpy",
            Self::Sphinx => "sphinx",
            Self::Jsdoc => "jsdoc",
        }
    }
}

impl fmt::Display for DocStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocStyle {
    type Err = DsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "numpy" => Ok(Self::Numpy),
            "sphinx" => Ok(Self::Sphinx),
            "jsdoc" => Ok(Self::Jsdoc),
            other => Err(DsError::UnsupportedStyle(other.to_string())),
        }
    }
}

/// What kind of definition a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    Function,
    Method,
    Class,
}

/// One declared parameter, as raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_annotation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_type(mut self, ty: impl Into<String>) -> Self {
        self.type_annotation = Some(ty.into());
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// A function, method or class located in source text.
///
/// Line numbers are 1-based and inclusive. `original_code` is exactly the
/// source lines `start_line..=end_line` joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRecord {
    pub name: String,
    pub kind: FunctionKind,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_documentation: Option<String>,
    pub start_line: usize,
    pub end_line: usize,
    pub original_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_documentation: Option<String>,
    #[serde(default)]
    pub is_async: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub decorators: Vec<String>,
}

impl FunctionRecord {
    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    pub fn has_documentation(&self) -> bool {
        self.existing_documentation.is_some()
    }

    /// Header line of the definition.
    pub fn signature(&self) -> &str {
        self.original_code.lines().next().unwrap_or("").trim()
    }
}

/// Merge a name -> documentation mapping into freshly extracted records.
///
/// Records whose name has no entry are left untouched. Returns how many
/// records received documentation.
pub fn attach_documentation(records: &mut [FunctionRecord], docs: &HashMap<String, String>) -> usize {
    let mut attached = 0;
    for record in records.iter_mut() {
        if let Some(doc) = docs.get(&record.name) {
            record.generated_documentation = Some(doc.clone());
            attached += 1;
        }
    }
    attached
}
