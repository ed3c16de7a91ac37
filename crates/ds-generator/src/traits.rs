use async_trait::async_trait;
use ds_core::{DocStyle, FunctionKind, FunctionRecord, Language, Parameter, Result};
use serde::{Deserialize, Serialize};

/// What a generator is told about one definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocRequest {
    pub name: String,
    pub kind: FunctionKind,
    pub language: Language,
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<String>,
    pub body: String,
}

impl DocRequest {
    pub fn from_record(record: &FunctionRecord, language: Language) -> Self {
        Self {
            name: record.name.clone(),
            kind: record.kind,
            language,
            parameters: record.parameters.clone(),
            return_type: record.return_type.clone(),
            body: record.original_code.clone(),
        }
    }
}

/// Documentation produced for one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDoc {
    pub name: String,
    pub docstring: String,
}

/// Turns a definition into documentation text.
///
/// The returned text is plain: no comment markers, quotes or fences.
#[async_trait]
pub trait DocGenerator: Send + Sync {
    async fn generate(&self, request: &DocRequest, style: DocStyle) -> Result<String>;

    /// Short identifier used in logs.
    fn name(&self) -> &str;
}
