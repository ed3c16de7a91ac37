use crate::ParseError;
use ds_core::{FunctionRecord, Language};

/// A line-oriented scanner for one language.
pub trait SourceParser: Send + Sync {
    fn language(&self) -> Language;

    /// Scan `lines` top to bottom, pushing each record into `out` as it is found.
    ///
    /// On error, `out` keeps every record pushed before the failure.
    fn scan(&self, lines: &[&str], out: &mut Vec<FunctionRecord>) -> Result<(), ParseError>;

    /// Parse content string. Best effort: never fails.
    fn parse_content(&self, content: &str) -> Vec<FunctionRecord> {
        crate::extract(content, self.language())
    }

    /// Parse from file path.
    fn parse_file(&self, path: &str) -> ds_core::Result<Vec<FunctionRecord>> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.parse_content(&content))
    }

    /// Supported file extensions.
    fn supported_extensions(&self) -> Vec<String>;

    /// Check if a file can be parsed.
    fn can_parse(&self, path: &str) -> bool {
        let ext = std::path::Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let ext_with_dot = format!(".{}", ext);
        self.supported_extensions().contains(&ext_with_dot)
    }
}
