//! JSON export and import of quote collections

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::QuoteError;
use crate::types::Quote;

/// File name used for exports
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Serialize quotes as a pretty-printed JSON array
pub fn export_json(quotes: &[Quote]) -> Result<String, QuoteError> {
    Ok(serde_json::to_string_pretty(quotes)?)
}

/// Write `quotes.json` into `dir`, creating it if needed
pub fn export_to_dir(dir: &Path, quotes: &[Quote]) -> Result<PathBuf, QuoteError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, export_json(quotes)?)?;

    tracing::info!("Exported {} quotes to {:?}", quotes.len(), path);
    Ok(path)
}

/// Parse and validate an import document.
///
/// The document must be an array of objects carrying non-empty string
/// `text` and `category` fields. One bad item rejects the whole document.
pub fn parse_import(json: &str) -> Result<Vec<Quote>, QuoteError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| QuoteError::InvalidImport(format!("not valid JSON ({})", e)))?;

    let items = value
        .as_array()
        .ok_or_else(|| QuoteError::InvalidImport("expected a JSON array of quotes".to_string()))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_item(index, item))
        .collect()
}

fn parse_item(index: usize, item: &Value) -> Result<Quote, QuoteError> {
    let object = item
        .as_object()
        .ok_or_else(|| QuoteError::InvalidImport(format!("item {} is not an object", index)))?;

    let field = |name: &str| {
        object
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                QuoteError::InvalidImport(format!("item {} has no string \"{}\" field", index, name))
            })
    };

    let text = field("text")?;
    let category = field("category")?;

    Quote::new(text, category).map_err(|_| {
        QuoteError::InvalidImport(format!("item {} has an empty text or category", index))
    })
}

/// Read and validate an import file
pub async fn read_import_file(path: &Path) -> Result<Vec<Quote>, QuoteError> {
    let json = tokio::fs::read_to_string(path).await?;
    parse_import(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_is_pretty_array() {
        let quotes = vec![Quote::new("Learn X", "Education").unwrap()];
        let json = export_json(&quotes).unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\n  {"));
        assert!(json.contains("\"text\": \"Learn X\""));
    }

    #[test]
    fn test_export_then_import() {
        let quotes = vec![
            Quote::new("Learn X", "Education").unwrap(),
            Quote::new("Stay positive!", "Motivation").unwrap(),
        ];
        let imported = parse_import(&export_json(&quotes).unwrap()).unwrap();
        assert_eq!(imported, quotes);
    }

    #[test]
    fn test_import_ignores_extra_fields() {
        let quotes =
            parse_import(r#"[{"text":"Stay positive!","category":"Motivation","author":"?"}]"#)
                .unwrap();
        assert_eq!(quotes, vec![Quote::new("Stay positive!", "Motivation").unwrap()]);
    }

    #[test]
    fn test_import_rejects_non_array() {
        let err = parse_import(r#"{"text":"a","category":"b"}"#).unwrap_err();
        assert!(matches!(err, QuoteError::InvalidImport(_)));
    }

    #[test]
    fn test_import_rejects_malformed_json() {
        assert!(matches!(parse_import("[{"), Err(QuoteError::InvalidImport(_))));
    }

    #[test]
    fn test_import_rejects_whole_document_on_bad_item() {
        let err = parse_import(
            r#"[{"text":"fine","category":"ok"},{"text":"missing category"}]"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("item 1"));
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_import_rejects_non_string_and_blank_fields() {
        assert!(parse_import(r#"[{"text":42,"category":"x"}]"#).is_err());
        assert!(parse_import(r#"[{"text":"  ","category":"x"}]"#).is_err());
        assert!(parse_import(r#"["just a string"]"#).is_err());
    }

    #[test]
    fn test_export_to_dir_writes_quotes_json() {
        let dir = tempfile::tempdir().unwrap();
        let quotes = vec![Quote::new("Learn X", "Education").unwrap()];
        let path = export_to_dir(dir.path(), &quotes).unwrap();

        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
        let written = std::fs::read_to_string(path).unwrap();
        assert_eq!(parse_import(&written).unwrap(), quotes);
    }

    #[tokio::test]
    async fn test_read_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("incoming.json");
        std::fs::write(&path, r#"[{"text":"Stay positive!","category":"Motivation"}]"#).unwrap();

        let quotes = read_import_file(&path).await.unwrap();
        assert_eq!(quotes.len(), 1);
    }

    #[tokio::test]
    async fn test_read_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_import_file(&dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(QuoteError::Io(_))));
    }
}
