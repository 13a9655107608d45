use std::path::{Path, PathBuf};

use crate::domain::repository::{CatalogRepository, CatalogSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSONファイルによるCatalogRepository実装。
/// 1 カタログ = 1 JSONファイル。読むたびにディスクから読み直す。
pub struct JsonCatalogRepository {
    path: PathBuf,
}

impl JsonCatalogRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogRepository for JsonCatalogRepository {
    type Error = JsonStoreError;

    fn load(&self) -> Result<CatalogSnapshot, Self::Error> {
        let text = std::fs::read_to_string(&self.path)?;
        let value = serde_json::from_str(&text)?;
        Ok(CatalogSnapshot { text, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_reads_latest_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        let repo = JsonCatalogRepository::new(file.path());
        assert_eq!(repo.load().unwrap().value, serde_json::json!([]));

        // 書き換えは次の読み込みで即反映される
        std::fs::write(file.path(), r#"[{"id": 1}]"#).unwrap();
        assert_eq!(repo.load().unwrap().value, serde_json::json!([{"id": 1}]));
    }

    #[test]
    fn text_is_kept_verbatim() {
        let text = "[\n  {\"price\": 45.50, \"id\": 1}\n]\n";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{text}").unwrap();
        let snapshot = JsonCatalogRepository::new(file.path()).load().unwrap();
        assert_eq!(snapshot.text, text);
        assert_eq!(snapshot.value[0]["id"], 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonCatalogRepository::new(dir.path().join("books.json"));
        assert!(matches!(repo.load(), Err(JsonStoreError::Io(_))));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"id\": 1,").unwrap();
        let repo = JsonCatalogRepository::new(file.path());
        assert!(matches!(repo.load(), Err(JsonStoreError::Json(_))));
    }
}
