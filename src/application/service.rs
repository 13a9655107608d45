use crate::domain::model::book::Catalog;
use crate::domain::repository::CatalogRepository;

use super::error::AppError;

/// 検証済みのカタログ文書。`raw`はデータファイルの内容そのもの（キー順・数値表記とも）。
#[derive(Debug, Clone)]
pub struct CatalogDocument {
    pub raw: String,
    pub catalog: Catalog,
}

/// カタログ配信のユースケース。
/// キャッシュは持たず、毎回データソースを読み直す。
pub struct CatalogService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// データソースを読み、全レコードを検証する。1件でも不正なら全体がエラー。
    pub fn load(&self) -> Result<CatalogDocument, AppError> {
        let snapshot = self
            .repo
            .load()
            .map_err(|e| AppError::Storage(Box::new(e)))?;
        let catalog = Catalog::from_value(&snapshot.value)?;
        Ok(CatalogDocument {
            raw: snapshot.text,
            catalog,
        })
    }

    pub fn catalog(&self) -> Result<Catalog, AppError> {
        self.load().map(|doc| doc.catalog)
    }
}
