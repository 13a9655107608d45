use super::model::book::BookRecord;

/// データソースから読んだままのカタログ。`text`は一切加工しない。
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub text: String,
    pub value: serde_json::Value,
}

/// カタログ取得の抽象。Infra層が実装する。
pub trait CatalogRepository {
    type Error: std::error::Error + Send + Sync + 'static;

    /// データソース全体を読む。呼び出しごとに読み直す。
    fn load(&self) -> Result<CatalogSnapshot, Self::Error>;
}

/// 端末ローカルのキー・バリュー保存（ブラウザのlocalStorage相当）。
pub trait PreferenceStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

/// カタログ配信エンドポイントからの取得（クライアント側）。
pub trait CatalogSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<BookRecord>, Self::Error>> + Send;
}
