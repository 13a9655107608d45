//! Shared test harness for integration tests.

#![allow(dead_code)]

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use booka::application::storefront::{Storefront, StorefrontConfig};
use booka::domain::model::book::{BookId, BookRecord};
use booka::domain::repository::CatalogSource;
use booka::infra::preference_store::MemoryPreferenceStore;
use booka::interface::http::{self, ServerConfig};

// =============================================================================
// Sample catalog
// =============================================================================

pub fn book(
    id: i64,
    title_en: &str,
    title_ar: &str,
    author_en: &str,
    author_ar: &str,
    price: f64,
) -> BookRecord {
    BookRecord {
        id: BookId::Int(id),
        title_en: title_en.into(),
        title_ar: title_ar.into(),
        author_en: author_en.into(),
        author_ar: author_ar.into(),
        description_en: format!("About {title_en}."),
        description_ar: format!("عن {title_ar}."),
        image: format!("images/{id}.jpg"),
        price,
    }
}

/// 標準的なテスト用カタログ:
/// ```text
/// 1. Dune / كثبان (Herbert / هربرت) 45
/// 2. The Prophet / النبي (Kahlil Gibran / جبران خليل جبران) 30
/// 3. Season of Migration to the North / موسم الهجرة إلى الشمال (Tayeb Salih / الطيب صالح) 52.5
/// ```
pub fn sample_books() -> Vec<BookRecord> {
    vec![
        book(1, "Dune", "كثبان", "Herbert", "هربرت", 45.0),
        book(2, "The Prophet", "النبي", "Kahlil Gibran", "جبران خليل جبران", 30.0),
        book(
            3,
            "Season of Migration to the North",
            "موسم الهجرة إلى الشمال",
            "Tayeb Salih",
            "الطيب صالح",
            52.5,
        ),
    ]
}

pub fn sample_json() -> String {
    serde_json::to_string_pretty(&sample_books()).unwrap()
}

// =============================================================================
// CatalogSource stubs
// =============================================================================

#[derive(Debug, thiserror::Error)]
#[error("stub source unavailable")]
pub struct StubError;

/// 固定のレコードを返すソース。`None`なら失敗する。
pub struct StubSource(pub Option<Vec<BookRecord>>);

impl CatalogSource for StubSource {
    type Error = StubError;

    fn fetch(&self) -> impl Future<Output = Result<Vec<BookRecord>, Self::Error>> + Send {
        let result = self.0.clone().ok_or(StubError);
        async move { result }
    }
}

/// サンプルカタログ読込済みのストアフロント。
pub async fn loaded_storefront(store: MemoryPreferenceStore) -> Storefront<MemoryPreferenceStore> {
    let mut sf = Storefront::new(StorefrontConfig::default(), store);
    sf.fetch_catalog(&StubSource(Some(sample_books()))).await;
    sf
}

// =============================================================================
// Running server
// =============================================================================

/// 一時ディレクトリ上のサーバ。dropで停止する。
pub struct TestServer {
    pub dir: tempfile::TempDir,
    pub addr: SocketAddr,
    pub data_file: PathBuf,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start(books_json: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let public_dir = dir.path().join("public");
        std::fs::create_dir_all(&public_dir).unwrap();
        std::fs::write(public_dir.join("index.html"), "<!doctype html><title>Booka</title>")
            .unwrap();
        let data_file = dir.path().join("books.json");
        std::fs::write(&data_file, books_json).unwrap();

        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            data_file: data_file.clone(),
            public_dir,
            ..ServerConfig::default()
        };
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let (addr, server) = http::bind(&config, async move {
            let _ = rx.await;
        })
        .unwrap();
        tokio::spawn(server);

        Self {
            dir,
            addr,
            data_file,
            shutdown: Some(tx),
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
