use std::future::Future;

use hyper::client::HttpConnector;
use hyper::{Body, Client, StatusCode, Uri};

use crate::domain::model::book::BookRecord;
use crate::domain::repository::CatalogSource;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid catalog URL: {0}")]
    InvalidUri(#[from] hyper::http::uri::InvalidUri),
    #[error("HTTP error: {0}")]
    Http(#[from] hyper::Error),
    #[error("unexpected status: {0}")]
    Status(StatusCode),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// `GET /books` を1回だけ叩くクライアント。リトライ・タイムアウトなし。
#[derive(Clone)]
pub struct HttpCatalogSource {
    client: Client<HttpConnector, Body>,
    uri: Uri,
}

impl HttpCatalogSource {
    /// `base`はサーバのオリジン（例: `http://127.0.0.1:5000`）。
    pub fn new(base: &str) -> Result<Self, FetchError> {
        let uri: Uri = format!("{}/books", base.trim_end_matches('/')).parse()?;
        Ok(Self {
            client: Client::new(),
            uri,
        })
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }
}

impl CatalogSource for HttpCatalogSource {
    type Error = FetchError;

    fn fetch(&self) -> impl Future<Output = Result<Vec<BookRecord>, Self::Error>> + Send {
        let client = self.client.clone();
        let uri = self.uri.clone();
        async move {
            let response = client.get(uri).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status));
            }
            let bytes = hyper::body::to_bytes(response.into_body()).await?;
            Ok(serde_json::from_slice(&bytes)?)
        }
    }
}
