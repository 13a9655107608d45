//! Catalog Service (HTTP) for booka
//!
//! hyper server <-> application::CatalogService + static files under the public root
//!
//! Routes: `GET /books` (alias `/api/books`), `GET /` (server-rendered storefront)
//! and static assets, 404 otherwise. Every response except 404 carries the
//! no-cache header set.

use std::convert::Infallible;
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use hyper::header::{self, HeaderName, HeaderValue};
use hyper::server::conn::AddrStream;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};

use crate::application::service::{CatalogDocument, CatalogService};
use crate::application::storefront::StorefrontConfig;
use crate::infra::json_store::JsonCatalogRepository;
use crate::infra::preference_store::CookiePreferenceStore;

use super::page::{self, PageRequest};

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub data_file: PathBuf,
    pub public_dir: PathBuf,
    pub storefront: StorefrontConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
            data_file: PathBuf::from("data/books.json"),
            public_dir: PathBuf::from("public"),
            storefront: StorefrontConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Public entry points
// =============================================================================

/// サーバを起動し、Ctrl-Cで停止するまで待つ。
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let (addr, server) = bind(&config, shutdown_signal())?;
    tracing::info!(
        %addr,
        data_file = %config.data_file.display(),
        public_dir = %config.public_dir.display(),
        "catalog service listening"
    );
    server.await?;
    tracing::info!("catalog service stopped");
    Ok(())
}

/// ソケットをbindし、実際のアドレスとサーバFutureを返す。ポート0ならOSが割り当てる。
pub fn bind(
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<(SocketAddr, impl Future<Output = Result<(), hyper::Error>> + Send)> {
    let app = Arc::new(CatalogServer::new(config));
    let make_svc = make_service_fn(move |_conn: &AddrStream| {
        let app = app.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req| {
                let app = app.clone();
                async move { Ok::<_, Infallible>(app.handle(req).await) }
            }))
        }
    });
    let server = Server::try_bind(&config.socket_addr())?.serve(make_svc);
    let addr = server.local_addr();
    Ok((addr, server.with_graceful_shutdown(shutdown)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
}

// =============================================================================
// Request handling
// =============================================================================

/// ブラウザ・プロキシ・CDNのどの層にも保存させないためのヘッダ群。
pub const NO_CACHE_HEADERS: [(&str, &str); 4] = [
    (
        "cache-control",
        "no-store, no-cache, must-revalidate, proxy-revalidate",
    ),
    ("pragma", "no-cache"),
    ("expires", "0"),
    ("surrogate-control", "no-store"),
];

pub struct CatalogServer {
    service: Arc<CatalogService<JsonCatalogRepository>>,
    public_dir: PathBuf,
    storefront: StorefrontConfig,
}

impl CatalogServer {
    pub fn new(config: &ServerConfig) -> Self {
        let repo = JsonCatalogRepository::new(&config.data_file);
        Self {
            service: Arc::new(CatalogService::new(repo)),
            public_dir: config.public_dir.clone(),
            storefront: config.storefront.clone(),
        }
    }

    pub async fn handle(&self, req: Request<Body>) -> Response<Body> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let head_only = method == Method::HEAD;

        let mut response = if method == Method::GET || head_only {
            match path.as_str() {
                "/books" | "/api/books" => self.books().await,
                "/" => {
                    let request = PageRequest::from_query(req.uri().query());
                    self.storefront_page(request, cookie_store(&req)).await
                }
                _ => self.static_asset(&path).await,
            }
        } else {
            not_found()
        };

        if head_only {
            *response.body_mut() = Body::empty();
        }
        tracing::info!(%method, %path, status = response.status().as_u16(), "request");
        response
    }

    /// データファイルを読み、検証する。失敗はここでログに残す。
    async fn load_document(&self) -> Option<CatalogDocument> {
        let service = self.service.clone();
        match tokio::task::spawn_blocking(move || service.load()).await {
            Ok(Ok(doc)) => Some(doc),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "failed to load catalog");
                None
            }
            Err(e) => {
                tracing::error!(error = %e, "catalog load task failed");
                None
            }
        }
    }

    /// カタログ全体をデータファイルのバイト列のまま返す。
    /// 読み込み・検証に失敗したら500（部分的なデータは返さない）。
    async fn books(&self) -> Response<Body> {
        let Some(doc) = self.load_document().await else {
            return catalog_error();
        };
        tracing::debug!(books = doc.catalog.len(), "catalog served");
        let mut response = Response::new(Body::from(doc.raw));
        set_content_type(&mut response, "application/json; charset=utf-8");
        apply_no_cache(&mut response);
        response
    }

    /// サーバ側で描画したストアフロント。カタログが読めなければ空のまま描画する。
    async fn storefront_page(
        &self,
        request: PageRequest,
        store: CookiePreferenceStore,
    ) -> Response<Body> {
        let catalog = self
            .load_document()
            .await
            .map(|doc| doc.catalog)
            .unwrap_or_default();
        let (html, store) = page::render_storefront(
            &request,
            &catalog,
            self.storefront.clone(),
            store,
        );

        let mut response = Response::new(Body::from(html));
        set_content_type(&mut response, "text/html; charset=utf-8");
        apply_no_cache(&mut response);
        for cookie in store.set_cookie_headers() {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().append(header::SET_COOKIE, value);
                }
                Err(e) => tracing::warn!(error = %e, "skipping invalid cookie"),
            }
        }
        response
    }

    async fn static_asset(&self, request_path: &str) -> Response<Body> {
        let Some(relative) = sanitize_path(request_path) else {
            return not_found();
        };
        let full = self.public_dir.join(relative);
        match tokio::fs::metadata(&full).await {
            Ok(meta) if meta.is_file() => {}
            _ => return not_found(),
        }
        match tokio::fs::read(&full).await {
            Ok(bytes) => {
                let mut response = Response::new(Body::from(bytes));
                set_content_type(&mut response, content_type(&full));
                apply_no_cache(&mut response);
                response
            }
            Err(e) => {
                tracing::debug!(path = %full.display(), error = %e, "static asset unavailable");
                not_found()
            }
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn apply_no_cache(response: &mut Response<Body>) {
    let headers = response.headers_mut();
    for (name, value) in NO_CACHE_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

fn set_content_type(response: &mut Response<Body>, value: &'static str) {
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
}

/// リクエストのクッキーを設定ストアとして読む。
fn cookie_store(req: &Request<Body>) -> CookiePreferenceStore {
    let header = req
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    CookiePreferenceStore::from_header(&header)
}

fn not_found() -> Response<Body> {
    let mut response = Response::new(Body::from("404 Not Found"));
    *response.status_mut() = StatusCode::NOT_FOUND;
    set_content_type(&mut response, "text/plain; charset=utf-8");
    response
}

fn catalog_error() -> Response<Body> {
    let body = serde_json::json!({ "error": "Failed to read catalog" }).to_string();
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    set_content_type(&mut response, "application/json; charset=utf-8");
    apply_no_cache(&mut response);
    response
}

/// `%XX` をデコードする。不正なエスケープやUTF-8でなければNone。
pub(crate) fn percent_decode(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = s.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}

/// リクエストパスをpublic配下の相対パスに変換する。ルート外へ出るものはNone。
fn sanitize_path(request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode(request_path)?;
    let mut relative = PathBuf::new();
    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment.contains('\\') || segment.contains('\0') {
            return None;
        }
        let mut components = Path::new(segment).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(part)), None) => relative.push(part),
            _ => return None,
        }
    }
    Some(relative)
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

// =============================================================================
// Tests
// =============================================================================
