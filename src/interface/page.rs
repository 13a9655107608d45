//! Storefront page for `GET /`.
//!
//! Query parameters replay UI events against a fresh [`Storefront`]:
//! `lang` / `theme` act as toggles when they differ from the saved
//! preference, `q` is the search input and `buy` opens the purchase modal.

use crate::application::storefront::{Storefront, StorefrontConfig};
use crate::domain::model::book::{BookId, Catalog};
use crate::domain::model::locale::{Language, Theme};
use crate::domain::repository::PreferenceStore;

use super::markup::{self, PageLinks};

/// `GET /` のクエリ文字列から読んだ操作。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub lang: Option<Language>,
    pub theme: Option<Theme>,
    pub query: String,
    pub buy: Option<BookId>,
}

impl PageRequest {
    /// `a=1&b=2` 形式をデコードする。不明なキー・値は無視する。
    pub fn from_query(query: Option<&str>) -> Self {
        let mut request = Self::default();
        for pair in query.unwrap_or_default().split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let Some(value) = decode_form_value(value) else {
                continue;
            };
            match key {
                "lang" => request.lang = value.parse().ok(),
                "theme" => request.theme = value.parse().ok(),
                "q" => request.query = value,
                "buy" if !value.is_empty() => request.buy = Some(parse_book_id(&value)),
                _ => {}
            }
        }
        request
    }
}

/// フォーム送信の値。`+`は空白として扱う。
fn decode_form_value(value: &str) -> Option<String> {
    super::http::percent_decode(&value.replace('+', " "))
}

/// 整数として読めれば数値ID、そうでなければ文字列ID。
pub fn parse_book_id(raw: &str) -> BookId {
    raw.parse::<i64>()
        .map(BookId::Int)
        .unwrap_or_else(|_| BookId::from(raw))
}

/// ストアフロントを組み立てて1ページ描画する。書き込まれた設定はストアごと返す。
pub fn render_storefront<S: PreferenceStore>(
    request: &PageRequest,
    catalog: &Catalog,
    config: StorefrontConfig,
    store: S,
) -> (String, S) {
    let mut storefront = Storefront::new(config, store);
    storefront.load_catalog(catalog.books().to_vec());

    if request.lang.is_some_and(|lang| lang != storefront.language()) {
        storefront.toggle_language();
    }
    if request.theme.is_some_and(|theme| theme != storefront.theme()) {
        storefront.toggle_theme();
    }
    storefront.set_query(&request.query);
    if let Some(id) = &request.buy {
        storefront.open_purchase(id);
    }

    let links = PageLinks::new(storefront.language(), storefront.theme(), storefront.query());
    let html = markup::render_page(
        &storefront.frame(),
        storefront.modal_view().as_ref(),
        &links,
    );
    (html, storefront.into_store())
}
