//! Storefront controller — the single owner of client-side state.
//!
//! Every UI event maps to one synchronous `&mut self` method; the only
//! asynchronous step is the initial catalog fetch.

use crate::domain::handoff::{ContactBook, OutboundLink, PurchaseModal, WHATSAPP_BASE};
use crate::domain::model::book::{BookId, BookRecord, Catalog};
use crate::domain::model::locale::{Language, Theme};
use crate::domain::preferences::Preferences;
use crate::domain::repository::{CatalogSource, PreferenceStore};
use crate::domain::search;
use crate::domain::view::{self, CatalogView, ChromeView, ModalView};

/// ストアフロントの設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub contacts: ContactBook,
    /// メッセージングサービスのベースURL
    pub messaging_base: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            contacts: ContactBook::default(),
            messaging_base: WHATSAPP_BASE.to_string(),
        }
    }
}

/// 画面全体の表示内容。
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub chrome: ChromeView,
    pub catalog: CatalogView,
}

/// クリック位置（モーダル外クリックで閉じる判定用）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// モーダル背景（外側）
    Backdrop,
    /// モーダル本体
    Surface,
}

pub struct Storefront<S: PreferenceStore> {
    config: StorefrontConfig,
    store: S,
    prefs: Preferences,
    catalog: Catalog,
    query: String,
    modal: PurchaseModal,
}

impl<S: PreferenceStore> Storefront<S> {
    /// 保存済み設定を復元してから初期化する（最初の描画前に適用）。
    pub fn new(config: StorefrontConfig, store: S) -> Self {
        let prefs = Preferences::restore(&store);
        tracing::debug!(theme = %prefs.theme, lang = %prefs.language, "preferences restored");
        Self {
            config,
            store,
            prefs,
            catalog: Catalog::default(),
            query: String::new(),
            modal: PurchaseModal::default(),
        }
    }

    pub fn preferences(&self) -> Preferences {
        self.prefs
    }

    pub fn language(&self) -> Language {
        self.prefs.language
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn modal(&self) -> &PurchaseModal {
        &self.modal
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// ストアを手放す（再起動を模したテスト等で使う）。
    pub fn into_store(self) -> S {
        self.store
    }

    // --- catalog ---

    /// カタログを1回だけ取得する。失敗時はログのみで空のまま（再試行しない）。
    pub async fn fetch_catalog<C: CatalogSource>(&mut self, source: &C) -> CatalogView {
        match source.fetch().await {
            Ok(records) => self.load_catalog(records),
            Err(e) => tracing::warn!(error = %e, "failed to fetch catalog"),
        }
        self.render()
    }

    /// 取得済みレコードを格納する。検証に失敗したら空のまま。
    pub fn load_catalog(&mut self, records: Vec<BookRecord>) {
        match Catalog::new(records) {
            Ok(catalog) => {
                tracing::info!(books = catalog.len(), "catalog loaded");
                self.catalog = catalog;
            }
            Err(e) => tracing::warn!(error = %e, "rejected catalog"),
        }
    }

    /// 現在のクエリでフルカタログを絞り込み、表示モデルを作る。
    pub fn render(&self) -> CatalogView {
        let matches = search::filter(self.catalog.books(), &self.query);
        view::project(matches, self.prefs.language)
    }

    pub fn chrome(&self) -> ChromeView {
        view::chrome(self.prefs.language, self.prefs.theme)
    }

    pub fn frame(&self) -> Frame {
        Frame {
            chrome: self.chrome(),
            catalog: self.render(),
        }
    }

    /// 検索入力。絞り込みは常にフルカタログに対して行う。
    pub fn set_query(&mut self, query: &str) -> CatalogView {
        self.query = query.to_string();
        self.render()
    }

    // --- preferences ---

    pub fn toggle_theme(&mut self) -> ChromeView {
        self.prefs.theme = self.prefs.theme.toggled();
        self.prefs.persist_theme(&mut self.store);
        self.chrome()
    }

    /// 言語切替。UI文字列を切り替え、検索を解除してフルカタログを再描画する。
    pub fn toggle_language(&mut self) -> Frame {
        self.prefs.language = self.prefs.language.toggled();
        self.prefs.persist_language(&mut self.store);
        self.query.clear();
        self.frame()
    }

    // --- purchase handoff ---

    /// 購入ボタン。IDが見つからなければ開かない。
    pub fn open_purchase(&mut self, id: &BookId) -> bool {
        match self.catalog.get(id) {
            Some(book) => {
                self.modal.open(book.clone());
                true
            }
            None => {
                tracing::debug!(%id, "buy action for unknown book");
                false
            }
        }
    }

    /// 開いている購入モーダルの表示内容。閉じていればNone。
    pub fn modal_view(&self) -> Option<ModalView> {
        let book = self.modal.selection()?;
        Some(view::purchase_options(
            book,
            self.prefs.language,
            &self.config.contacts,
            &self.config.messaging_base,
        ))
    }

    pub fn close_purchase(&mut self) {
        self.modal.close();
    }

    pub fn click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Backdrop {
            self.modal.close();
        }
    }

    /// 相談先を選ぶ。未選択・不明な相談先なら何もしない。
    pub fn choose_contact(&mut self, name: &str) -> Option<OutboundLink> {
        let Some(contact) = self.config.contacts.find(name) else {
            tracing::debug!(name, "unknown contact");
            return None;
        };
        let link = self
            .modal
            .choose(contact, self.prefs.language, &self.config.messaging_base)?;
        tracing::info!(contact = %contact.name, "purchase handed off");
        Some(link)
    }
}
