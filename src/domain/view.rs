//! Renderer projection — `(records, language) -> view-model`.
//!
//! The view-model is display-agnostic; `interface::markup` turns it into HTML.

use serde::Serialize;

use super::handoff::{purchase_link, ContactBook};
use super::i18n::{price_line, strings};
use super::model::book::{BookId, BookRecord};
use super::model::locale::{Language, TextDirection, Theme};

/// 書籍カード1枚分。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookCard {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
    pub image: String,
    /// 画像の代替テキスト（表示言語の書名）
    pub image_alt: String,
    pub price: String,
    pub buy_label: String,
}

/// カタログ表示領域の内容。毎回全置換される。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogView {
    /// 該当なし。レイアウト全幅の1メッセージ。
    Empty { message: String },
    Cards { cards: Vec<BookCard> },
}

impl CatalogView {
    pub fn cards(&self) -> &[BookCard] {
        match self {
            CatalogView::Empty { .. } => &[],
            CatalogView::Cards { cards } => cards,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CatalogView::Empty { .. })
    }
}

/// カタログ以外のUI（ヘッダ・導入文・モーダル等）の表示内容。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChromeView {
    pub lang: &'static str,
    pub dir: TextDirection,
    pub theme: &'static str,
    pub theme_icon: &'static str,
    pub intro_title: &'static str,
    pub intro_text: &'static str,
    pub explore_btn: &'static str,
    pub search_placeholder: &'static str,
    pub dev_text: &'static str,
    pub contact_text: &'static str,
    pub modal_title: &'static str,
    pub modal_desc: &'static str,
    pub lang_btn: &'static str,
}

/// 購入モーダルの相談先1件。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactLink {
    pub name: String,
    pub url: String,
}

/// 開いている購入モーダルの表示内容。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModalView {
    pub title: &'static str,
    pub desc: &'static str,
    pub book_title: String,
    pub contacts: Vec<ContactLink>,
}

pub fn project_card(book: &BookRecord, lang: Language) -> BookCard {
    let title = book.title(lang).to_string();
    BookCard {
        id: book.id.clone(),
        image_alt: title.clone(),
        title,
        author: book.author(lang).to_string(),
        description: book.description(lang).to_string(),
        image: book.image.clone(),
        price: price_line(lang, book.price),
        buy_label: strings(lang).buy_btn.to_string(),
    }
}

/// レコード列を表示用モデルに射影する。
pub fn project<'a, I>(records: I, lang: Language) -> CatalogView
where
    I: IntoIterator<Item = &'a BookRecord>,
{
    let cards: Vec<BookCard> = records
        .into_iter()
        .map(|book| project_card(book, lang))
        .collect();
    if cards.is_empty() {
        CatalogView::Empty {
            message: strings(lang).no_results.to_string(),
        }
    } else {
        CatalogView::Cards { cards }
    }
}

/// 選択中の書籍について、相談先ごとのリンクを並べる。
pub fn purchase_options(
    book: &BookRecord,
    lang: Language,
    contacts: &ContactBook,
    base: &str,
) -> ModalView {
    let t = strings(lang);
    ModalView {
        title: t.modal_title,
        desc: t.modal_desc,
        book_title: book.title(lang).to_string(),
        contacts: contacts
            .contacts()
            .iter()
            .map(|contact| ContactLink {
                name: contact.name.clone(),
                url: purchase_link(book, contact, lang, base).url,
            })
            .collect(),
    }
}

pub fn chrome(lang: Language, theme: Theme) -> ChromeView {
    let t = strings(lang);
    ChromeView {
        lang: lang.code(),
        dir: lang.direction(),
        theme: theme.as_str(),
        theme_icon: theme.icon(),
        intro_title: t.intro_title,
        intro_text: t.intro_text,
        explore_btn: t.explore_btn,
        search_placeholder: t.search_placeholder,
        dev_text: t.dev_text,
        contact_text: t.contact_text,
        modal_title: t.modal_title,
        modal_desc: t.modal_desc,
        lang_btn: t.lang_btn,
    }
}

impl ChromeView {
    pub fn direction(&self) -> TextDirection {
        self.dir
    }
}
