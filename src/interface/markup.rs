//! HTML rendering adapter for the storefront view-model.
//!
//! Every interaction is a plain link or GET form back to `/`, so the page
//! works without client-side scripting.

use crate::application::storefront::Frame;
use crate::domain::handoff::encode_uri_component;
use crate::domain::model::book::BookId;
use crate::domain::model::locale::{Language, Theme};
use crate::domain::view::{BookCard, CatalogView, ModalView};

const HEAD: &str = concat!(
    "<head>\n",
    "<meta charset=\"utf-8\">\n",
    "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    "<title>Booka</title>\n",
    "<link rel=\"stylesheet\" href=\"/style.css\">\n",
    "<link rel=\"stylesheet\" ",
    "href=\"https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css\">\n",
    "</head>\n",
);

/// HTMLテキスト・属性値のエスケープ。
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// =============================================================================
// Links
// =============================================================================

/// ページ内リンクの生成元になる現在の表示状態。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    lang: Language,
    theme: Theme,
    query: String,
}

impl PageLinks {
    pub fn new(lang: Language, theme: Theme, query: &str) -> Self {
        Self {
            lang,
            theme,
            query: query.to_string(),
        }
    }

    /// 現在の状態（モーダルは閉じる）。
    pub fn current(&self) -> String {
        href(self.lang, self.theme, &self.query, None)
    }

    /// 言語切替。検索は解除される。
    pub fn toggle_language(&self) -> String {
        href(self.lang.toggled(), self.theme, "", None)
    }

    pub fn toggle_theme(&self) -> String {
        href(self.lang, self.theme.toggled(), &self.query, None)
    }

    pub fn buy(&self, id: &BookId) -> String {
        href(self.lang, self.theme, &self.query, Some(id))
    }
}

fn href(lang: Language, theme: Theme, query: &str, buy: Option<&BookId>) -> String {
    let mut out = format!("/?lang={}&theme={}", lang.code(), theme.as_str());
    if !query.is_empty() {
        out.push_str("&q=");
        out.push_str(&encode_uri_component(query));
    }
    if let Some(id) = buy {
        out.push_str("&buy=");
        out.push_str(&encode_uri_component(&id.to_string()));
    }
    out
}

// =============================================================================
// Catalog
// =============================================================================

fn render_card(card: &BookCard, links: &PageLinks, buf: &mut String) {
    buf.push_str("<div class=\"book-card\">\n");
    buf.push_str(&format!(
        "  <img src=\"{}\" alt=\"{}\" loading=\"lazy\">\n",
        escape(&card.image),
        escape(&card.image_alt)
    ));
    buf.push_str("  <div class=\"book-info\">\n");
    buf.push_str(&format!("    <h3>{}</h3>\n", escape(&card.title)));
    buf.push_str(&format!("    <p class=\"author\">{}</p>\n", escape(&card.author)));
    buf.push_str(&format!(
        "    <p class=\"description\">{}</p>\n",
        escape(&card.description)
    ));
    buf.push_str(&format!("    <p class=\"price\">{}</p>\n", escape(&card.price)));
    buf.push_str(&format!(
        "    <a class=\"buy-btn\" href=\"{}\"><i class=\"fab fa-whatsapp\"></i> {}</a>\n",
        escape(&links.buy(&card.id)),
        escape(&card.buy_label)
    ));
    buf.push_str("  </div>\n</div>\n");
}

/// カタログ表示領域（#book-list の中身）を描画する。
pub fn render_catalog(view: &CatalogView, links: &PageLinks) -> String {
    let mut buf = String::new();
    match view {
        CatalogView::Empty { message } => {
            buf.push_str(&format!(
                "<p class=\"no-results\" style=\"grid-column: 1/-1; text-align: center; padding: 2rem;\">{}</p>\n",
                escape(message)
            ));
        }
        CatalogView::Cards { cards } => {
            for card in cards {
                render_card(card, links, &mut buf);
            }
        }
    }
    buf
}

// =============================================================================
// Modal & page
// =============================================================================

/// 購入モーダル。背景と×ボタンはどちらも閉じた状態へのリンク。
pub fn render_modal(modal: &ModalView, links: &PageLinks) -> String {
    let close = escape(&links.current());
    let mut buf = String::new();
    buf.push_str("<div id=\"purchase-modal\" class=\"modal open\">\n");
    buf.push_str(&format!("  <a class=\"backdrop\" href=\"{close}\"></a>\n"));
    buf.push_str("  <div class=\"modal-content\">\n");
    buf.push_str(&format!("    <a class=\"close\" href=\"{close}\">&times;</a>\n"));
    buf.push_str(&format!(
        "    <h2 id=\"modal-title\">{}</h2>\n    <p id=\"modal-desc\">{}</p>\n",
        escape(modal.title),
        escape(modal.desc)
    ));
    buf.push_str(&format!(
        "    <p class=\"modal-book\">{}</p>\n",
        escape(&modal.book_title)
    ));
    for contact in &modal.contacts {
        buf.push_str(&format!(
            "    <a id=\"contact-{}\" class=\"contact-btn\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>\n",
            escape(&contact.name.to_lowercase()),
            escape(&contact.url),
            escape(&contact.name)
        ));
    }
    buf.push_str("  </div>\n</div>\n");
    buf
}

/// ページ全体（文書の言語・方向・テーマ付き）を描画する。
pub fn render_page(frame: &Frame, modal: Option<&ModalView>, links: &PageLinks) -> String {
    let chrome = &frame.chrome;
    let mut classes = Vec::new();
    if chrome.theme == "dark" {
        classes.push("dark-mode");
    }
    if modal.is_some() {
        classes.push("modal-open");
    }
    let body_class = if classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", classes.join(" "))
    };

    let mut buf = String::new();
    buf.push_str(&format!(
        "<!DOCTYPE html>\n<html lang=\"{}\" dir=\"{}\">\n",
        chrome.lang,
        chrome.dir.as_str()
    ));
    buf.push_str(HEAD);
    buf.push_str(&format!("<body{body_class}>\n<header>\n"));
    buf.push_str(&format!(
        "<a id=\"theme-toggle\" href=\"{}\"><i class=\"fas {}\"></i></a>\n",
        escape(&links.toggle_theme()),
        chrome.theme_icon
    ));
    buf.push_str(&format!(
        "<a id=\"lang-toggle\" href=\"{}\">{}</a>\n</header>\n",
        escape(&links.toggle_language()),
        escape(chrome.lang_btn)
    ));
    buf.push_str(&format!(
        "<section class=\"intro\">\n<h1 id=\"intro-title\">{}</h1>\n<p id=\"intro-text\">{}</p>\n",
        escape(chrome.intro_title),
        escape(chrome.intro_text)
    ));
    buf.push_str(&format!(
        "<a id=\"explore-btn\" href=\"#book-list\">{}</a>\n</section>\n",
        escape(chrome.explore_btn)
    ));
    buf.push_str("<form class=\"search\" method=\"get\" action=\"/\">\n");
    buf.push_str(&format!(
        "<input type=\"hidden\" name=\"lang\" value=\"{}\">\n",
        links.lang.code()
    ));
    buf.push_str(&format!(
        "<input type=\"hidden\" name=\"theme\" value=\"{}\">\n",
        links.theme.as_str()
    ));
    buf.push_str(&format!(
        "<input id=\"search-input\" type=\"search\" name=\"q\" value=\"{}\" placeholder=\"{}\">\n",
        escape(&links.query),
        escape(chrome.search_placeholder)
    ));
    buf.push_str("</form>\n");
    buf.push_str("<div id=\"book-list\">\n");
    buf.push_str(&render_catalog(&frame.catalog, links));
    buf.push_str("</div>\n");
    buf.push_str(&format!(
        "<footer>\n<p id=\"dev-text\">{}</p>\n<p id=\"contact-text\">{}</p>\n</footer>\n",
        escape(chrome.dev_text),
        escape(chrome.contact_text)
    ));
    if let Some(modal) = modal {
        buf.push_str(&render_modal(modal, links));
    }
    buf.push_str("</body>\n</html>\n");
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::handoff::ContactBook;
    use crate::domain::model::book::BookRecord;
    use crate::domain::view::{chrome, purchase_options};
    use insta::assert_snapshot;

    fn card() -> BookCard {
        BookCard {
            id: BookId::Int(1),
            title: "Dune".into(),
            author: "Herbert".into(),
            description: "Spice & <sand>".into(),
            image: "images/dune.jpg".into(),
            image_alt: "Dune".into(),
            price: "Price: 45 SAR".into(),
            buy_label: "Buy Now".into(),
        }
    }

    fn dune_modal() -> ModalView {
        let book = BookRecord {
            id: BookId::Int(1),
            title_en: "Dune".into(),
            title_ar: "كثبان".into(),
            author_en: "Herbert".into(),
            author_ar: "هربرت".into(),
            description_en: "d".into(),
            description_ar: "و".into(),
            image: "images/dune.jpg".into(),
            price: 45.0,
        };
        purchase_options(&book, Language::En, &ContactBook::default(), "https://wa.me")
    }

    fn links() -> PageLinks {
        PageLinks::new(Language::En, Theme::Light, "")
    }

    fn frame(lang: Language, theme: Theme) -> Frame {
        Frame {
            chrome: chrome(lang, theme),
            catalog: CatalogView::Cards {
                cards: vec![card()],
            },
        }
    }

    #[test]
    fn escape_special_characters() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("كثبان"), "كثبان");
    }

    #[test]
    fn links_carry_state() {
        let links = PageLinks::new(Language::Ar, Theme::Dark, "the prophet");
        assert_eq!(links.current(), "/?lang=ar&theme=dark&q=the%20prophet");
        assert_eq!(links.toggle_theme(), "/?lang=ar&theme=light&q=the%20prophet");
        assert_eq!(links.toggle_language(), "/?lang=en&theme=dark");
        assert_eq!(
            links.buy(&BookId::from("b 2")),
            "/?lang=ar&theme=dark&q=the%20prophet&buy=b%202"
        );
    }

    #[test]
    fn snapshot_card_markup() {
        let view = CatalogView::Cards {
            cards: vec![card()],
        };
        let html = render_catalog(&view, &links());
        assert_snapshot!(html.trim_end(), @r###"
        <div class="book-card">
          <img src="images/dune.jpg" alt="Dune" loading="lazy">
          <div class="book-info">
            <h3>Dune</h3>
            <p class="author">Herbert</p>
            <p class="description">Spice &amp; &lt;sand&gt;</p>
            <p class="price">Price: 45 SAR</p>
            <a class="buy-btn" href="/?lang=en&amp;theme=light&amp;buy=1"><i class="fab fa-whatsapp"></i> Buy Now</a>
          </div>
        </div>
        "###);
    }

    #[test]
    fn empty_placeholder_spans_layout() {
        let view = CatalogView::Empty {
            message: "No books found.".into(),
        };
        let html = render_catalog(&view, &links());
        assert!(html.contains("grid-column: 1/-1"));
        assert!(html.contains("No books found."));
    }

    #[test]
    fn snapshot_modal_markup() {
        let html = render_modal(&dune_modal(), &links());
        assert_snapshot!(html.trim_end(), @r###"
        <div id="purchase-modal" class="modal open">
          <a class="backdrop" href="/?lang=en&amp;theme=light"></a>
          <div class="modal-content">
            <a class="close" href="/?lang=en&amp;theme=light">&times;</a>
            <h2 id="modal-title">Complete Your Purchase</h2>
            <p id="modal-desc">Choose a developer to finalize your order via WhatsApp:</p>
            <p class="modal-book">Dune</p>
            <a id="contact-fatma" class="contact-btn" href="https://wa.me/966543936890?text=I%20am%20interested%20in%20%22Dune%22%20book%20and%20want%20to%20buy%20it" target="_blank" rel="noopener">Fatma</a>
            <a id="contact-diala" class="contact-btn" href="https://wa.me/966500114875?text=I%20am%20interested%20in%20%22Dune%22%20book%20and%20want%20to%20buy%20it" target="_blank" rel="noopener">Diala</a>
          </div>
        </div>
        "###);
    }

    #[test]
    fn page_carries_language_direction_and_theme() {
        let links = PageLinks::new(Language::Ar, Theme::Dark, "");
        let page = render_page(&frame(Language::Ar, Theme::Dark), None, &links);
        assert!(page.contains("<html lang=\"ar\" dir=\"rtl\">"));
        assert!(page.contains("<body class=\"dark-mode\">"));
        assert!(page.contains("fa-sun"));
        assert!(page.contains("href=\"/?lang=en&amp;theme=dark\">English</a>"));
        assert!(page.contains("name=\"lang\" value=\"ar\""));
        assert!(!page.contains("purchase-modal"));
    }

    #[test]
    fn open_modal_locks_scroll() {
        let page = render_page(
            &frame(Language::En, Theme::Light),
            Some(&dune_modal()),
            &links(),
        );
        assert!(page.contains("<body class=\"modal-open\">"));
        assert!(page.contains("id=\"purchase-modal\""));
    }
}
