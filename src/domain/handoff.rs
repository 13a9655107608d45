//! Purchase handoff — modal state machine and messaging deep links.
//!
//! ```text
//! Closed --open(book)--> Open(book) --close / outside click / contact chosen--> Closed
//! ```

use serde::{Deserialize, Serialize};

use super::i18n::purchase_message;
use super::model::book::BookRecord;
use super::model::locale::Language;

pub const WHATSAPP_BASE: &str = "https://wa.me";

/// 購入相談先。`phone`はメッセージングサービス上の受信者ID。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
        }
    }
}

/// 設定された相談先の一覧。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactBook {
    contacts: Vec<Contact>,
}

impl Default for ContactBook {
    fn default() -> Self {
        Self::new(vec![
            Contact::new("Fatma", "966543936890"),
            Contact::new("Diala", "966500114875"),
        ])
    }
}

impl ContactBook {
    pub fn new(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// 名前（大文字小文字を無視）で相談先を引く。
    pub fn find(&self, name: &str) -> Option<&Contact> {
        self.contacts
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

/// JavaScriptの`encodeURIComponent`と同じ規則でパーセントエンコードする。
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// `<base>/<recipient>?text=<encoded message>` 形式のリンク。
pub fn whatsapp_link(base: &str, recipient: &str, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        base.trim_end_matches('/'),
        recipient,
        encode_uri_component(message)
    )
}

/// 外部へ開くリンク。新しいブラウジングコンテキストで開く。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundLink {
    pub url: String,
    pub new_context: bool,
}

/// 書籍と相談先からリンクを作る。書名は表示言語のもの。
pub fn purchase_link(
    book: &BookRecord,
    contact: &Contact,
    lang: Language,
    base: &str,
) -> OutboundLink {
    let message = purchase_message(book.title(lang));
    OutboundLink {
        url: whatsapp_link(base, &contact.phone, &message),
        new_context: true,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState {
    Closed,
    Open { selection: BookRecord },
}

/// 購入モーダル。
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseModal {
    state: ModalState,
}

impl Default for PurchaseModal {
    fn default() -> Self {
        Self {
            state: ModalState::Closed,
        }
    }
}

impl PurchaseModal {
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Open { .. })
    }

    pub fn selection(&self) -> Option<&BookRecord> {
        match &self.state {
            ModalState::Open { selection } => Some(selection),
            ModalState::Closed => None,
        }
    }

    /// 背景スクロールを止めるべきか（モーダル表示中）。
    pub fn scroll_locked(&self) -> bool {
        self.is_open()
    }

    pub fn open(&mut self, book: BookRecord) {
        self.state = ModalState::Open { selection: book };
    }

    /// 閉じるボタン・モーダル外クリック。選択も破棄する。
    pub fn close(&mut self) {
        self.state = ModalState::Closed;
    }

    /// 相談先を選んでリンクを作り、モーダルを閉じる。
    /// 選択中の書籍がなければ何もしない。
    pub fn choose(
        &mut self,
        contact: &Contact,
        lang: Language,
        base: &str,
    ) -> Option<OutboundLink> {
        let link = purchase_link(self.selection()?, contact, lang, base);
        self.close();
        Some(link)
    }
}
