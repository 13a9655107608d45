use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::locale::Language;
use crate::domain::error::DomainError;

/// 書籍ID。データファイル上は整数または文字列。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum BookId {
    Int(i64),
    Text(String),
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookId::Int(n) => write!(f, "{n}"),
            BookId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for BookId {
    fn from(n: i64) -> Self {
        BookId::Int(n)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        BookId::Text(s.to_string())
    }
}

/// 書籍レコード。データファイルの1要素と同じフラットな形。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BookRecord {
    pub id: BookId,
    pub title_en: String,
    pub title_ar: String,
    pub author_en: String,
    pub author_ar: String,
    pub description_en: String,
    pub description_ar: String,
    /// 画像のURLまたはpublic配下のパス
    pub image: String,
    pub price: f64,
}

impl BookRecord {
    pub fn title(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.title_en,
            Language::Ar => &self.title_ar,
        }
    }

    pub fn author(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.author_en,
            Language::Ar => &self.author_ar,
        }
    }

    pub fn description(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.description_en,
            Language::Ar => &self.description_ar,
        }
    }

    /// 必須フィールドの検証。`index`はエラーメッセージ用の位置。
    pub fn validate(&self, index: usize) -> Result<(), DomainError> {
        let fields = [
            ("title_en", &self.title_en),
            ("title_ar", &self.title_ar),
            ("author_en", &self.author_en),
            ("author_ar", &self.author_ar),
            ("description_en", &self.description_en),
            ("description_ar", &self.description_ar),
        ];
        if let Some(&(field, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(DomainError::BlankField { index, field });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DomainError::InvalidPrice {
                index,
                price: self.price,
            });
        }
        Ok(())
    }
}

/// 検証済みカタログ。順序はデータファイルのまま保持する。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    books: Vec<BookRecord>,
}

impl Catalog {
    /// レコード列を検証してCatalogを作る。1件でも不正なら全体を拒否する。
    pub fn new(books: Vec<BookRecord>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(books.len());
        for (index, book) in books.iter().enumerate() {
            book.validate(index)?;
            if !seen.insert(&book.id) {
                return Err(DomainError::DuplicateId(book.id.clone()));
            }
        }
        Ok(Self { books })
    }

    /// JSON値（配列）からCatalogを作る。
    pub fn from_value(value: &serde_json::Value) -> Result<Self, DomainError> {
        let items = value.as_array().ok_or(DomainError::NotAnArray)?;
        let books = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                BookRecord::deserialize(item).map_err(|e| DomainError::InvalidRecord {
                    index,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(books)
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn get(&self, id: &BookId) -> Option<&BookRecord> {
        self.books.iter().find(|b| &b.id == id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
