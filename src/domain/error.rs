use super::model::book::BookId;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("catalog document must be a JSON array")]
    NotAnArray,

    #[error("record {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("record {index}: field `{field}` must not be blank")]
    BlankField { index: usize, field: &'static str },

    #[error("record {index}: invalid price {price}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("duplicate book id: {0}")]
    DuplicateId(BookId),

    #[error("unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("unknown theme: {0}")]
    UnknownTheme(String),
}
