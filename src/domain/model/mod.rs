pub mod book;
pub mod locale;
