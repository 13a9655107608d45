pub mod error;
pub mod handoff;
pub mod i18n;
pub mod model;
pub mod preferences;
pub mod repository;
pub mod search;
pub mod view;
