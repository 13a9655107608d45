pub mod http_source;
pub mod json_store;
pub mod preference_store;
