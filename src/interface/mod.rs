pub mod cli;
pub mod http;
pub mod markup;
pub mod page;
