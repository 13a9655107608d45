use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::model::locale::Language;

use super::http::ServerConfig;

#[derive(Debug, Parser)]
#[command(name = "booka", version)]
#[command(about = "Bilingual book catalog: uncacheable catalog service and storefront preview")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the catalog JSON and static assets (default)
    Serve(ServeArgs),
    /// Print the storefront HTML for a catalog file
    Render(RenderArgs),
    /// Print the JSON Schema of a catalog data file
    Schema,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, default_value_t = 5000)]
    pub port: u16,

    /// Catalog data file (JSON array of books)
    #[arg(long, default_value = "data/books.json")]
    pub data_file: PathBuf,

    /// Directory of static assets
    #[arg(long, default_value = "public")]
    pub public_dir: PathBuf,
}

impl Default for ServeArgs {
    fn default() -> Self {
        let config = ServerConfig::default();
        Self {
            host: config.host,
            port: config.port,
            data_file: config.data_file,
            public_dir: config.public_dir,
        }
    }
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            data_file: args.data_file,
            public_dir: args.public_dir,
            ..ServerConfig::default()
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LangArg {
    En,
    Ar,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::En => Language::En,
            LangArg::Ar => Language::Ar,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
    /// Catalog data file (JSON array of books)
    #[arg(long, default_value = "data/books.json")]
    pub data_file: PathBuf,

    /// Display language
    #[arg(long, value_enum, default_value_t = LangArg::En)]
    pub lang: LangArg,

    /// Search query applied before rendering
    #[arg(long, default_value = "")]
    pub query: String,

    /// Render dark theme
    #[arg(long)]
    pub dark: bool,

    /// Open the purchase dialog for this book id
    #[arg(long)]
    pub buy: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["booka"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(ServerConfig::from(ServeArgs::default()), ServerConfig::default());
    }

    #[test]
    fn serve_args() {
        let cli = Cli::try_parse_from([
            "booka",
            "serve",
            "--port",
            "8080",
            "--host",
            "127.0.0.1",
            "--data-file",
            "/srv/books.json",
        ])
        .unwrap();
        let Some(Command::Serve(args)) = cli.command else {
            panic!("expected serve");
        };
        let config = ServerConfig::from(args);
        assert_eq!(config.port, 8080);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.data_file, PathBuf::from("/srv/books.json"));
        assert_eq!(config.public_dir, PathBuf::from("public"));
    }

    #[test]
    fn render_args() {
        let cli =
            Cli::try_parse_from(["booka", "render", "--lang", "ar", "--query", "dune", "--dark"])
                .unwrap();
        let Some(Command::Render(args)) = cli.command else {
            panic!("expected render");
        };
        assert_eq!(Language::from(args.lang), Language::Ar);
        assert_eq!(args.query, "dune");
        assert!(args.dark);
        assert_eq!(args.buy, None);
    }

    #[test]
    fn reject_unknown_language() {
        assert!(Cli::try_parse_from(["booka", "render", "--lang", "fr"]).is_err());
    }
}
