use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use booka::application::service::CatalogService;
use booka::application::storefront::StorefrontConfig;
use booka::domain::model::book::BookRecord;
use booka::domain::model::locale::Theme;
use booka::infra::json_store::JsonCatalogRepository;
use booka::infra::preference_store::MemoryPreferenceStore;
use booka::interface::cli::{Cli, Command, RenderArgs, ServeArgs};
use booka::interface::page::{self, PageRequest};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => booka::interface::http::run(args.into()).await,
        Command::Render(args) => render(args),
        Command::Schema => {
            let schema = schemars::schema_for!(Vec<BookRecord>);
            println!("{}", serde_json::to_string_pretty(&schema)?);
            Ok(())
        }
    }
}

fn render(args: RenderArgs) -> anyhow::Result<()> {
    let service = CatalogService::new(JsonCatalogRepository::new(&args.data_file));
    let catalog = service
        .catalog()
        .with_context(|| format!("failed to load {}", args.data_file.display()))?;
    let request = PageRequest {
        lang: Some(args.lang.into()),
        theme: Some(if args.dark { Theme::Dark } else { Theme::Light }),
        query: args.query,
        buy: args.buy.as_deref().map(page::parse_book_id),
    };
    let (html, _) = page::render_storefront(
        &request,
        &catalog,
        StorefrontConfig::default(),
        MemoryPreferenceStore::new(),
    );
    print!("{html}");
    Ok(())
}
