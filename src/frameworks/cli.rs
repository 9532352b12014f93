use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use crate::domain::{ApiError, Moodboard, MoodboardImage, SearchMode, SessionError};
use crate::frameworks::config::{ClientConfig, ConfigError};
use crate::frameworks::telemetry::init_tracing;
use crate::interface_adapters::clients::ApiClient;
use crate::interface_adapters::protocol::{FeedbackSubmission, ProductFilters, SignupRequest};
use crate::interface_adapters::state::{FileSessionStore, LogRedirect, SystemClock};
use crate::use_cases::{AnalyticsTracker, AuthSession, ChatAssistant, MultimodalSearch, SearchInput};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "lookbook", about = "Fashion-discovery API client")]
struct Cli {
    /// Overrides LOOKBOOK_API_URL and the config file.
    #[arg(long)]
    base_url: Option<String>,

    /// Surface API failures instead of answering with mock data.
    #[arg(long)]
    no_mock: bool,

    #[arg(long)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether the API answers its health probe.
    Health,
    #[command(subcommand)]
    Search(SearchCommand),
    #[command(subcommand)]
    Products(ProductsCommand),
    Login {
        email: String,
        #[arg(long, env = "LOOKBOOK_PASSWORD")]
        password: String,
    },
    Signup {
        name: String,
        email: String,
        #[arg(long, env = "LOOKBOOK_PASSWORD")]
        password: String,
    },
    Logout,
    /// Print the signed-in user, refreshing the cached profile.
    Whoami,
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    #[command(subcommand)]
    Moodboard(MoodboardCommand),
    #[command(subcommand)]
    Feedback(FeedbackCommand),
    #[command(subcommand)]
    Analytics(AnalyticsCommand),
    Chat {
        message: String,
    },
    /// Generate style tags for a catalog product.
    Tags {
        product_id: String,
    },
    AnalyzeStyle {
        image_url: String,
    },
}

#[derive(Subcommand, Debug)]
enum SearchCommand {
    Text {
        query: String,
    },
    Image {
        #[arg(required = true)]
        images: Vec<String>,
    },
    Similar {
        product_id: String,
    },
    Combined(CombinedArgs),
}

#[derive(Args, Debug)]
struct CombinedArgs {
    #[arg(long, default_value = "")]
    text: String,
    #[arg(long = "image")]
    images: Vec<String>,
    #[arg(long, default_value = "")]
    pinterest: String,
    #[arg(long, value_enum, default_value_t = ModeArg::Text)]
    mode: ModeArg,
    #[arg(long)]
    limit: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Text,
    Image,
    Pinterest,
    Combined,
}

impl From<ModeArg> for SearchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Text => SearchMode::Text,
            ModeArg::Image => SearchMode::Image,
            ModeArg::Pinterest => SearchMode::Pinterest,
            ModeArg::Combined => SearchMode::Combined,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ProductsCommand {
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        retailer: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    Get {
        id: String,
    },
    Like {
        id: String,
    },
    Dislike {
        id: String,
    },
    Trending,
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    List,
    Add { product_id: String },
    Remove { product_id: String },
}

#[derive(Subcommand, Debug)]
enum MoodboardCommand {
    Save {
        name: String,
        /// Update an existing board instead of creating one.
        #[arg(long)]
        id: Option<String>,
        /// Image URL; repeat in priority order. Only the first five are kept.
        #[arg(long = "image")]
        images: Vec<String>,
    },
    List,
    Get {
        id: String,
    },
    Delete {
        id: String,
    },
    Search {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum FeedbackCommand {
    Submit {
        message: String,
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: Option<u8>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        product_id: Option<String>,
    },
    List,
}

#[derive(Subcommand, Debug)]
enum AnalyticsCommand {
    Track {
        event: String,
        /// Event field as key=value; values that parse as JSON are sent typed.
        #[arg(long = "data", value_parser = parse_key_value)]
        data: Vec<(String, String)>,
    },
    PageView {
        path: String,
        #[arg(long, default_value = "")]
        query: String,
    },
    Trends,
    Insights,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

fn event_data(pairs: Vec<(String, String)>) -> Map<String, Value> {
    pairs
        .into_iter()
        .map(|(key, raw)| {
            let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
            (key, value)
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

// Env-backed flags and RUST_LOG must see `.env`, so it is loaded before parsing.
// `env_file` replaces the default `.env` lookup.
fn parse_args<I, T>(env_file: Option<&Path>, args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let _ = match env_file {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    Cli::try_parse_from(args)
}

pub async fn run() -> ExitCode {
    let cli = match parse_args(None, std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };
    init_tracing();

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn build_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::load()?;
    if let Some(url) = &cli.base_url {
        config.api_base_url = url.clone();
    }
    if cli.no_mock {
        config.mock_fallback = false;
    }
    if let Some(path) = &cli.session_file {
        config.session_file = path.clone();
    }
    Ok(config)
}

async fn execute(cli: Cli) -> Result<(), CliError> {
    let config = build_config(&cli)?;
    let options = config.client_options()?;
    tracing::debug!(
        base_url = %options.base_url,
        mock_fallback = options.mock_fallback,
        "api client configured"
    );

    let store = Arc::new(FileSessionStore::new(config.session_file.clone()));
    tracing::debug!(session_file = %store.path().display(), "using file session store");
    let client = ApiClient::new(options, store, Arc::new(LogRedirect))?;

    match cli.command {
        Command::Health => {
            let available = client.is_api_available().await;
            print_json(&serde_json::json!({ "available": available }))
        }
        Command::Search(command) => search(&client, command).await,
        Command::Products(command) => products(&client, command).await,
        Command::Login { email, password } => {
            let session = AuthSession::new(client);
            print_json(&session.login(&email, &password).await?)
        }
        Command::Signup {
            name,
            email,
            password,
        } => {
            let session = AuthSession::new(client);
            let request = SignupRequest {
                name,
                email,
                password,
            };
            print_json(&session.signup(&request).await?)
        }
        Command::Logout => {
            AuthSession::new(client).logout().await?;
            Ok(())
        }
        Command::Whoami => {
            let session = AuthSession::new(client);
            print_json(&session.restore().await)
        }
        Command::Favorites(command) => favorites(&client, command).await,
        Command::Moodboard(command) => moodboard(&client, command).await,
        Command::Feedback(command) => feedback(&client, command).await,
        Command::Analytics(command) => {
            analytics(&client, config.analytics_enabled, command).await
        }
        Command::Chat { message } => {
            let session = AuthSession::new(client.clone());
            let user = session.restore().await;
            let mut chat = ChatAssistant::new(client);
            print_json(&chat.send(&message, user.as_ref()).await)
        }
        Command::Tags { product_id } => {
            let product = client.products().get(&product_id).await?;
            print_json(&client.ai().generate_tags(&product).await?)
        }
        Command::AnalyzeStyle { image_url } => {
            print_json(&client.ai().analyze_style(&image_url).await?)
        }
    }
}

async fn search(client: &ApiClient, command: SearchCommand) -> Result<(), CliError> {
    let api = client.search();
    match command {
        SearchCommand::Text { query } => print_json(&api.text(&query).await?),
        SearchCommand::Image { images } => print_json(&api.image(&images).await?),
        SearchCommand::Similar { product_id } => print_json(&api.similar(&product_id).await?),
        SearchCommand::Combined(args) => {
            let input = SearchInput {
                text: args.text,
                images: args.images,
                pinterest_url: args.pinterest,
                mode: args.mode.into(),
                filters: None,
                limit: args.limit,
            };
            print_json(&MultimodalSearch::new(client.clone()).execute(input).await?)
        }
    }
}

async fn products(client: &ApiClient, command: ProductsCommand) -> Result<(), CliError> {
    let api = client.products();
    match command {
        ProductsCommand::List {
            category,
            retailer,
            min_price,
            max_price,
            sort,
            limit,
            offset,
        } => {
            let filters = ProductFilters {
                category,
                retailer,
                min_price,
                max_price,
                sort,
                limit,
                offset,
            };
            print_json(&api.list(&filters).await?)
        }
        ProductsCommand::Get { id } => print_json(&api.get(&id).await?),
        ProductsCommand::Like { id } => print_json(&api.like(&id).await?),
        ProductsCommand::Dislike { id } => print_json(&api.dislike(&id).await?),
        ProductsCommand::Trending => print_json(&api.trending().await?),
    }
}

async fn favorites(client: &ApiClient, command: FavoritesCommand) -> Result<(), CliError> {
    let api = client.user();
    match command {
        FavoritesCommand::List => print_json(&api.favorites().await?),
        FavoritesCommand::Add { product_id } => print_json(&api.add_favorite(&product_id).await?),
        FavoritesCommand::Remove { product_id } => {
            print_json(&api.remove_favorite(&product_id).await?)
        }
    }
}

async fn moodboard(client: &ApiClient, command: MoodboardCommand) -> Result<(), CliError> {
    let api = client.moodboard();
    match command {
        MoodboardCommand::Save { name, id, images } => {
            let mut board = Moodboard::new(id.unwrap_or_default(), name);
            let requested = images.len();
            let added = board.add_images(images.into_iter().enumerate().map(|(i, url)| {
                MoodboardImage {
                    id: format!("img-{}", i + 1),
                    url,
                }
            }));
            if added < requested {
                tracing::warn!(requested, added, "moodboard is full; extra images dropped");
            }
            print_json(&api.save(&board).await?)
        }
        MoodboardCommand::List => print_json(&api.list().await?),
        MoodboardCommand::Get { id } => print_json(&api.get(&id).await?),
        MoodboardCommand::Delete { id } => print_json(&api.delete(&id).await?),
        MoodboardCommand::Search { id } => print_json(&api.search(&id).await?),
    }
}

async fn feedback(client: &ApiClient, command: FeedbackCommand) -> Result<(), CliError> {
    let api = client.feedback();
    match command {
        FeedbackCommand::Submit {
            message,
            rating,
            category,
            product_id,
        } => {
            let submission = FeedbackSubmission {
                message,
                rating,
                category,
                product_id,
            };
            print_json(&api.submit(&submission).await?)
        }
        FeedbackCommand::List => print_json(&api.list().await?),
    }
}

async fn analytics(
    client: &ApiClient,
    enabled: bool,
    command: AnalyticsCommand,
) -> Result<(), CliError> {
    match command {
        AnalyticsCommand::Track { event, data } => {
            let tracker = AnalyticsTracker::new(client.clone(), SystemClock, enabled);
            let accepted = tracker.track(&event, event_data(data)).await;
            print_json(&serde_json::json!({ "accepted": accepted }))
        }
        AnalyticsCommand::PageView { path, query } => {
            let tracker = AnalyticsTracker::new(client.clone(), SystemClock, enabled);
            let accepted = tracker.page_view(&path, &query).await;
            print_json(&serde_json::json!({ "accepted": accepted }))
        }
        AnalyticsCommand::Trends => print_json(&client.analytics().search_trends().await?),
        AnalyticsCommand::Insights => print_json(&client.analytics().user_insights().await?),
    }
}
