use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use drock::gateway::config::{
    BASE_URL_VAR, CONNECT_TIMEOUT_VAR, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS,
    REQUEST_TIMEOUT_VAR,
};
use drock::net::{
    BudgetRange, ContactMethod, Credentials, NewReview, QuoteRequest, Registration, ServiceType, Timeline,
};
use drock::{ApiFailure, ApiGateway, FileCredentialStore, ForbiddenPolicy, GatewayConfig, GatewayError, SiteApi};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

const DEFAULT_TOKEN_FILE: &str = ".drock/credentials.json";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("gateway setup failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error("{0}")]
    Api(#[from] ApiFailure),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "drock", about = "D-Rock Construction site client")]
struct Cli {
    #[arg(long, env = BASE_URL_VAR, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in milliseconds.
    #[arg(long, env = REQUEST_TIMEOUT_VAR, default_value_t = DEFAULT_REQUEST_TIMEOUT_MS)]
    timeout_ms: u64,

    #[arg(long, env = CONNECT_TIMEOUT_VAR, default_value_t = DEFAULT_CONNECT_TIMEOUT_MS)]
    connect_timeout_ms: u64,

    /// Where the session token is kept between runs.
    #[arg(long, env = "DROCK_TOKEN_FILE", default_value = DEFAULT_TOKEN_FILE)]
    token_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the session token.
    Login {
        #[arg(long)]
        email: String,
        /// Prefer `DROCK_PASSWORD`: a value passed as `--password` is
        /// visible to other users in the process list.
        #[arg(long, env = "DROCK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and keep the session token.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Prefer `DROCK_PASSWORD`: a value passed as `--password` is
        /// visible to other users in the process list.
        #[arg(long, env = "DROCK_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the session token.
    Logout,
    /// Show whether a session token is stored.
    Status,
    Reviews(ReviewsCommand),
    Quote(QuoteArgs),
}

#[derive(Args, Debug)]
struct ReviewsCommand {
    #[command(subcommand)]
    command: ReviewsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReviewsSubcommand {
    List {
        /// Print an empty list instead of failing when access is forbidden.
        #[arg(long)]
        forbidden_as_empty: bool,
    },
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        rating: u8,
    },
}

/// Request a quote. No sign-in needed.
#[derive(Args, Debug)]
struct QuoteArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    service: ServiceType,
    #[arg(long)]
    details: String,
    #[arg(long, default_value = "email")]
    contact: ContactMethod,
    #[arg(long)]
    budget: Option<BudgetRange>,
    #[arg(long)]
    timeline: Option<Timeline>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = GatewayConfig::new(cli.base_url)
        .with_request_timeout(Duration::from_millis(cli.timeout_ms))
        .with_connect_timeout(Duration::from_millis(cli.connect_timeout_ms));
    tracing::debug!(base_url = %config.base_url(), token_file = %cli.token_file.display(), "starting");
    let store = Arc::new(FileCredentialStore::new(cli.token_file.clone()));
    let api = SiteApi::new(ApiGateway::new(config, store)?);

    match cli.command {
        Command::Login { email, password } => {
            let session = api.login(&Credentials { email, password }).await?;
            print_json(&json!({ "signed_in": true, "user": session.user }))
        }
        Command::Register { username, email, password } => {
            let session = api.register(&Registration { username, email, password }).await?;
            print_json(&json!({ "signed_in": true, "user": session.user }))
        }
        Command::Logout => {
            api.logout()?;
            print_json(&json!({ "signed_in": false }))
        }
        Command::Status => print_json(&json!({
            "signed_in": api.is_authenticated(),
            "token_file": cli.token_file.display().to_string(),
        })),
        Command::Reviews(reviews) => run_reviews(&api, reviews).await,
        Command::Quote(quote) => run_quote(&api, quote).await,
    }
}

async fn run_reviews(api: &SiteApi, reviews: ReviewsCommand) -> Result<(), CliError> {
    match reviews.command {
        ReviewsSubcommand::List { forbidden_as_empty } => {
            let policy = if forbidden_as_empty { ForbiddenPolicy::TreatAsEmpty } else { ForbiddenPolicy::Fail };
            let listed = api.reviews(policy).await?;
            print_json(&serde_json::to_value(listed)?)
        }
        ReviewsSubcommand::Create { title, content, rating } => {
            let created = api.submit_review(&NewReview { title, content, rating }).await?;
            print_json(&serde_json::to_value(created)?)
        }
    }
}

async fn run_quote(api: &SiteApi, quote: QuoteArgs) -> Result<(), CliError> {
    let request = QuoteRequest {
        name: quote.name,
        email: quote.email,
        phone: quote.phone,
        service_type: quote.service,
        project_details: quote.details,
        preferred_contact_method: quote.contact,
        budget_range: quote.budget,
        timeline: quote.timeline,
    };
    let stored = api.submit_quote(&request).await?;
    print_json(&serde_json::to_value(stored)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
