// src/main.rs

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use recruit_admin::api::{HttpRecruitingApi, RecruitingApi};
use recruit_admin::config::Config;
use recruit_admin::definition::{self, TestDefinition};
use recruit_admin::listing::TestListing;
use recruit_admin::models::test::AdminLoginRequest;
use recruit_admin::session::{Session, SessionStore, UserClass};
use recruit_admin::wizard::TestWizard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "recruit-admin", version, about = "Admin console for the Recruiting API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in as admin and print the access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Manage assessment tests
    Tests {
        #[command(subcommand)]
        command: TestsCommand,
    },
}

#[derive(Subcommand)]
enum TestsCommand {
    /// List tests, ten per page
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Delete a test by id
    Delete { id: i64 },
    /// Author a test from a JSON definition file
    Create { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "recruit-admin.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    tracing::debug!("Using Recruiting API at {}", config.api_base_url);

    let mut sessions = SessionStore::new();
    if let Some(token) = &config.admin_token {
        sessions.sign_in(UserClass::Admin, token.clone());
    }

    match cli.command {
        Commands::Login { email, password } => {
            let api = HttpRecruitingApi::anonymous(&config)?;
            let response = api.admin_login(&AdminLoginRequest { email, password }).await?;
            println!("{}", response.access_token);
        }
        Commands::Tests { command } => {
            let session = Session::resolve(&sessions, UserClass::Admin)?;
            let api = HttpRecruitingApi::new(&config, session)?;
            run_tests_command(api, command).await?;
        }
    }

    Ok(())
}

async fn run_tests_command(
    api: HttpRecruitingApi,
    command: TestsCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        TestsCommand::List { page } => {
            let mut listing = TestListing::new(api);
            listing.load().await?;
            for test in listing.page(page) {
                println!(
                    "{:>6}  {:<40}  {}",
                    test.id,
                    test.title.as_deref().unwrap_or("(untitled)"),
                    test.tech_field
                );
            }
            println!(
                "page {} of {} ({} tests)",
                page,
                listing.total_pages().max(1),
                listing.total()
            );
        }
        TestsCommand::Delete { id } => {
            let mut listing = TestListing::new(api);
            let result = listing.delete(id).await;
            if let Some(message) = listing.message() {
                println!("{}", message);
            }
            result?;
        }
        TestsCommand::Create { file } => {
            let raw = tokio::fs::read_to_string(&file).await?;
            let def = TestDefinition::from_json(&raw)?;
            let mut wizard = TestWizard::new(api);
            let result = definition::author(&mut wizard, &def).await;
            if let Some(message) = wizard.message() {
                println!("{}", message);
            }
            let id = result?;
            println!("test id {}", id);
        }
    }
    Ok(())
}
