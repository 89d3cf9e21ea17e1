mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console_core::{Console, ConsoleEvent, HttpGateway, ViewState};
use shared::protocol::{ActionOutcome, Credential};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

#[derive(Parser)]
#[command(name = "console", about = "Operator console for the account automation backend")]
struct Cli {
    /// Backend base URL. Overrides console.toml and the environment.
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the registered account roster.
    Accounts,
    /// Log an account in on the backend and register its session.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Terminate the backend session of an account.
    Close {
        #[arg(long)]
        account: String,
    },
    /// Run a keyword search as an account and print the results.
    Search {
        #[arg(long)]
        account: String,
        #[arg(long)]
        keyword: String,
        /// Comment text the backend should attach while engaging.
        #[arg(long)]
        comment: Option<String>,
    },
    /// Search, then fire the engagement action for every result.
    Run {
        #[arg(long)]
        account: String,
        #[arg(long)]
        keyword: String,
        #[arg(long)]
        comment: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let mut settings = config::load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    let api_url = config::normalize_api_url(&settings.api_url);

    let gateway = HttpGateway::with_timeout(
        api_url,
        Duration::from_secs(settings.request_timeout_secs),
    );
    let console = Console::new(Arc::new(gateway));
    let notices = spawn_notice_printer(&console);

    let outcome = match cli.command {
        Commands::Accounts => accounts(&console).await,
        Commands::Login { username, password } => login(&console, username, password).await,
        Commands::Close { account } => close(&console, account).await,
        Commands::Search {
            account,
            keyword,
            comment,
        } => search(&console, account, keyword, comment).await,
        Commands::Run {
            account,
            keyword,
            comment,
        } => run(&console, account, keyword, comment).await,
    };

    drop(console);
    let _ = notices.await;
    outcome
}

/// Print toast-style notices as the console emits them. The task ends when
/// the console is dropped and the channel closes.
fn spawn_notice_printer(console: &Console) -> JoinHandle<()> {
    let mut events = console.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(ConsoleEvent::Success(message)) => println!("ok: {message}"),
                Ok(ConsoleEvent::Info(message)) => println!("note: {message}"),
                Ok(ConsoleEvent::Error(message)) => eprintln!("error: {message}"),
                Ok(ConsoleEvent::StateChanged(_)) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

async fn accounts(console: &Console) -> Result<()> {
    console.refresh_roster().await?;
    print_roster(&console.view().await);
    Ok(())
}

async fn login(console: &Console, username: String, password: String) -> Result<()> {
    console.open_login().await;
    console.request_login(Credential { username, password }).await?;
    print_roster(&console.view().await);
    Ok(())
}

async fn close(console: &Console, account: String) -> Result<()> {
    console.refresh_roster().await?;
    console.select_account(&account).await?;
    console.request_session_close().await?;
    console.confirm_session_close().await?;
    print_roster(&console.view().await);
    Ok(())
}

async fn search(
    console: &Console,
    account: String,
    keyword: String,
    comment: Option<String>,
) -> Result<()> {
    console.refresh_roster().await?;
    console.open_panel(&account).await?;
    console.run_search(&keyword, comment.as_deref()).await?;
    print_results(&console.view().await);
    Ok(())
}

async fn run(
    console: &Console,
    account: String,
    keyword: String,
    comment: Option<String>,
) -> Result<()> {
    console.refresh_roster().await?;
    console.open_panel(&account).await?;
    console.run_search(&keyword, comment.as_deref()).await?;
    let (succeeded, failed) = console.dispatch_all().await;
    print_results(&console.view().await);
    println!("dispatched: {succeeded} succeeded, {failed} failed");
    Ok(())
}

fn print_roster(view: &ViewState) {
    if view.accounts.is_empty() {
        println!("no accounts registered");
        return;
    }
    println!("{:>6}  username", "id");
    for account in &view.accounts {
        println!("{:>6}  {}", account.id, account.username);
    }
}

fn print_results(view: &ViewState) {
    let Some(panel) = &view.panel else {
        println!("no result panel open");
        return;
    };
    if panel.items.is_empty() {
        println!("no results");
        return;
    }
    println!("{:>6}  {:<4}  link", "id", "done");
    for item in &panel.items {
        let status = match &item.outcome {
            Some(outcome) => mark(outcome.succeeded),
            None => "…",
        };
        let detail = item.outcome.as_ref().map(outcome_detail).unwrap_or_default();
        if detail.is_empty() {
            println!("{:>6}  {:<4}  {}", item.id, status, item.link);
        } else {
            println!("{:>6}  {:<4}  {}  ({detail})", item.id, status, item.link);
        }
    }
}

fn outcome_detail(outcome: &ActionOutcome) -> String {
    if let Some(metrics) = &outcome.metrics {
        return format!(
            "heart {}  favorite {}  comment {}",
            mark(metrics.liked),
            mark(metrics.favorited),
            mark(metrics.commented)
        );
    }
    outcome.message.clone().unwrap_or_default()
}

fn mark(condition: bool) -> &'static str {
    if condition {
        "✔️"
    } else {
        "✖️"
    }
}
