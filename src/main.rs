use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use otter_client::{Config, Envelope, OtterClient};
use tracing::info;

#[derive(Parser)]
#[command(name = "otter", version, about = "Command-line access to Otter.ai transcripts")]
struct Cli {
    /// Config file (extension optional); OTTER_* environment variables override it
    #[arg(long, default_value = "config/otter-client")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the logged-in user's profile
    User,
    /// List speeches in the top-level folder
    Speeches,
    /// Show one speech
    Speech { id: String },
    /// Rename a speech
    SetTitle { id: String, title: String },
    /// List speakers
    Speakers,
    /// List folders
    Folders,
    /// List groups
    Groups,
    /// Search the transcript of one speech
    Search { id: String, query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    let credentials = cfg
        .credentials
        .context("No credentials configured (set OTTER_CREDENTIALS__USERNAME and OTTER_CREDENTIALS__PASSWORD)")?;

    info!("Using API at {}", cfg.api.base_url);

    let mut otter = OtterClient::new(&cfg.api).context("Failed to create Otter client")?;

    let login = otter
        .login(&credentials.username, &credentials.password)
        .await
        .context("Login request failed")?;
    if !login.is_success() {
        bail!("Login failed with status {}", login.status);
    }

    let envelope = match cli.command {
        Command::User => otter.get_user().await,
        Command::Speeches => otter.get_speeches().await,
        Command::Speech { id } => otter.get_speech(&id).await,
        Command::SetTitle { id, title } => otter.set_speech_title(&id, &title).await,
        Command::Speakers => otter.get_speakers().await,
        Command::Folders => otter.get_folders().await,
        Command::Groups => otter.list_groups().await,
        Command::Search { id, query } => otter.query_speech_default(&id, &query).await,
    }?;

    print_envelope(&envelope)
}

fn print_envelope(envelope: &Envelope) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    if !envelope.is_success() {
        bail!("Request failed with status {}", envelope.status);
    }
    Ok(())
}
