use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use url::Url;

use eventbrite_rq::logging::init_tracing;
use eventbrite_rq::prelude::*;

/// Query or create events for an Eventbrite organization.
///
/// The API key is read from `EVENTBRITE_API_KEY` (a `.env` file is honoured).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Organization id, overrides `EVENTBRITE_ORG_ID`
    #[arg(long, global = true)]
    org_id: Option<String>,

    /// API base url, overrides `EVENTBRITE_BASE_URL`
    #[arg(long, global = true)]
    base_url: Option<Url>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the organization's events (default)
    Events,
    /// Create a draft event
    CreateEvent {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Start time in UTC, e.g. 2024-12-31T19:00:00Z
        #[arg(long)]
        start: DateTime<Utc>,
        #[arg(long)]
        end: DateTime<Utc>,
        /// IANA timezone, e.g. America/Los_Angeles
        #[arg(long)]
        timezone: String,
        #[arg(long, default_value = "USD")]
        currency: String,
        #[arg(long, default_value_t = 100)]
        capacity: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let org_id = cli
        .org_id
        .or_else(|| config.org_id.clone())
        .ok_or_else(|| eyre!("organization id missing: pass --org-id or set EVENTBRITE_ORG_ID"))?;

    let api = Eventbrite::new(&config);
    let rq = match cli.command.unwrap_or(Command::Events) {
        Command::Events => api.organization_events(&org_id),
        Command::CreateEvent {
            name,
            description,
            start,
            end,
            timezone,
            currency,
            capacity,
        } => {
            let mut draft = EventDraft::new(
                name,
                Moment::new(timezone.as_str(), start),
                Moment::new(timezone.as_str(), end),
            )
            .currency(currency)
            .capacity(capacity);
            if let Some(text) = description {
                draft = draft.description(text);
            }
            api.create_event(&org_id, &draft)
        }
    }
    .map_err(|err| eyre!(err))?;

    let rs = rq.apply().await;
    tracing::info!(status = rs.status_code(), success = rs.is_success(), "Request finished");
    process_response(&rs);
    Ok(())
}
