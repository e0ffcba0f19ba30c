//! Pantry CLI - food inventory expiry tracking.

mod render;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use pantry_core::{parse_date, FoodItem, FoodRecord, ItemId, ItemStatus};
use pantry_expiry::ExpiryPolicy;
use pantry_insights::{
    insights, log_summary, normalize_logs, AnalyticsPeriod, Insight, InventoryAggregator,
    InventoryFilter,
};
use pantry_source::{InventorySource, JsonFileSource, StatusUpdate};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Food inventory expiry tracking", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Item export (JSON)
    #[arg(long, global = true, default_value = "pantry.json")]
    items: PathBuf,

    /// Reference date, YYYY-MM-DD (defaults to the local date)
    #[arg(long, global = true)]
    today: Option<String>,

    /// Policy file (JSON) overriding the default thresholds
    #[arg(long, global = true)]
    policy: Option<PathBuf>,

    /// Near-expiry window in days
    #[arg(long, global = true)]
    near_expiry_days: Option<i64>,

    /// Donation window in days
    #[arg(long, global = true)]
    donation_window_days: Option<i64>,

    /// Offer items expiring today for donation
    #[arg(long, global = true)]
    donate_same_day: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Status and freshness overview
    Dashboard,
    /// Items near or past expiry, most urgent first
    Alerts,
    /// Items that can still be donated
    Donations,
    /// Usage, donation and waste rates
    Analytics {
        /// today, 7days, 30days or overall
        #[arg(long, default_value = "overall")]
        period: String,
    },
    /// List inventory
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
        /// Search name or category
        #[arg(long)]
        search: Option<String>,
    },
    /// Classify a single expiry date
    Classify {
        /// Expiry date
        date: String,
    },
    /// Mark an available item as used, donated or wasted
    Mark {
        /// Item ID
        id: String,
        /// used, donated or wasted
        status: String,
        /// Why it was wasted
        #[arg(long)]
        reason: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let policy = load_policy(&cli.global)?;
    let today = match &cli.global.today {
        Some(s) => parse_date(s).with_context(|| format!("Invalid --today {:?}", s))?,
        None => pantry_expiry::today(),
    };
    debug!(?policy, %today, "Resolved settings");

    let aggregator = InventoryAggregator::new(policy);
    let source = JsonFileSource::new(&cli.global.items);
    let json = cli.global.json;

    match cli.command {
        Commands::Classify { date } => {
            let expiry = parse_date(&date)?;
            let c = aggregator.classifier().classify(expiry, today);
            emit(json, &c, || render::classification(expiry, &c))?;
        }
        Commands::Dashboard => {
            let report = fetch_report(&source, &aggregator, today).await?;
            emit(json, &report.summary, || render::dashboard(&report.summary))?;
        }
        Commands::Alerts => {
            let report = fetch_report(&source, &aggregator, today).await?;
            emit(json, &report.alerts, || render::alerts(&report.alerts))?;
        }
        Commands::Donations => {
            let report = fetch_report(&source, &aggregator, today).await?;
            let window = policy.donation_window_days;
            emit(json, &report.donation_candidates, || {
                render::donations(&report.donation_candidates, window)
            })?;
        }
        Commands::Analytics { period } => {
            let report = fetch_report(&source, &aggregator, today).await?;
            let (logs, log_issues) = normalize_logs(&source.fetch_logs().await?);
            eprint!("{}", render::issues(&log_issues)?);

            let period = AnalyticsPeriod::parse_lenient(&period);
            let logs = (!logs.is_empty()).then(|| log_summary(&logs, period, today));

            #[derive(Serialize)]
            struct Analytics<'a> {
                summary: &'a pantry_insights::AggregateSummary,
                insights: Vec<Insight>,
                food_log: Option<&'a pantry_insights::LogSummary>,
            }
            let view = Analytics {
                summary: &report.summary,
                insights: insights(&report.summary),
                food_log: logs.as_ref(),
            };
            emit(json, &view, || render::analytics(&report.summary, logs.as_ref()))?;
        }
        Commands::List { status, search } => {
            let status = status
                .map(|s| s.parse::<ItemStatus>())
                .transpose()
                .map_err(|e| anyhow!("Invalid --status: {}", e))?;
            let normalized = aggregator.normalize(&source.fetch_items().await?);
            eprint!("{}", render::issues(&normalized.issues)?);

            let filter = InventoryFilter { status, search };
            let found = filter.apply(&normalized.items);
            emit(json, &found, || {
                render::inventory(&found, aggregator.classifier(), today)
            })?;
        }
        Commands::Mark { id, status, reason } => {
            let target: ItemStatus = status.parse()?;
            let id: ItemId = id.parse()?;

            let item = mark(&source, &aggregator, &id, target, reason.as_deref()).await?;
            info!(path = %source.updates_path().display(), "Update queued");
            println!("Marked {} ({}) as {}", item.id, item.name, target.title());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Defaults, then the policy file, then individual flags.
fn load_policy(args: &GlobalArgs) -> Result<ExpiryPolicy> {
    let mut policy = match &args.policy {
        Some(path) => read_policy(path)?,
        None => ExpiryPolicy::default(),
    };
    if let Some(days) = args.near_expiry_days {
        policy.near_expiry_days = days;
    }
    if let Some(days) = args.donation_window_days {
        policy.donation_window_days = days;
    }
    if args.donate_same_day {
        policy.donate_same_day = true;
    }
    policy.validate()?;
    Ok(policy)
}

fn read_policy(path: &Path) -> Result<ExpiryPolicy> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file {}", path.display()))?;
    ExpiryPolicy::from_json(&content)
        .with_context(|| format!("Failed to parse policy file {}", path.display()))
}

async fn fetch_report(
    source: &JsonFileSource,
    aggregator: &InventoryAggregator,
    today: NaiveDate,
) -> Result<pantry_insights::AggregateReport> {
    let records: Vec<FoodRecord> = source
        .fetch_items()
        .await
        .with_context(|| "Failed to load items")?;
    let report = aggregator.aggregate(&records, today);
    eprint!("{}", render::issues(&report.issues)?);
    Ok(report)
}

/// Look up `id` among valid items and submit a transition to `target`.
async fn mark(
    source: &impl InventorySource,
    aggregator: &InventoryAggregator,
    id: &ItemId,
    target: ItemStatus,
    reason: Option<&str>,
) -> Result<FoodItem> {
    let normalized = aggregator.normalize(&source.fetch_items().await?);
    let item = normalized
        .items
        .into_iter()
        .find(|i| &i.id == id)
        .ok_or_else(|| anyhow!("Item {} not found", id))?;

    let update = StatusUpdate::new(&item, target, reason)?;
    source.submit(&update).await?;
    Ok(item)
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> render::Rendered) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text()?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(policy: Option<PathBuf>) -> GlobalArgs {
        GlobalArgs {
            items: PathBuf::from("pantry.json"),
            today: None,
            policy,
            near_expiry_days: None,
            donation_window_days: None,
            donate_same_day: false,
            json: false,
            verbose: false,
        }
    }

    #[test]
    fn test_policy_layering() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("policy.json");
        std::fs::write(&path, r#"{"near_expiry_days": 5, "donation_window_days": 10}"#).unwrap();

        let mut args = args(Some(path));
        args.donation_window_days = Some(4);
        args.donate_same_day = true;

        let policy = load_policy(&args).unwrap();
        assert_eq!(policy.near_expiry_days, 5);
        assert_eq!(policy.donation_window_days, 4);
        assert!(policy.donate_same_day);
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let mut args = args(None);
        args.near_expiry_days = Some(0);
        assert!(load_policy(&args).is_err());
    }

    #[tokio::test]
    async fn test_mark_unknown_item_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pantry.json");
        std::fs::write(&path, r#"[{"id": 1, "name": "Milk", "expiry_date": "2025-01-20"}]"#).unwrap();
        let source = JsonFileSource::new(&path);
        let aggregator = InventoryAggregator::default();

        let err = mark(&source, &aggregator, &ItemId::from(9), ItemStatus::Used, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Item 9 not found");

        let item = mark(&source, &aggregator, &ItemId::from(1), ItemStatus::Used, None)
            .await
            .unwrap();
        assert_eq!(item.name, "Milk");

        // Already used once the queued update is applied
        assert!(mark(&source, &aggregator, &ItemId::from(1), ItemStatus::Wasted, None)
            .await
            .is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "pantry", "list", "--status", "available", "--items", "x.json", "--today", "2025-01-14",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::List { .. }));
        assert_eq!(cli.global.items, PathBuf::from("x.json"));
    }
}
