// Care Calendar
// Command-line front end: lays out a snapshot file and prints the view as JSON

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local, NaiveDate};
use clap::Parser;

use care_calendar::models::category::CategoryId;
use care_calendar::models::patient::PatientId;
use care_calendar::models::ui::{ViewType, VisibleMonth, VisibleWeek};
use care_calendar::services::filter::FilterCriteria;
use care_calendar::services::join::SnapshotDocument;
use care_calendar::services::settings::load_settings;
use care_calendar::services::time_cursor::{Clock, FixedClock, SystemClock, TimeCursor};
use care_calendar::{CalendarEngine, ViewRequest};

#[derive(Parser)]
#[command(name = "care-calendar")]
#[command(about = "Lay out care appointments as a month grid, week grid or day list")]
struct Cli {
    /// JSON file with `appointments`, `patients` and `categories`
    #[arg(short, long)]
    snapshot: PathBuf,

    /// month, week or list (defaults to the configured view)
    #[arg(short, long)]
    view: Option<ViewType>,

    /// Month to show (YYYY-MM)
    #[arg(long)]
    month: Option<String>,

    /// First day of the week to show (YYYY-MM-DD)
    #[arg(long)]
    week: Option<NaiveDate>,

    /// Only appointments in this category
    #[arg(long)]
    category: Option<i64>,

    /// Only appointments for this patient
    #[arg(long)]
    patient: Option<i64>,

    /// Only appointments starting on or after this date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Only appointments starting on or before this date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Settings file (defaults to settings.toml in the config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretend it is this instant (RFC 3339)
    #[arg(long)]
    now: Option<DateTime<Local>>,

    /// Keep running and print the view again on every tick
    #[arg(short, long)]
    watch: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    log::info!("Starting care-calendar");

    let settings = load_settings(cli.config.as_deref())?;
    let mut engine = CalendarEngine::new(settings).context("Invalid settings")?;
    engine.replace_snapshot(read_snapshot(&cli.snapshot)?);

    let clock: Arc<dyn Clock> = match cli.now {
        Some(now) => Arc::new(FixedClock(now)),
        None => Arc::new(SystemClock),
    };
    let request = build_request(&cli, &engine, clock.now())?;

    if cli.watch {
        watch(&cli, &engine, request, clock)
    } else {
        print_view(&cli, &engine, &request)
    }
}

fn read_snapshot(path: &Path) -> Result<care_calendar::Snapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let document: SnapshotDocument = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))?;
    let (snapshot, missing) = document
        .into_snapshot()
        .with_context(|| format!("Rejected snapshot {}", path.display()))?;

    if !missing.is_empty() {
        log::warn!("{} unresolved reference(s) in {}", missing.len(), path.display());
    }
    Ok(snapshot)
}

fn build_request(cli: &Cli, engine: &CalendarEngine, now: DateTime<Local>) -> Result<ViewRequest> {
    let view = cli.view.unwrap_or(engine.settings().default_view);
    let mut request = ViewRequest::new(view, now);

    if let Some(month) = &cli.month {
        request = request.with_month(parse_month(month)?);
    }
    if let Some(start) = cli.week {
        let week = VisibleWeek::new(start, engine.settings().first_day_of_week)
            .with_context(|| format!("Cannot show week starting {}", start))?;
        request = request.with_week(week);
    }

    let mut criteria = FilterCriteria::default().with_range(cli.from, cli.to);
    if let Some(id) = cli.category {
        criteria = criteria.with_category(CategoryId(id));
    }
    if let Some(id) = cli.patient {
        criteria = criteria.with_patient(PatientId(id));
    }
    Ok(request.with_criteria(criteria))
}

fn parse_month(value: &str) -> Result<VisibleMonth> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| anyhow!("Month must look like YYYY-MM, got {:?}", value))?;
    let year: i32 = year
        .parse()
        .with_context(|| format!("Invalid year in {:?}", value))?;
    let month: u32 = month
        .parse()
        .with_context(|| format!("Invalid month in {:?}", value))?;
    Ok(VisibleMonth::new(year, month)?)
}

fn print_view(cli: &Cli, engine: &CalendarEngine, request: &ViewRequest) -> Result<()> {
    let output = engine.render(request);
    let json = if cli.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("Failed to serialize view")?;
    println!("{}", json);
    Ok(())
}

fn watch(cli: &Cli, engine: &CalendarEngine, request: ViewRequest, clock: Arc<dyn Clock>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(async {
        let mut cursor = TimeCursor::new(clock, engine.settings().tick_interval());
        let mut ticks = cursor.subscribe();
        cursor.start()?;

        loop {
            tokio::select! {
                changed = ticks.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let now = *ticks.borrow_and_update();
                    print_view(cli, engine, &request.at(now))?;
                }
                _ = tokio::signal::ctrl_c() => {
                    log::info!("Interrupted, stopping");
                    break;
                }
            }
        }

        cursor.stop();
        Ok::<(), anyhow::Error>(())
    })
}
