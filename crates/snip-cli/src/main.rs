//! snip CLI - Salon appointment booking from the terminal
//!
//! One process is one replica: the store runs journal-backed local mode and
//! every command rebuilds its view from the journal.

use std::env;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Timelike, Utc};
use clap::{Parser, Subcommand};
use snip_core::chat::{intent, ConversationEngine};
use snip_core::config::ScheduleConfig;
use snip_core::dashboard::Dashboard;
use snip_core::export::render_json_export;
use snip_core::models::{BookingId, BookingRecord, Roster, Stylist, StylistId};
use snip_core::schedule::open_times;
use snip_core::store::BookingStore;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "snip")]
#[command(about = "Salon appointment booking and admin tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional path to the local booking journal file
    #[arg(long, value_name = "PATH")]
    data_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive booking chat with a stylist
    Chat {
        /// Stylist to book with
        #[arg(long)]
        stylist: String,
    },
    /// Ask a one-off question (services, prices, hours)
    Ask {
        /// Question text
        text: Vec<String>,
    },
    /// Show open times for a stylist on a date
    Availability {
        /// Stylist to check
        #[arg(long)]
        stylist: String,
        /// Date to check (Y-M-D)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Show the admin dashboard
    Dashboard {
        /// Day to show the appointment grid for (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List all bookings, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Confirm a pending booking
    Confirm {
        /// Booking ID or unique ID prefix
        id: String,
    },
    /// Cancel a booking
    Cancel {
        /// Booking ID or unique ID prefix
        id: String,
    },
    /// Export bookings as JSON
    Export {
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] snip_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Unknown stylist: {0}. Known stylists: {1}")]
    UnknownStylist(String, String),
    #[error("No question provided")]
    EmptyQuestion,
    #[error("Booking not found for id/prefix: {0}")]
    BookingNotFound(String),
    #[error("{0}")]
    AmbiguousBookingId(String),
}

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("snip_core=info".parse().unwrap())
                .add_directive("snip_cli=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let data_path = resolve_data_path(cli.data_path);

    match cli.command {
        Commands::Chat { stylist } => run_chat(&stylist, &data_path)?,
        Commands::Ask { text } => run_ask(&text)?,
        Commands::Availability { stylist, date } => run_availability(&stylist, date, &data_path)?,
        Commands::Dashboard { date } => run_dashboard(date, &data_path)?,
        Commands::List { json } => run_list(json, &data_path)?,
        Commands::Confirm { id } => run_confirm(&id, &data_path)?,
        Commands::Cancel { id } => run_cancel(&id, &data_path)?,
        Commands::Export { output } => run_export(output.as_deref(), &data_path)?,
    }

    Ok(())
}

fn run_chat(stylist_name: &str, data_path: &Path) -> Result<(), CliError> {
    let roster = Roster::default();
    let stylist = resolve_stylist(&roster, stylist_name)?.clone();
    let store = open_store(data_path)?;
    let mut engine = ConversationEngine::new(store, &stylist.id)?;

    println!("{}", engine.greeting());
    println!("(type 'quit' to end the session)");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message.to_lowercase().as_str(), "quit" | "exit") {
            break;
        }

        for reply in engine.process_message(message) {
            println!("{reply}");
        }
    }

    Ok(())
}

fn run_ask(text: &[String]) -> Result<(), CliError> {
    let question = text.join(" ");
    if question.trim().is_empty() {
        return Err(CliError::EmptyQuestion);
    }
    println!("{}", intent::respond(&question));
    Ok(())
}

fn run_availability(
    stylist_name: &str,
    date: NaiveDate,
    data_path: &Path,
) -> Result<(), CliError> {
    let roster = Roster::default();
    let stylist = resolve_stylist(&roster, stylist_name)?;
    let store = open_store(data_path)?;
    let config = ScheduleConfig::default();

    let times = open_times(&store.snapshot(), stylist, date, config.grid_slot_minutes);
    if times.is_empty() {
        println!(
            "No open times for {} on {}, {date}",
            stylist.name,
            date.format("%A")
        );
    } else {
        for time in times {
            println!("{}", time.format("%H:%M"));
        }
    }

    Ok(())
}

fn run_dashboard(date: Option<NaiveDate>, data_path: &Path) -> Result<(), CliError> {
    let store = open_store(data_path)?;
    let dashboard = Dashboard::new(store);

    let today = Utc::now().date_naive();
    let grid_date = date.unwrap_or(today);
    let stats = dashboard.stats(today);

    println!("{}", grid_date.format("%A, %Y-%m-%d"));
    println!();
    println!(
        "Today's bookings: {}    Pending: {}",
        stats.today, stats.pending
    );

    println!();
    println!("Appointments:");
    let grid = dashboard.day_grid(grid_date);
    if grid.is_empty() {
        println!("  No appointments scheduled");
    } else {
        for record in &grid {
            println!("  {}", format_grid_line(record));
        }
    }

    println!();
    println!("Recent bookings:");
    for record in dashboard.recent() {
        println!(
            "  {}  {} {}  [{}]",
            record.date,
            format_time_12h(record.time),
            record.client_name,
            record.status
        );
    }

    Ok(())
}

fn run_list(as_json: bool, data_path: &Path) -> Result<(), CliError> {
    let store = open_store(data_path)?;
    let dashboard = Dashboard::new(store);
    let records = dashboard.all();

    if as_json {
        println!("{}", render_json_export(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No bookings found.");
        return Ok(());
    }

    println!(
        "{:<13}  {:<20}  {:<15}  {:<9}  {:<10}  {:<6}  {}",
        "ID", "Client", "Service", "Stylist", "Date", "Time", "Status"
    );
    for record in &records {
        println!("{}", format_list_line(record));
    }

    Ok(())
}

fn run_confirm(id_query: &str, data_path: &Path) -> Result<(), CliError> {
    let store = open_store(data_path)?;
    let dashboard = Dashboard::new(store);

    let record = resolve_booking(&dashboard, id_query)?;
    dashboard.confirm(&record.id)?;
    println!("Booking confirmed successfully");
    Ok(())
}

fn run_cancel(id_query: &str, data_path: &Path) -> Result<(), CliError> {
    let store = open_store(data_path)?;
    let dashboard = Dashboard::new(store);

    let record = resolve_booking(&dashboard, id_query)?;
    dashboard.cancel(&record.id)?;
    println!("Booking cancelled successfully");
    Ok(())
}

fn run_export(output_path: Option<&Path>, data_path: &Path) -> Result<(), CliError> {
    let store = open_store(data_path)?;
    let rendered = render_json_export(&store.snapshot())?;

    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

fn resolve_stylist<'a>(roster: &'a Roster, name: &str) -> Result<&'a Stylist, CliError> {
    roster.get(&StylistId::new(name)).ok_or_else(|| {
        let known = roster
            .iter()
            .map(|stylist| stylist.id.as_str().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        CliError::UnknownStylist(name.to_string(), known)
    })
}

fn resolve_booking(dashboard: &Dashboard, query: &str) -> Result<BookingRecord, CliError> {
    let records = dashboard.all();

    if let Ok(id) = query.parse::<BookingId>() {
        if let Some(record) = records.iter().find(|record| record.id == id) {
            return Ok(record.clone());
        }
    }

    let matching: Vec<&BookingRecord> = records
        .iter()
        .filter(|record| record.id.as_str().starts_with(query))
        .collect();

    match matching.len() {
        0 => Err(CliError::BookingNotFound(query.to_string())),
        1 => Ok(matching[0].clone()),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|record| short_id(record))
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousBookingId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

fn format_grid_line(record: &BookingRecord) -> String {
    format!(
        "{:<9} {:<20}  {:<15}  with {}  [{}]",
        format_time_12h(record.time),
        record.client_name,
        record.service.info().name,
        record.stylist,
        record.status
    )
}

fn format_list_line(record: &BookingRecord) -> String {
    format!(
        "{:<13}  {:<20}  {:<15}  {:<9}  {:<10}  {:<6}  {}",
        short_id(record),
        record.client_name,
        record.service.info().name,
        record.stylist,
        record.date.to_string(),
        record.time.format("%H:%M").to_string(),
        record.status
    )
}

fn short_id(record: &BookingRecord) -> String {
    record.id.as_str().chars().take(13).collect()
}

fn format_time_12h(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    format!(
        "{}:{:02} {}",
        hour,
        time.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

fn resolve_data_path(cli_data_path: Option<PathBuf>) -> PathBuf {
    cli_data_path
        .or_else(|| env::var_os("SNIP_DATA_PATH").map(PathBuf::from))
        .unwrap_or_else(default_data_path)
}

fn default_data_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snip")
        .join("bookings.json")
}

fn open_store(path: &Path) -> Result<Arc<BookingStore>, CliError> {
    tracing::debug!(path = %path.display(), "opening booking journal");
    Ok(Arc::new(BookingStore::open(path)?))
}
