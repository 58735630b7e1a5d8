mod app;
mod domain;
mod input;
mod notifications;
mod persistence;
mod report;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::time::{format_iso, parse_iso_date, year};
use domain::{state_badge, Category, NewTask, Priority, SystemClock, TaskFilter};
use persistence::{
    ensure_data_dir, init_local_data_dir, load_settings, log_file, save_settings, settings_file,
    FileKvStore, Settings,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use report::{format_minutes, Dashboard};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "daymark")]
#[command(about = "A daily planner that holds you to your schedule", long_about = None)]
struct Cli {
    /// Use this data directory instead of .daymark / ~/.daymark
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .daymark directory in the current directory
    Init,
    /// Plan a new task
    Add {
        title: String,
        /// Study, Health, Coding or Personal
        #[arg(short, long, value_parser = parse_category)]
        category: Category,
        /// Low, Medium or High
        #[arg(short, long, value_parser = parse_priority, default_value = "Medium")]
        priority: Priority,
        /// Start time (HH:MM)
        #[arg(short, long)]
        start: String,
        /// End time (HH:MM)
        #[arg(short, long)]
        end: String,
        /// Estimated duration in minutes
        #[arg(short, long)]
        minutes: f64,
        /// Flag the task as critical
        #[arg(long)]
        critical: bool,
        /// Date to plan for (YYYY-MM-DD). Defaults to today.
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Change the title or estimate of a task that has not started
    Edit {
        /// Task id or unique id prefix
        id: String,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        minutes: Option<f64>,
    },
    /// Mark a task completed
    Complete {
        /// Task id or unique id prefix
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task id or unique id prefix
        id: String,
    },
    /// List tasks for a date
    List {
        /// Date to list (YYYY-MM-DD). Defaults to today.
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// List every task regardless of date
        #[arg(short, long)]
        all: bool,
    },
    /// Show streak and completion statistics
    Summary {
        /// Reference date (YYYY-MM-DD). Defaults to today.
        #[arg(short, long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Generate a yearly markdown report
    Report {
        /// Year to report on. Defaults to the current year.
        #[arg(short, long)]
        year: Option<i32>,
        /// Output file path. Defaults to <data dir>/report-YYYY.md
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_category(raw: &str) -> Result<Category, String> {
    Category::from_tag(raw).ok_or_else(|| format!("unknown category '{}'", raw))
}

fn parse_priority(raw: &str) -> Result<Priority, String> {
    Priority::from_tag(raw).ok_or_else(|| format!("unknown priority '{}'", raw))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_iso_date(raw).ok_or_else(|| "invalid date format, use YYYY-MM-DD".to_string())
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "daymark=debug" } else { "daymark=warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to stderr for one-shot commands
fn init_cli_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Log to a file while the TUI owns the terminal
fn init_tui_logging(data_dir: &Path, verbose: bool) -> Result<()> {
    let path = log_file(data_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Load settings and open a session over the data directory
fn open_session(data_dir: &Path) -> Result<AppState> {
    let settings = load_settings(settings_file(data_dir))?;
    let kv = FileKvStore::new(data_dir);
    Ok(AppState::new(Box::new(kv), Box::new(SystemClock), settings))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
        init_tui_logging(&data_dir, cli.verbose)?;
        return run_tui(&data_dir);
    };

    init_cli_logging(cli.verbose);

    if let Commands::Init = command {
        let data_dir = init_local_data_dir()?;
        save_settings(settings_file(&data_dir), &Settings::default())?;
        println!("Initialized daymark directory: {}", data_dir.display());
        println!();
        println!("Daymark will now use this local directory for task storage.");
        println!("Run 'daymark' to open your schedule.");
        return Ok(());
    }

    let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
    let mut app = open_session(&data_dir)?;
    info!(data_dir = %data_dir.display(), "session opened");

    match command {
        Commands::Init => {}
        Commands::Add {
            title,
            category,
            priority,
            start,
            end,
            minutes,
            critical,
            date,
        } => {
            if let Some(date) = date {
                app.set_viewed_date(date);
            }
            let id = app.create_task(NewTask {
                title,
                category,
                priority,
                start_time: start,
                end_time: end,
                estimated_minutes: minutes,
                is_critical: critical,
            })?;
            if let Some(task) = app.store.get(id) {
                println!(
                    "Added {} {} {} {}",
                    task.short_id(),
                    format_iso(task.date),
                    task.time_range(),
                    task.title
                );
            }
        }
        Commands::Edit { id, title, minutes } => {
            let id = app.resolve_id(&id)?;
            let task = app
                .store
                .get(id)
                .with_context(|| format!("Task {} disappeared", id))?;
            let title = title.unwrap_or_else(|| task.title.clone());
            let minutes = minutes.unwrap_or(task.estimated_minutes);
            app.edit_task(id, &title, minutes)?;
            println!("Updated {}", title);
        }
        Commands::Complete { id } => {
            let id = app.resolve_id(&id)?;
            app.complete_task(id)?;
            println!(
                "Completed. Streak: {} day(s)",
                app.streak.current_streak
            );
        }
        Commands::Delete { id } => {
            let id = app.resolve_id(&id)?;
            let task = app.delete_task(id)?;
            println!("Deleted {}", task.title);
        }
        Commands::List { date, all } => {
            if let Some(date) = date {
                app.set_viewed_date(date);
            }
            if all {
                app.filter = TaskFilter::All;
            }
            print_task_list(&app);
        }
        Commands::Summary { date } => {
            if let Some(date) = date {
                app.set_viewed_date(date);
            }
            print_summary(&app.dashboard);
        }
        Commands::Report { year: for_year, output } => {
            let today = app.today();
            let for_year = for_year.unwrap_or_else(|| year(today));
            println!("Generating report for {}...", for_year);
            let path = report::generate_report(
                &data_dir,
                app.tasks(),
                &app.streak,
                for_year,
                today,
                app.settings.window_days,
                output,
            )?;
            println!("Report generated: {}", path.display());
        }
    }

    Ok(())
}

fn print_task_list(app: &AppState) {
    let tasks = app.visible_tasks();
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }

    for task in tasks {
        println!(
            "{}  {}  {}  {:<11}  {}{}  [{} · {}] {}",
            task.short_id(),
            format_iso(task.date),
            state_badge(task.state),
            task.time_range(),
            if task.is_critical { "! " } else { "" },
            task.title,
            task.category.name(),
            task.priority.name(),
            format_minutes(task.estimated_minutes),
        );
    }
}

fn print_summary(dashboard: &Dashboard) {
    let rolling = &dashboard.rolling;
    println!(
        "Streak: {} day(s) (longest {})",
        dashboard.streak.current_streak, dashboard.streak.longest_streak
    );
    println!(
        "Day {}: {} completed, {} missed",
        format_iso(rolling.end),
        dashboard.day.completed,
        dashboard.day.missed
    );
    println!(
        "Window {} to {}: {} tasks, {} completed, {} missed, {}% completion",
        format_iso(rolling.start),
        format_iso(rolling.end),
        rolling.total,
        rolling.completed,
        rolling.missed,
        rolling.rate
    );

    println!();
    println!("Consistency:");
    for point in &dashboard.weekly {
        let bar = "█".repeat((point.rate / 10) as usize);
        println!("  {}  {:<10} {:>3}%", point.label, bar, point.rate);
    }

    println!();
    println!("Time by category:");
    for total in &dashboard.categories {
        println!("  {:<9} {}", total.category.name(), format_minutes(total.minutes));
    }
}

fn run_tui(data_dir: &Path) -> Result<()> {
    let mut app = open_session(data_dir)?;
    info!(data_dir = %data_dir.display(), "tui started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = ticker::poll_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        // Periodic missed-task check
        app.tick(Instant::now());
    }
}
