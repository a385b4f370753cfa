mod app;
mod commands;
mod config;
mod domain;
mod input;
mod logging;
mod notifications;
mod persistence;
mod report;
mod ticker;
mod ui;

use app::AppState;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{Priority, RecurringType, Theme, TimerMode, Vibe};
use persistence::{ensure_data_dir, get_data_dir, init_local_dir};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "dayplan")]
#[command(about = "A daily planner with priorities, recurring tasks, a streak and a focus timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .dayplan directory in the current directory
    Init,
    /// Add a task for today
    Add {
        /// Task text
        text: String,
        /// Priority: high, medium or low
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        /// Repeat the task: daily or weekly
        #[arg(short, long)]
        recurring: Option<RecurringType>,
    },
    /// List today's tasks, highest priority first
    List,
    /// Toggle a task done/not done by id prefix
    Toggle { id: String },
    /// Delete a task by id prefix
    Delete { id: String },
    /// Show progress, streak and preferences
    Stats,
    /// Show the notes, or replace them
    Notes { text: Option<String> },
    /// Set the vibe: focus, chill or grind
    Vibe { vibe: Vibe },
    /// Set the mood (amazing, good, okay, meh, stressed) or "none" to clear it
    Mood { mood: String },
    /// Set the color theme: warm, dark, ocean, sunset or forest
    Theme { theme: Theme },
    /// Run one timer phase in the foreground
    Timer {
        /// work or break
        #[arg(long, default_value = "work")]
        phase: TimerMode,
    },
    /// Generate a markdown report of today's plan
    Report {
        /// Output file path. Defaults to <data dir>/report-YYYY-MM-DD.md
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a browser localStorage dump (JSON object of storage keys)
    Import {
        file: PathBuf,
        /// Parse and report without writing anything
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if !matches!(cli.command, Some(Commands::Init)) {
        let data_dir = ensure_data_dir()?;
        logging::init(&data_dir);
        logging::cleanup_old_logs(&data_dir);
    }

    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Init) => {
            let data_dir = init_local_dir()?;
            println!("Initialized planner directory: {}", data_dir.display());
            println!();
            println!("dayplan will now use this local directory for storage.");
            println!("Run 'dayplan' to open the planner.");
            Ok(())
        }
        Some(Commands::Add {
            text,
            priority,
            recurring,
        }) => run_command(today, |app| commands::cmd_add(app, &text, priority, recurring)),
        Some(Commands::List) => run_command(today, |app| Ok(commands::cmd_list(app))),
        Some(Commands::Toggle { id }) => run_command(today, |app| commands::cmd_toggle(app, &id)),
        Some(Commands::Delete { id }) => run_command(today, |app| commands::cmd_delete(app, &id)),
        Some(Commands::Stats) => run_command(today, |app| Ok(commands::cmd_stats(app))),
        Some(Commands::Notes { text }) => run_command(today, |app| commands::cmd_notes(app, text)),
        Some(Commands::Vibe { vibe }) => run_command(today, |app| commands::cmd_vibe(app, vibe)),
        Some(Commands::Mood { mood }) => run_command(today, |app| commands::cmd_mood(app, &mood)),
        Some(Commands::Theme { theme }) => run_command(today, |app| commands::cmd_theme(app, theme)),
        Some(Commands::Timer { phase }) => {
            let config = config::Config::load()?;
            commands::cmd_timer(phase, config.phase_durations())
        }
        Some(Commands::Report { output }) => {
            let app = commands::open_session(today)?;
            println!("Generating report for {}...", today);
            let report_path = report::generate_report(&app.planner, today, output)?;
            println!("Report generated: {}", report_path.display());
            Ok(())
        }
        Some(Commands::Import { file, dry_run }) => {
            let summary = commands::cmd_import_file(&file, today, dry_run)?;
            let verb = if dry_run { "Would import" } else { "Imported" };
            println!(
                "{} {} task(s) ({} skipped). Keys: {}",
                verb,
                summary.tasks,
                summary.skipped_tasks,
                summary.keys.join(", ")
            );
            Ok(())
        }
        None => run_tui(today),
    }
}

/// Open a session, run one command and print its confirmation
fn run_command<F>(today: NaiveDate, command: F) -> Result<()>
where
    F: FnOnce(&mut AppState) -> Result<String>,
{
    let mut app = commands::open_session(today)?;
    let output = command(&mut app)?;
    println!("{}", output);
    Ok(())
}

fn run_tui(today: NaiveDate) -> Result<()> {
    let data_dir = get_data_dir()?;
    logging::info(&format!("Using planner directory: {}", data_dir.display()));

    let mut app = commands::open_session(today)?;

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

    // Stop the timer and save on exit
    if let Err(e) = app.shutdown() {
        eprintln!("Error saving state: {}", e);
    }

    if let Err(err) = result {
        logging::error(&format!("TUI exited with error: {}", err));
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let poll_rate = ticker::poll_duration();

    loop {
        // Midnight crossing: rerun the recurrence pass for the new day
        let current_day = Local::now().date_naive();
        if app.has_day_changed(current_day) {
            app.roll_over_to(current_day);
        }

        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(poll_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key, Instant::now())?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Drain timer ticks
        app.tick(Instant::now());

        // Autosave if needed
        app.autosave();
    }
}
