mod app;
mod domain;
mod gateway;
mod input;
mod notifications;
mod persistence;
mod store;
mod ticker;
mod timer;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use gateway::SchedulerGateway;
use persistence::{ensure_data_dir, get_data_dir, history_file, init_local_dir};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use store::HistoryStore;

#[derive(Parser)]
#[command(name = "homeroom")]
#[command(about = "A friendly terminal homework planner for kids with AI-assisted scheduling", long_about = None)]
struct Cli {
    /// Day to open the planner on (YYYY-MM-DD format). Defaults to today.
    #[arg(short, long)]
    day: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .homeroom directory in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            // Initialize local .homeroom directory
            let data_dir = init_local_dir()?;
            println!("Initialized homeroom directory: {}", data_dir.display());
            println!();
            println!("Homeroom will now use this local directory for task history.");
            println!("Run 'homeroom' to start planning.");
            Ok(())
        }
        None => {
            let start_day = match cli.day {
                Some(day) => {
                    // Validate early so a typo doesn't open an unreachable day
                    let date = chrono::NaiveDate::parse_from_str(&day, "%Y-%m-%d")
                        .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))?;
                    store::day_key(date)
                }
                None => store::today_key(),
            };

            run_tui(start_day)
        }
    }
}

fn run_tui(start_day: String) -> Result<()> {
    // Ensure homeroom directory exists
    ensure_data_dir()?;

    // Show which directory we're using
    let data_dir = get_data_dir()?;
    eprintln!("Using homeroom directory: {}", data_dir.display());

    // Load history once; bad or missing history just starts empty
    let store = HistoryStore::open(history_file()?, start_day);
    let gateway = SchedulerGateway::from_env();

    // Create app state
    let mut app = AppState::new(store, gateway);

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

    // Print any errors
    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        // Render
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press {
                    let should_quit = input::handle_key(app, key)?;
                    if should_quit {
                        return Ok(());
                    }
                }
            }
        }

        // Advance timers and expire messages
        app.tick();

        // Apply any finished worker requests (schedules, messages)
        app.poll_worker()?;
    }
}
