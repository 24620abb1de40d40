use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lifeboard-cli", version, about = "Lifeboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stats, timer and current view at a glance
    Dashboard,
    /// Switch the selected view
    Show {
        /// dashboard, coach, tasks, habits, focus or notes
        view: String,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Habit tracking
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Offline notes
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Talk to the AI coach
    Coach {
        #[command(subcommand)]
        action: commands::coach::CoachAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env("LIFEBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Dashboard => commands::dashboard::run(),
        Commands::Show { view } => commands::dashboard::show(&view),
        Commands::Task { action } => commands::task::run(action).await,
        Commands::Habit { action } => commands::habit::run(action).await,
        Commands::Timer { action } => commands::timer::run(action).await,
        Commands::Note { action } => commands::note::run(action),
        Commands::Coach { action } => commands::coach::run(action).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
