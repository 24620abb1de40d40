pub mod coach;
pub mod config;
pub mod dashboard;
pub mod habit;
pub mod note;
pub mod task;
pub mod timer;

use lifeboard_core::{AiGateway, Config, Dashboard, Database, Event, GeminiClient};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a command needs: the database, configuration and the
/// dashboard restored from its slots.
pub struct Session {
    pub db: Database,
    pub config: Config,
    pub dashboard: Dashboard,
}

impl Session {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open()?;
        let config = Config::load_or_default();
        let dashboard = Dashboard::load(&db, &config.coach.welcome_message)?;
        Ok(Self {
            db,
            config,
            dashboard,
        })
    }

    pub fn gateway(&self) -> Result<AiGateway<GeminiClient>, Box<dyn std::error::Error>> {
        Ok(AiGateway::from_config(&self.config.ai)?)
    }

    /// Log a finished countdown to the session table.
    pub fn record(&self, event: &Event) -> CmdResult {
        if let Event::TimerCompleted {
            mode,
            duration_secs,
            at,
        } = event
        {
            let id = self.db.record_session(*mode, *duration_secs, *at)?;
            tracing::info!(session = id, mode = %mode, "session recorded");
        }
        Ok(())
    }

    /// Catch the timer up with the wall clock, recording a run that finished
    /// since the last invocation.
    pub fn sync_timer(&mut self) -> Result<Option<Event>, Box<dyn std::error::Error>> {
        let event = self.dashboard.timer.sync();
        if let Some(event) = &event {
            self.record(event)?;
        }
        Ok(event)
    }

    pub fn save(&self) -> CmdResult {
        self.dashboard.save(&self.db)?;
        Ok(())
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
