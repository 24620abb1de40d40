use std::time::Duration;

use clap::Subcommand;
use lifeboard_core::{Event, TimerMode};

use super::{print_json, CmdResult, Session};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print current timer state as JSON
    Status,
    /// Start if paused, pause if running
    Toggle,
    /// Start the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Stop and restore the full duration
    Reset,
    /// Switch between focus and break
    Mode {
        /// focus or break
        mode: TimerMode,
    },
    /// Follow the running countdown, one line per second
    Watch,
}

fn emit(session: &Session, event: Option<Event>) -> CmdResult {
    if let Some(event) = event {
        session.record(&event)?;
        print_json(&event)?;
    }
    Ok(())
}

pub async fn run(action: TimerAction) -> CmdResult {
    let mut session = Session::open()?;
    if let Some(event) = session.sync_timer()? {
        print_json(&event)?;
    }

    let timer = &mut session.dashboard.timer;
    let event = match action {
        TimerAction::Status => {
            print_json(&timer.snapshot())?;
            None
        }
        TimerAction::Toggle => timer.toggle(),
        TimerAction::Start => timer.start(),
        TimerAction::Pause => timer.pause(),
        TimerAction::Reset => timer.reset(),
        TimerAction::Mode { mode } => timer.switch_mode(mode),
        TimerAction::Watch => {
            session.save()?;
            return watch(&mut session).await;
        }
    };
    emit(&session, event)?;

    session.save()
}

async fn watch(session: &mut Session) -> CmdResult {
    if !session.dashboard.timer.is_active() {
        print_json(&session.dashboard.timer.snapshot())?;
        return Ok(());
    }

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    loop {
        interval.tick().await;
        let completed = session.sync_timer()?;
        let timer = &session.dashboard.timer;
        println!("{} {}", timer.mode().label(), timer.clock());
        session.save()?;

        if let Some(event) = completed {
            print_json(&event)?;
            return Ok(());
        }
        if !session.dashboard.timer.is_active() {
            return Ok(());
        }
    }
}
