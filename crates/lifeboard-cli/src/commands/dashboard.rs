//! Overview and view selection.

use lifeboard_core::habit::today;
use lifeboard_core::{TimerSnapshot, UserStats, View};
use serde::Serialize;

use super::{print_json, CmdResult, Session};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Overview<'a> {
    view: View,
    view_label: &'static str,
    stats: UserStats,
    timer: TimerSnapshot,
    open_tasks: usize,
    habits: usize,
    insight: Option<&'a str>,
}

pub fn run() -> CmdResult {
    let mut session = Session::open()?;
    if session.sync_timer()?.is_some() {
        session.save()?;
    }
    let dash = &session.dashboard;
    let view = dash.view();
    let overview = Overview {
        view,
        view_label: view.label(),
        stats: dash.stats(session.db.focus_minutes()?, today()),
        timer: dash.timer.snapshot(),
        open_tasks: dash.tasks.len() - dash.tasks.completed_count(),
        habits: dash.habits.len(),
        insight: dash.insight(),
    };
    print_json(&overview)
}

/// Select a view. Leaving a feature drops any reply still owed to it.
pub fn show(view: &str) -> CmdResult {
    let view: View = view.parse()?;
    let mut session = Session::open()?;
    let left = session.dashboard.navigate(view);
    session.save()?;
    print_json(&serde_json::json!({
        "view": view,
        "label": view.label(),
        "previous": left,
    }))
}
