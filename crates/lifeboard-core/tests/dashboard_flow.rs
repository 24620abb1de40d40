//! End-to-end flows over an on-disk database.

use chrono::{NaiveDate, Utc};
use lifeboard_core::storage::AiConfig;
use lifeboard_core::{
    AiGateway, Dashboard, Database, GeminiClient, NotePatch, NoteStore, TaskCategory, TimerMode,
    View,
};

const WELCOME: &str = "Hello! How are your goals today?";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

fn offline_gateway() -> AiGateway<GeminiClient> {
    AiGateway::new(None, &AiConfig::default())
}

#[test]
fn state_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lifeboard.db");

    {
        let db = Database::open_at(&path).unwrap();
        let mut dash = Dashboard::load(&db, WELCOME).unwrap();
        let id = dash
            .tasks
            .add_task("Write report", TaskCategory::Work)
            .unwrap()
            .id
            .clone();
        dash.tasks.toggle_task(&id);
        let habit = dash.habits.add_habit("Read").unwrap().id.clone();
        dash.habits.toggle_on(&habit, today());
        dash.navigate(View::Habits);
        dash.save(&db).unwrap();
        db.record_session(TimerMode::Focus, 1500, Utc::now()).unwrap();
    }

    let db = Database::open_at(&path).unwrap();
    let dash = Dashboard::load(&db, WELCOME).unwrap();
    assert_eq!(dash.view(), View::Habits);
    assert_eq!(dash.tasks.len(), 1);

    let stats = dash.stats(db.focus_minutes().unwrap(), today());
    assert_eq!(stats.life_score, 100);
    assert_eq!(stats.tasks_completed, 1);
    assert_eq!(stats.focus_minutes, 25);
    assert_eq!(stats.habit_consistency, 100);
}

#[test]
fn notes_and_dashboard_share_one_database() {
    let db = Database::open_memory().unwrap();
    let mut notes = NoteStore::open(&db).unwrap();
    let id = notes.create_note().unwrap().id.clone();
    notes
        .update_note(&id, NotePatch::title("Groceries"))
        .unwrap();

    let mut dash = Dashboard::load(&db, WELCOME).unwrap();
    dash.tasks.add_task("Buy milk", TaskCategory::Personal);
    dash.save(&db).unwrap();

    let reopened = NoteStore::open(&db).unwrap();
    assert_eq!(reopened.list().len(), 1);
    assert_eq!(reopened.list()[0].title, "Groceries");
    assert_eq!(Dashboard::load(&db, WELCOME).unwrap().tasks.len(), 1);
}

#[tokio::test]
async fn offline_breakdown_inserts_the_goal_itself() {
    let mut dash = Dashboard::new(WELCOME);
    dash.tasks.add_task("Existing", TaskCategory::Growth);

    let inserted = dash.breakdown(&offline_gateway(), "Plan the offsite").await;

    assert_eq!(inserted, Some(1));
    let titles: Vec<&str> = dash.tasks.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Plan the offsite", "Existing"]);
    assert_eq!(dash.tasks.tasks()[0].category, TaskCategory::Work);
}

#[tokio::test]
async fn offline_coach_answers_with_fallback() {
    let mut dash = Dashboard::new(WELCOME);
    let reply = dash.send_chat(&offline_gateway(), "Help me focus").await;

    assert!(reply.is_some());
    let texts: Vec<&str> = dash.chat.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts.len(), 3);
    assert_eq!(texts[0], WELCOME);
    assert_eq!(texts[1], "Help me focus");
    assert!(!dash.is_chat_busy());
}

#[tokio::test]
async fn habit_analysis_sets_insight() {
    let mut dash = Dashboard::new(WELCOME);
    assert!(dash.analyze_habits(&offline_gateway()).await.is_none());

    dash.habits.add_habit("Meditate");
    let insight = dash.analyze_habits(&offline_gateway()).await.unwrap();
    assert_eq!(dash.insight(), Some(insight.as_str()));
    assert!(!dash.is_analysis_busy());
}

#[test]
fn completed_focus_run_is_logged_once() {
    let db = Database::open_memory().unwrap();
    let mut dash = Dashboard::new(WELCOME);
    dash.timer.start_at(0);

    let event = dash.timer.sync_at(1_500_000);
    assert!(matches!(
        event,
        Some(lifeboard_core::Event::TimerCompleted { mode: TimerMode::Focus, .. })
    ));
    db.record_session(TimerMode::Focus, TimerMode::Focus.duration_secs(), Utc::now())
        .unwrap();

    assert!(dash.timer.sync_at(1_600_000).is_none());
    assert_eq!(db.recent_sessions(10).unwrap().len(), 1);
    assert_eq!(db.focus_minutes().unwrap(), 25);
}
