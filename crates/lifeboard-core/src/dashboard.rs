//! Aggregate dashboard state.
//!
//! Owns the task and habit collections, the focus timer, the coach
//! conversation and the selected view. AI round trips are split into a
//! `begin_*` step (marks the feature busy, snapshots the input) and a
//! `finish_*` step (applies the reply only if the request is still current),
//! so a reply that lands after the user navigated away is dropped.

use chrono::NaiveDate;

use crate::chat::{ChatLog, ChatRole, Turn};
use crate::error::Result;
use crate::gateway::{AiGateway, RequestTicket, RequestTracker, TextGenerator};
use crate::habit::HabitTracker;
use crate::stats::{compute_stats, UserStats};
use crate::storage::kv::{load_json, save_json, KvStore};
use crate::task::{TaskDraft, TaskStore};
use crate::timer::FocusTimer;
use crate::view::{Router, View};

pub const TASKS_SLOT: &str = "tasks";
pub const HABITS_SLOT: &str = "habits";
pub const TIMER_SLOT: &str = "timer";
pub const CHAT_SLOT: &str = "chat";
pub const VIEW_SLOT: &str = "view";

/// Snapshot handed to the gateway for one coach turn.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub ticket: RequestTicket,
    /// Conversation before `message`.
    pub history: Vec<Turn>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub tasks: TaskStore,
    pub habits: HabitTracker,
    pub timer: FocusTimer,
    pub chat: ChatLog,
    router: Router,
    coach: RequestTracker,
    breakdown: RequestTracker,
    analysis: RequestTracker,
    insight: Option<String>,
}

impl Dashboard {
    pub fn new(welcome: &str) -> Self {
        Self {
            chat: ChatLog::with_welcome(welcome),
            ..Self::default()
        }
    }

    /// Restore every slot, starting fresh where nothing was saved.
    pub fn load(kv: &impl KvStore, welcome: &str) -> Result<Self> {
        let mut dashboard = Self::new(welcome);
        if let Some(tasks) = load_json::<TaskStore>(kv, TASKS_SLOT)? {
            dashboard.tasks = tasks;
        }
        if let Some(habits) = load_json::<HabitTracker>(kv, HABITS_SLOT)? {
            dashboard.habits = habits;
        }
        if let Some(timer) = load_json::<FocusTimer>(kv, TIMER_SLOT)? {
            dashboard.timer = timer;
        }
        if let Some(chat) = load_json::<ChatLog>(kv, CHAT_SLOT)? {
            if !chat.is_empty() {
                dashboard.chat = chat;
            }
        }
        if let Some(router) = load_json::<Router>(kv, VIEW_SLOT)? {
            dashboard.router = router;
        }
        Ok(dashboard)
    }

    pub fn save(&self, kv: &impl KvStore) -> Result<()> {
        save_json(kv, TASKS_SLOT, &self.tasks)?;
        save_json(kv, HABITS_SLOT, &self.habits)?;
        save_json(kv, TIMER_SLOT, &self.timer)?;
        save_json(kv, CHAT_SLOT, &self.chat)?;
        save_json(kv, VIEW_SLOT, &self.router)?;
        Ok(())
    }

    pub fn stats(&self, focus_minutes: u64, today: NaiveDate) -> UserStats {
        compute_stats(&self.tasks, &self.habits, focus_minutes, today)
    }

    pub fn view(&self) -> View {
        self.router.current()
    }

    /// Switch views. Leaving a feature abandons its outstanding AI request.
    pub fn navigate(&mut self, view: View) -> Option<View> {
        let left = self.router.navigate(view)?;
        match left {
            View::Coach => self.coach.invalidate(),
            View::Tasks => self.breakdown.invalidate(),
            View::Habits => self.analysis.invalidate(),
            View::Dashboard | View::Focus | View::Notes => {}
        }
        Some(left)
    }

    pub fn insight(&self) -> Option<&str> {
        self.insight.as_deref()
    }

    pub fn is_chat_busy(&self) -> bool {
        self.coach.is_busy()
    }

    pub fn is_breakdown_busy(&self) -> bool {
        self.breakdown.is_busy()
    }

    pub fn is_analysis_busy(&self) -> bool {
        self.analysis.is_busy()
    }

    // ── Coach ────────────────────────────────────────────────────────

    /// Append the user's message and start a turn. `None` for blank input or
    /// while a turn is outstanding.
    pub fn begin_chat(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() {
            return None;
        }
        let ticket = self.coach.begin()?;
        let history = self.chat.turns();
        self.chat.push(ChatRole::User, text);
        Some(ChatRequest {
            ticket,
            history,
            message: text.to_string(),
        })
    }

    /// Append the coach's reply if the turn is still current.
    pub fn finish_chat(&mut self, ticket: RequestTicket, reply: String) -> bool {
        if !self.coach.finish(ticket) {
            tracing::debug!("dropping stale coach reply");
            return false;
        }
        self.chat.push(ChatRole::Model, reply);
        true
    }

    /// Full coach round trip. Returns the reply when it was applied.
    pub async fn send_chat<G: TextGenerator>(
        &mut self,
        gateway: &AiGateway<G>,
        text: &str,
    ) -> Option<String> {
        let request = self.begin_chat(text)?;
        let reply = gateway.chat_turn(&request.history, &request.message).await;
        self.finish_chat(request.ticket, reply.clone()).then_some(reply)
    }

    // ── Task breakdown ───────────────────────────────────────────────

    pub fn begin_breakdown(&mut self, text: &str) -> Option<RequestTicket> {
        if text.trim().is_empty() {
            return None;
        }
        self.breakdown.begin()
    }

    /// Merge sub-tasks (or the original text when there are none). Returns
    /// the number of tasks inserted, `None` for a stale request.
    pub fn finish_breakdown(
        &mut self,
        ticket: RequestTicket,
        original: &str,
        drafts: Vec<TaskDraft>,
    ) -> Option<usize> {
        if !self.breakdown.finish(ticket) {
            tracing::debug!("dropping stale task breakdown");
            return None;
        }
        Some(self.tasks.apply_breakdown(original, drafts))
    }

    pub async fn breakdown<G: TextGenerator>(
        &mut self,
        gateway: &AiGateway<G>,
        text: &str,
    ) -> Option<usize> {
        let ticket = self.begin_breakdown(text)?;
        let drafts = gateway.breakdown_task(text).await;
        self.finish_breakdown(ticket, text, drafts)
    }

    // ── Habit analysis ───────────────────────────────────────────────

    /// Start an analysis of the current streaks. `None` with no habits or
    /// while one is outstanding.
    pub fn begin_analysis(&mut self) -> Option<(RequestTicket, String)> {
        if self.habits.is_empty() {
            return None;
        }
        let ticket = self.analysis.begin()?;
        self.insight = None;
        Some((ticket, self.habits.summary()))
    }

    pub fn finish_analysis(&mut self, ticket: RequestTicket, text: String) -> bool {
        if !self.analysis.finish(ticket) {
            tracing::debug!("dropping stale habit analysis");
            return false;
        }
        self.insight = Some(text);
        true
    }

    pub async fn analyze_habits<G: TextGenerator>(
        &mut self,
        gateway: &AiGateway<G>,
    ) -> Option<String> {
        let (ticket, summary) = self.begin_analysis()?;
        let text = gateway.analyze_habits(&summary).await;
        self.finish_analysis(ticket, text.clone()).then_some(text)
    }
}
