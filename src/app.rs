use crate::domain::{Screen, SubjectPreset, Task, UiMode};
use crate::gateway::{
    spawn_motivation, spawn_optimize, SchedulerGateway, TaskDescriptor, WorkerEvent,
};
use crate::notifications;
use crate::store::HistoryStore;
use crate::ticker;
use crate::timer::{TimerEngine, TimerState};
use anyhow::Result;
use chrono::NaiveDate;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Instant;
use uuid::Uuid;

/// How long a motivational message stays on screen before auto-dismissing
const MESSAGE_DISPLAY_SECS: u64 = 4;

/// Practical bound on a single task estimate
pub const MAX_ESTIMATE_MINUTES: u32 = 480;

/// Input form state for adding tasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub title: String,
    pub minutes: String, // digits as typed
    pub subject_index: usize,
    pub custom_subject: String,
    pub editing_field: usize, // 0 = title, 1 = subject, 2 = minutes
}

impl InputFormState {
    fn new() -> Self {
        Self {
            title: String::new(),
            minutes: String::new(),
            subject_index: 0,
            custom_subject: String::new(),
            editing_field: 0,
        }
    }

    pub fn subject_preset(&self) -> SubjectPreset {
        SubjectPreset::all()[self.subject_index]
    }

    /// The subject label the task would get
    pub fn subject_label(&self) -> String {
        match self.subject_preset() {
            SubjectPreset::Custom => self.custom_subject.trim().to_string(),
            preset => preset.name().to_string(),
        }
    }

    /// Minutes parsed from the typed digits, within the practical bound
    pub fn parsed_minutes(&self) -> Option<u32> {
        let minutes: u32 = self.minutes.parse().ok()?;
        if (1..=MAX_ESTIMATE_MINUTES).contains(&minutes) {
            Some(minutes)
        } else {
            None
        }
    }

    /// Whether the form can be submitted. Empty title, out-of-range
    /// minutes, and an empty custom subject all block submission.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
            && self.parsed_minutes().is_some()
            && !self.subject_label().is_empty()
    }
}

/// A countdown session for one task, plus its tick schedule.
/// `next_tick` is the tick source: armed fresh on every resume and
/// cleared on pause/finish so seconds are never counted twice.
pub struct TimerSession {
    pub task_id: Uuid,
    pub task_title: String,
    pub engine: TimerEngine,
    next_tick: Option<Instant>,
    overtime_notified: bool,
}

impl TimerSession {
    fn new(task: &Task) -> Self {
        Self {
            task_id: task.id,
            task_title: task.title.clone(),
            engine: TimerEngine::new(task.estimated_minutes),
            next_tick: None,
            overtime_notified: false,
        }
    }
}

/// A motivational message currently on screen
#[derive(Debug, Clone)]
pub struct MessageState {
    pub text: String,
    shown_at: Instant,
}

/// Main application state
pub struct AppState {
    pub store: HistoryStore,
    gateway: SchedulerGateway,
    pub screen: Screen,
    pub ui_mode: UiMode,
    pub selected_index: usize,
    pub input_form: Option<InputFormState>,
    pub timer: Option<TimerSession>,
    pub message: Option<MessageState>,
    pub available_time_minutes: Option<u32>,
    /// Day key the in-flight schedule request was issued for
    pending_schedule_day: Option<String>,
    worker_tx: Sender<WorkerEvent>,
    worker_rx: Receiver<WorkerEvent>,
}

impl AppState {
    pub fn new(store: HistoryStore, gateway: SchedulerGateway) -> Self {
        let (worker_tx, worker_rx) = channel();

        Self {
            store,
            gateway,
            screen: Screen::Planner,
            ui_mode: UiMode::Normal,
            selected_index: 0,
            input_form: None,
            timer: None,
            message: None,
            available_time_minutes: None,
            pending_schedule_day: None,
            worker_tx,
            worker_rx,
        }
    }

    /// Keep the selection inside the pending list
    fn clamp_selection(&mut self) {
        let len = self.store.pending().len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.store.pending().len() {
            self.selected_index += 1;
        }
    }

    /// Move the selected pending task up one slot
    pub fn move_task_up(&mut self) -> Result<()> {
        if self.selected_index > 0 {
            self.store
                .move_pending(self.selected_index, self.selected_index - 1)?;
            self.selected_index -= 1;
        }
        Ok(())
    }

    /// Move the selected pending task down one slot
    pub fn move_task_down(&mut self) -> Result<()> {
        if self.selected_index + 1 < self.store.pending().len() {
            self.store
                .move_pending(self.selected_index, self.selected_index + 1)?;
            self.selected_index += 1;
        }
        Ok(())
    }

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::new());
        self.ui_mode = UiMode::AddingTask;
    }

    /// Toggle between editing fields (title -> subject -> minutes)
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 3;
        }
    }

    /// Cycle the subject preset left/right while the subject field is active
    pub fn input_form_cycle_subject(&mut self, forward: bool) {
        if let Some(form) = &mut self.input_form {
            let count = SubjectPreset::all().len();
            form.subject_index = if forward {
                (form.subject_index + 1) % count
            } else {
                (form.subject_index + count - 1) % count
            };
        }
    }

    /// Add character to the current input form field
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.title.push(c),
                1 => {
                    if form.subject_preset() == SubjectPreset::Custom {
                        form.custom_subject.push(c);
                    }
                }
                2 => {
                    if c.is_ascii_digit() && form.minutes.len() < 3 {
                        form.minutes.push(c);
                    }
                }
                _ => {}
            }
        }
    }

    /// Backspace in the current input form field
    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => {
                    form.title.pop();
                }
                1 => {
                    if form.subject_preset() == SubjectPreset::Custom {
                        form.custom_subject.pop();
                    }
                }
                2 => {
                    form.minutes.pop();
                }
                _ => {}
            }
        }
    }

    /// Submit the input form. Invalid input keeps the form open; the
    /// submit action is effectively disabled until the fields pass.
    pub fn submit_input_form(&mut self) -> Result<()> {
        let Some(form) = &self.input_form else {
            return Ok(());
        };
        if !form.is_valid() {
            return Ok(());
        }

        let form = self.input_form.take().unwrap_or_else(InputFormState::new);
        let minutes = form.parsed_minutes().unwrap_or(1);
        let task = Task::new(
            form.title.trim().to_string(),
            form.subject_label(),
            minutes,
            form.subject_preset().emoji().to_string(),
        );

        self.store.add_task(task)?;
        self.ui_mode = UiMode::Normal;
        Ok(())
    }

    /// Cancel input form
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Delete the selected pending task
    pub fn delete_selected(&mut self) -> Result<()> {
        let Some(task) = self.store.pending().get(self.selected_index).copied() else {
            return Ok(());
        };
        let id = task.id;

        self.store.remove_task(id)?;
        self.clamp_selection();
        Ok(())
    }

    /// Open the timer screen for the selected pending task
    pub fn open_timer_for_selected(&mut self) {
        let Some(task) = self.store.pending().get(self.selected_index).copied() else {
            return;
        };

        let session = TimerSession::new(task);
        let title = session.task_title.clone();
        self.timer = Some(session);
        self.screen = Screen::Timer;

        spawn_motivation(self.gateway.clone(), title, false, self.worker_tx.clone());
    }

    /// Start/pause toggle for the timer screen
    pub fn timer_toggle(&mut self) {
        let Some(session) = &mut self.timer else {
            return;
        };

        match session.engine.state() {
            TimerState::Idle | TimerState::Paused => {
                session.engine.start();
                // Fresh tick source; the previous one was retired on pause
                session.next_tick = Some(Instant::now() + ticker::timer_tick_duration());
            }
            TimerState::Running => {
                session.engine.pause();
                session.next_tick = None;
            }
            TimerState::Finished => {}
        }
    }

    /// Reset the timer (only honored while paused and not in overtime)
    pub fn timer_reset(&mut self) {
        if let Some(session) = &mut self.timer {
            if session.engine.reset() {
                session.next_tick = None;
            }
        }
    }

    /// Finish the timer and record the measured duration on the task
    pub fn finish_timer(&mut self) -> Result<()> {
        let Some(mut session) = self.timer.take() else {
            return Ok(());
        };
        session.next_tick = None;

        if let Some(elapsed) = session.engine.finish() {
            self.store.mark_completed(session.task_id, elapsed)?;
            notifications::notify_task_done(&session.task_title);
            spawn_motivation(
                self.gateway.clone(),
                session.task_title.clone(),
                true,
                self.worker_tx.clone(),
            );
        }

        self.screen = Screen::Planner;
        self.clamp_selection();
        Ok(())
    }

    /// Leave the timer screen without completing the task
    pub fn abandon_timer(&mut self) {
        self.timer = None;
        self.screen = Screen::Planner;
    }

    /// Ask the scheduler for an optimized plan for the active day
    pub fn generate_schedule(&mut self) {
        if self.pending_schedule_day.is_some() {
            return;
        }

        let descriptors: Vec<TaskDescriptor> = self
            .store
            .pending()
            .iter()
            .map(|t| TaskDescriptor {
                title: t.title.clone(),
                subject: t.subject.clone(),
                estimated_minutes: t.estimated_minutes,
                emoji: Some(t.emoji.clone()),
            })
            .collect();
        if descriptors.is_empty() {
            return;
        }

        let day = self.store.active_day().to_string();
        self.pending_schedule_day = Some(day.clone());
        self.ui_mode = UiMode::Generating;

        spawn_optimize(
            self.gateway.clone(),
            day,
            descriptors,
            self.available_time_minutes,
            self.worker_tx.clone(),
        );
    }

    /// Adjust the "available time" hint passed to the scheduler
    pub fn adjust_available_time(&mut self, increase: bool) {
        self.available_time_minutes = match (self.available_time_minutes, increase) {
            (None, true) => Some(60),
            (None, false) => None,
            (Some(minutes), true) => Some((minutes + 15).min(MAX_ESTIMATE_MINUTES)),
            (Some(minutes), false) => {
                if minutes <= 15 {
                    None
                } else {
                    Some(minutes - 15)
                }
            }
        };
    }

    /// Switch the planner to a specific day
    pub fn jump_to_day(&mut self, day_key: &str) {
        self.store.select_day(day_key);
        self.selected_index = 0;
    }

    fn shift_day(&mut self, days: i64) {
        let Ok(date) = NaiveDate::parse_from_str(self.store.active_day(), "%Y-%m-%d") else {
            return;
        };
        let target = date + chrono::Duration::days(days);
        self.jump_to_day(&crate::store::day_key(target));
    }

    /// View the previous day's history
    pub fn select_prev_day(&mut self) {
        self.shift_day(-1);
    }

    /// View the next day
    pub fn select_next_day(&mut self) {
        self.shift_day(1);
    }

    /// Dismiss the motivational message
    pub fn dismiss_message(&mut self) {
        self.message = None;
        if self.ui_mode == UiMode::Message {
            self.ui_mode = UiMode::Normal;
        }
    }

    /// Advance timers and expire messages
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, now: Instant) {
        let mut entered_overtime: Option<String> = None;

        if let Some(session) = &mut self.timer {
            if session.engine.state() == TimerState::Running {
                // Catch up whole seconds; the deadline advances by exactly
                // one tick interval each time so nothing is lost or doubled
                while let Some(deadline) = session.next_tick {
                    if now < deadline {
                        break;
                    }
                    session.engine.tick();
                    session.next_tick = Some(deadline + ticker::timer_tick_duration());
                }

                if session.engine.is_overtime() && !session.overtime_notified {
                    session.overtime_notified = true;
                    entered_overtime = Some(session.task_title.clone());
                }
            }
        }

        if let Some(title) = entered_overtime {
            notifications::notify_overtime(&title);
        }

        if let Some(message) = &self.message {
            if now.duration_since(message.shown_at).as_secs() >= MESSAGE_DISPLAY_SECS {
                self.dismiss_message();
            }
        }
    }

    /// Drain worker thread outcomes (schedules, motivational lines)
    pub fn poll_worker(&mut self) -> Result<()> {
        while let Ok(event) = self.worker_rx.try_recv() {
            match event {
                WorkerEvent::Schedule { day_key, items } => {
                    if self.pending_schedule_day.as_deref() == Some(day_key.as_str()) {
                        self.pending_schedule_day = None;
                        if self.ui_mode == UiMode::Generating {
                            self.ui_mode = UiMode::Normal;
                        }
                    }

                    // A reply for a day we are no longer viewing is stale;
                    // applying it would rewrite the wrong day's history
                    if day_key == self.store.active_day() {
                        self.store.replace_with_schedule(items)?;
                        self.selected_index = 0;
                    }
                }
                WorkerEvent::Motivation { text } => {
                    self.message = Some(MessageState {
                        text,
                        shown_at: Instant::now(),
                    });
                    if self.ui_mode == UiMode::Normal {
                        self.ui_mode = UiMode::Message;
                    }
                }
            }
        }
        Ok(())
    }
}
