//! TUI application state and logic.

use crate::api::{JobsApi, Stage};
use crate::core::Dashboard;

/// Actions that can be triggered by user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Up,
    Down,
    /// Open the log overlay for the highlighted job, or dismiss a notice.
    Select,
    /// Close the log overlay, or dismiss a notice.
    Close,
    /// Refresh the list, or the open job's logs while the overlay is up.
    Refresh,
    Trigger(Stage),
}

/// Main TUI application state: the dashboard controller plus cursor and
/// scroll positions, which are presentation-only.
pub struct TuiApp<C> {
    pub dashboard: Dashboard<C>,
    /// Highlighted row in the displayed (most-recent-first) job list.
    pub selected: usize,
    /// Scroll offset inside the log overlay.
    pub log_scroll: u16,
    pub running: bool,
}

impl<C: JobsApi> TuiApp<C> {
    pub fn new(client: C) -> Self {
        Self {
            dashboard: Dashboard::new(client),
            selected: 0,
            log_scroll: 0,
            running: true,
        }
    }

    /// Initial data fetch before the first render.
    pub async fn init(&mut self) {
        self.dashboard.refresh_jobs().await;
    }

    /// Periodic poll tick: refresh the job list.
    pub async fn poll_tick(&mut self) {
        self.dashboard.refresh_jobs().await;
        self.clamp_selection();
    }

    /// Handle an action and update state accordingly.
    pub async fn handle_action(&mut self, action: Action) {
        // A trigger-failure notice blocks everything until acknowledged.
        if self.dashboard.notice().is_some() {
            if matches!(action, Action::Select | Action::Close) {
                self.dashboard.acknowledge_notice();
            }
            return;
        }

        match action {
            Action::Quit => self.running = false,
            Action::Trigger(stage) => {
                if !self.dashboard.detail().is_open() {
                    self.dashboard.trigger(stage).await;
                    self.clamp_selection();
                }
            }
            Action::Select => {
                if !self.dashboard.detail().is_open() {
                    if let Some(id) = self.selected_job_id() {
                        self.log_scroll = 0;
                        self.dashboard.select(&id).await;
                    }
                }
            }
            Action::Close => {
                if self.dashboard.detail().is_open() {
                    self.dashboard.deselect();
                    self.log_scroll = 0;
                }
            }
            Action::Refresh => {
                if self.dashboard.detail().is_open() {
                    self.dashboard.refresh_selected().await;
                } else {
                    self.dashboard.refresh_jobs().await;
                    self.clamp_selection();
                }
            }
            Action::Up => self.navigate_up(),
            Action::Down => self.navigate_down(),
        }
    }

    fn navigate_up(&mut self) {
        if self.dashboard.detail().is_open() {
            self.log_scroll = self.log_scroll.saturating_sub(1);
        } else if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn navigate_down(&mut self) {
        if self.dashboard.detail().is_open() {
            self.log_scroll = self.log_scroll.saturating_add(1);
        } else if self.selected + 1 < self.dashboard.jobs().len() {
            self.selected += 1;
        }
    }

    /// Full id of the highlighted job, in display order.
    fn selected_job_id(&self) -> Option<String> {
        self.dashboard
            .jobs()
            .display_jobs()
            .nth(self.selected)
            .map(|job| job.id.clone())
    }

    /// Keep the cursor inside the list after the snapshot changed size.
    fn clamp_selection(&mut self) {
        let len = self.dashboard.jobs().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}
