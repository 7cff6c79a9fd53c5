//! Top-level view selection

/// Which screen the app shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Landing,
    Dashboard,
}

/// Two-state selector: Landing --start--> Dashboard. There is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSelector {
    current: View,
}

impl ViewSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Handle the landing screen's start signal.
    ///
    /// Returns `true` when this call moved to the dashboard, which is the
    /// caller's cue to mount it. Repeated signals are ignored.
    pub fn start(&mut self) -> bool {
        match self.current {
            View::Landing => {
                self.current = View::Dashboard;
                true
            }
            View::Dashboard => false,
        }
    }
}
