/// Loading-screen state: progress while content loads, then completion.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadingView {
    loaded: usize,
    total: usize,
    completed: bool,
}

impl LoadingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_progress(&mut self, loaded: usize, total: usize) {
        self.loaded = loaded.min(total);
        self.total = total;
    }

    /// Fraction of queued content that has arrived, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.loaded as f32 / self.total as f32
        }
    }

    /// Dismisses the loading screen.
    pub fn complete(&mut self) {
        if !self.completed {
            log::info!("loading complete ({}/{} items)", self.loaded, self.total);
        }
        self.completed = true;
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }
}
