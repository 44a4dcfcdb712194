#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Lifecycle {
    Mounted,   // Timers may run and navigation mutates state
    Unmounted, // Timers cancelled, state frozen
}

/// Snapshot of the carousel as seen by callers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CarouselState {
    pub current_index: usize,
    pub auto_play_enabled: bool,
    pub transitioning: bool,
}
