use std::time::Duration;
use crate::constants::*;

/// Auto-play behavior. `rich` and `simple` are the two shipped presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoPlayPolicy {
    pub tick_interval: Duration,
    pub suppress_on_manual_nav: bool,
    pub cooldown: Duration,
    pub scale_transition: bool,
}

impl AutoPlayPolicy {
    /// 2s ticks; manual navigation pauses auto-play for the cooldown.
    pub fn rich() -> Self {
        Self {
            tick_interval: Duration::from_millis(RICH_TICK_MS),
            suppress_on_manual_nav: true,
            cooldown: Duration::from_millis(COOLDOWN_MS),
            scale_transition: true,
        }
    }

    /// 4s ticks; manual navigation and auto-play never interact.
    pub fn simple() -> Self {
        Self {
            tick_interval: Duration::from_millis(SIMPLE_TICK_MS),
            suppress_on_manual_nav: false,
            cooldown: Duration::ZERO,
            scale_transition: false,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn name(&self) -> &'static str {
        if self.suppress_on_manual_nav { "rich" } else { "simple" }
    }
}

impl Default for AutoPlayPolicy {
    fn default() -> Self {
        Self::rich()
    }
}
