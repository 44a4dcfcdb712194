use std::time::Duration;
use tracing::{debug, trace};
use crate::error::CarouselError;
use crate::policy::AutoPlayPolicy;
use crate::slide::Slide;
use crate::state::{CarouselState, Lifecycle};
use crate::timer::{Interval, Timeout};

/// Everything that can mutate the active index. Timer ticks and user input
/// go through the same path so mutations are strictly sequential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Advance,      // Timer tick
    Next,
    Prev,
    GoTo(usize),
}

pub struct Carousel {
    slides: Vec<Slide>,
    policy: AutoPlayPolicy,
    lifecycle: Lifecycle,

    current_index: usize,
    auto_play_enabled: bool,
    transitioning: bool,

    interval: Option<Interval>, // Armed while auto-play may tick
    cooldown: Option<Timeout>,  // Pending re-enable after manual navigation
}

impl Carousel {
    pub fn mount(slides: Vec<Slide>, policy: AutoPlayPolicy) -> Result<Self, CarouselError> {
        if slides.is_empty() {
            return Err(CarouselError::NoSlides);
        }
        debug!(slides = slides.len(), policy = policy.name(), "carousel mounted");
        Ok(Self {
            interval: Some(Interval::new(policy.tick_interval)),
            cooldown: None,
            slides,
            policy,
            lifecycle: Lifecycle::Mounted,
            current_index: 0,
            auto_play_enabled: true,
            transitioning: false,
        })
    }

    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.lifecycle = Lifecycle::Unmounted;
        if self.interval.take().is_some() {
            debug!("auto-play timer cancelled");
        }
        if self.cooldown.take().is_some() {
            debug!("auto-play cooldown cancelled");
        }
        debug!("carousel unmounted");
    }

    pub fn state(&self) -> CarouselState {
        CarouselState {
            current_index: self.current_index,
            auto_play_enabled: self.auto_play_enabled,
            transitioning: self.transitioning,
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current_index]
    }

    pub fn policy(&self) -> &AutoPlayPolicy {
        &self.policy
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    /// Feed one frame of elapsed time. Returns the number of auto-play ticks
    /// that were applied.
    pub fn update(&mut self, dt: Duration) -> u32 {
        if !self.is_mounted() {
            return 0;
        }

        // 1. Cooldown: re-enable auto-play and hand the leftover time to a
        //    freshly armed interval
        let mut interval_dt = dt;
        if let Some(cooldown) = self.cooldown.as_mut() {
            match cooldown.advance(dt) {
                Some(overshoot) => {
                    self.cooldown = None;
                    self.auto_play_enabled = true;
                    self.interval = Some(Interval::new(self.policy.tick_interval));
                    interval_dt = overshoot;
                    debug!("cooldown elapsed, auto-play re-armed");
                }
                None => return 0,
            }
        }

        // 2. Auto-play interval
        let fired = match self.interval.as_mut() {
            Some(interval) if self.auto_play_enabled => interval.advance(interval_dt),
            _ => 0,
        };
        for _ in 0..fired {
            self.advance();
        }
        fired
    }

    /// One frame: ticks for the elapsed `dt` first, then the commands polled
    /// during that frame in arrival order. Rejected commands are dropped.
    pub fn step<C>(&mut self, dt: Duration, commands: C) -> u32
    where
        C: IntoIterator<Item = Command>,
    {
        let fired = self.update(dt);
        for command in commands {
            if let Err(e) = self.dispatch(command) {
                debug!(?command, error = %e, "command rejected");
            }
        }
        fired
    }

    pub fn dispatch(&mut self, command: Command) -> Result<(), CarouselError> {
        if !self.is_mounted() {
            return Err(CarouselError::Unmounted);
        }
        match command {
            Command::Advance => {
                self.advance();
                Ok(())
            }
            Command::Next => {
                self.next();
                Ok(())
            }
            Command::Prev => {
                self.prev();
                Ok(())
            }
            Command::GoTo(index) => self.go_to(index),
        }
    }

    /// Timer tick. No-op unless auto-play is enabled and mounted.
    pub fn advance(&mut self) -> bool {
        if !self.is_mounted() || !self.auto_play_enabled {
            return false;
        }
        self.set_index((self.current_index + 1) % self.slides.len());
        true
    }

    pub fn next(&mut self) {
        if !self.is_mounted() {
            return;
        }
        self.set_index((self.current_index + 1) % self.slides.len());
        self.suppress_auto_play();
    }

    pub fn prev(&mut self) {
        if !self.is_mounted() {
            return;
        }
        let len = self.slides.len();
        self.set_index((self.current_index + len - 1) % len);
        self.suppress_auto_play();
    }

    pub fn go_to(&mut self, index: usize) -> Result<(), CarouselError> {
        if !self.is_mounted() {
            return Err(CarouselError::Unmounted);
        }
        let len = self.slides.len();
        if index >= len {
            return Err(CarouselError::IndexOutOfRange { index, len });
        }
        self.set_index(index);
        self.suppress_auto_play();
        Ok(())
    }

    /// Called by the renderer once every layer has settled.
    pub fn finish_transition(&mut self) {
        self.transitioning = false;
    }

    fn set_index(&mut self, index: usize) {
        trace!(from = self.current_index, to = index, "slide change");
        self.current_index = index;
        self.transitioning = true;
    }

    // Manual navigation wins over the timer: the interval is dropped and the
    // cooldown restarts from the latest action.
    fn suppress_auto_play(&mut self) {
        if !self.policy.suppress_on_manual_nav {
            return;
        }
        self.auto_play_enabled = false;
        self.interval = None;
        self.cooldown = Some(Timeout::new(self.policy.cooldown));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn slides(n: u32) -> Vec<Slide> {
        (1..=n).map(|id| Slide::new(id, format!("c{}.jpeg", id))).collect()
    }

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn mount_starts_at_zero_with_auto_play() {
        let c = Carousel::mount(slides(3), AutoPlayPolicy::rich()).unwrap();
        assert_eq!(
            c.state(),
            CarouselState { current_index: 0, auto_play_enabled: true, transitioning: false }
        );
        assert!(c.is_mounted());
    }

    #[test]
    fn mount_rejects_empty_list() {
        assert_eq!(
            Carousel::mount(Vec::new(), AutoPlayPolicy::rich()).err(),
            Some(CarouselError::NoSlides)
        );
    }

    #[test]
    fn one_interval_advances_and_n_intervals_wrap() {
        for policy in [AutoPlayPolicy::rich(), AutoPlayPolicy::simple()] {
            let mut c = Carousel::mount(slides(3), policy).unwrap();
            assert_eq!(c.update(policy.tick_interval), 1);
            assert_eq!(c.state().current_index, 1);
            c.update(policy.tick_interval);
            c.update(policy.tick_interval);
            assert_eq!(c.state().current_index, 0);
        }
    }

    #[test]
    fn frame_steps_accumulate_to_a_tick() {
        let mut c = Carousel::mount(slides(3), AutoPlayPolicy::rich()).unwrap();
        for _ in 0..119 {
            c.update(ms(16));
        }
        assert_eq!(c.state().current_index, 0);
        c.update(ms(100));
        assert_eq!(c.state().current_index, 1);
    }

    #[test]
    fn unmount_stops_mutation() {
        let mut c = Carousel::mount(slides(3), AutoPlayPolicy::rich()).unwrap();
        c.unmount();
        assert_eq!(c.update(ms(2000)), 0);
        assert_eq!(c.state().current_index, 0);
        assert_eq!(c.dispatch(Command::Next), Err(CarouselError::Unmounted));
        c.next();
        c.prev();
        assert!(!c.advance());
        assert_eq!(c.state().current_index, 0);
        // Second unmount is a no-op
        c.unmount();
        assert!(!c.is_mounted());
    }

    #[test]
    fn rich_manual_nav_pauses_then_resumes() {
        let mut c = Carousel::mount(slides(3), AutoPlayPolicy::rich()).unwrap();
        c.next();
        assert_eq!(c.state().current_index, 1);
        assert_eq!(c.update(ms(1000)), 0);
        assert!(!c.state().auto_play_enabled);
        assert_eq!(c.update(ms(2000)), 0);
        assert!(c.state().auto_play_enabled);
        assert_eq!(c.state().current_index, 1);
    }

    #[test]
    fn rich_interval_restarts_after_cooldown() {
        let mut c = Carousel::mount(slides(3), AutoPlayPolicy::rich()).unwrap();
        c.update(ms(1500));
        c.next(); // index 1, cooldown 2000
        c.update(ms(2000)); // cooldown ends, fresh interval
        assert_eq!(c.state().current_index, 1);
        c.update(ms(1999));
        assert_eq!(c.state().current_index, 1);
        c.update(ms(1));
        assert_eq!(c.state().current_index, 2);
    }

    #[test]
    fn rich_cooldown_overshoot_feeds_interval() {
        let mut c = Carousel::mount(slides(3), AutoPlayPolicy::rich()).unwrap();
        c.next();
        // 2000 cooldown + 2000 interval in a single frame
        assert_eq!(c.update(ms(4000)), 1);
        assert_eq!(c.state().current_index, 2);
    }

    #[test]
    fn rich_second_manual_action_restarts_cooldown() {
        let mut c = Carousel::mount(slides(5), AutoPlayPolicy::rich()).unwrap();
        c.next();
        c.update(ms(1500));
        c.prev();
        c.update(ms(1500));
        assert!(!c.state().auto_play_enabled);
        c.update(ms(500));
        assert!(c.state().auto_play_enabled);
        assert_eq!(c.state().current_index, 0);
    }

    #[test]
    fn simple_manual_nav_never_pauses() {
        let mut c = Carousel::mount(slides(4), AutoPlayPolicy::simple()).unwrap();
        c.update(ms(3900));
        c.next();
        assert!(c.state().auto_play_enabled);
        // The tick schedule is untouched: fast double-advance
        assert_eq!(c.update(ms(100)), 1);
        assert_eq!(c.state().current_index, 2);
    }

    #[test]
    fn advance_is_ignored_while_suppressed() {
        let mut c = Carousel::mount(slides(3), AutoPlayPolicy::rich()).unwrap();
        c.next();
        assert!(!c.advance());
        assert_eq!(c.dispatch(Command::Advance), Ok(()));
        assert_eq!(c.state().current_index, 1);
    }

    #[test]
    fn prev_wraps_to_last() {
        let mut c = Carousel::mount(slides(3), AutoPlayPolicy::simple()).unwrap();
        c.prev();
        assert_eq!(c.state().current_index, 2);
        assert_eq!(c.current_slide().id, 3);
    }

    #[test]
    fn go_to_rejects_out_of_range() {
        let mut c = Carousel::mount(slides(3), AutoPlayPolicy::rich()).unwrap();
        assert_eq!(
            c.go_to(3),
            Err(CarouselError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(c.state().current_index, 0);
        // Rejected commands do not start a cooldown
        assert!(c.state().auto_play_enabled);
    }

    #[test]
    fn index_change_flags_transition() {
        let mut c = Carousel::mount(slides(3), AutoPlayPolicy::rich()).unwrap();
        c.dispatch(Command::GoTo(2)).unwrap();
        assert!(c.state().transitioning);
        c.finish_transition();
        assert!(!c.state().transitioning);
    }

    #[test]
    fn step_applies_tick_before_frame_commands_simple() {
        let mut c = Carousel::mount(slides(4), AutoPlayPolicy::simple()).unwrap();
        c.update(ms(3990));
        // Tick lands on 1, then Prev brings it back to 0
        assert_eq!(c.step(ms(16), [Command::Prev]), 1);
        assert_eq!(c.state().current_index, 0);
        assert!(c.state().auto_play_enabled);
    }

    #[test]
    fn step_applies_tick_before_frame_commands_rich() {
        let mut c = Carousel::mount(slides(4), AutoPlayPolicy::rich()).unwrap();
        c.update(ms(1990));
        // Tick to 1, then Next to 2 which starts the cooldown
        assert_eq!(c.step(ms(16), [Command::Next]), 1);
        assert_eq!(c.state().current_index, 2);
        assert!(!c.state().auto_play_enabled);
        // The tick already happened; the next one waits for the cooldown
        assert_eq!(c.step(ms(1999), []), 0);
        assert_eq!(c.state().current_index, 2);
    }

    #[test]
    fn step_keeps_command_order_and_skips_rejected() {
        let mut c = Carousel::mount(slides(3), AutoPlayPolicy::rich()).unwrap();
        c.step(ms(0), [Command::GoTo(2), Command::GoTo(7), Command::Next, Command::Next]);
        assert_eq!(c.state().current_index, 1);
    }

    #[test]
    fn step_after_unmount_changes_nothing() {
        let mut c = Carousel::mount(slides(3), AutoPlayPolicy::simple()).unwrap();
        c.unmount();
        assert_eq!(c.step(ms(8000), [Command::Next, Command::GoTo(2)]), 0);
        assert_eq!(c.state().current_index, 0);
    }

    fn nav_strategy() -> impl Strategy<Value = Command> {
        prop_oneof![Just(Command::Next), Just(Command::Prev), Just(Command::Advance)]
    }

    proptest! {
        #[test]
        fn index_stays_in_bounds(n in 1u32..20, cmds in prop::collection::vec(nav_strategy(), 0..64)) {
            let mut c = Carousel::mount(slides(n), AutoPlayPolicy::rich()).unwrap();
            for cmd in cmds {
                c.dispatch(cmd).unwrap();
                prop_assert!(c.state().current_index < n as usize);
            }
        }

        #[test]
        fn next_then_prev_round_trips(n in 1u32..20, start in 0usize..20) {
            let start = start % n as usize;
            let mut c = Carousel::mount(slides(n), AutoPlayPolicy::rich()).unwrap();
            c.go_to(start).unwrap();
            c.next();
            c.prev();
            prop_assert_eq!(c.state().current_index, start);
        }

        #[test]
        fn go_to_lands_exactly(n in 1u32..20, target in 0usize..20) {
            let target = target % n as usize;
            let mut c = Carousel::mount(slides(n), AutoPlayPolicy::simple()).unwrap();
            c.go_to(target).unwrap();
            prop_assert_eq!(c.state().current_index, target);
        }
    }
}
