use log::debug;

use super::config::CarouselConfig;
use super::track::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Mounted but never seen on screen.
    Idle,
    AutoPlaying,
    Dragging,
    /// Autoplay held off after a click or a drag release.
    CooldownPaused,
}

/// What the host has to do with its two timer slots.
///
/// The carousel never asks for a second timer in a slot without disarming
/// the first one, and a host should still treat `Arm*` as "replace".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    ArmAutoplay { period_ms: u32 },
    DisarmAutoplay,
    ArmCooldown { delay_ms: u32 },
    DisarmCooldown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub start: f64,
    pub delta: f64,
}

/// One carousel instance: index, autoplay, drag and cooldown bookkeeping.
///
/// The carousel owns no timers. Every method that changes what should be
/// scheduled returns the [`TimerCommand`]s for the host to apply, and the
/// host calls back into [`Carousel::on_autoplay_tick`] and
/// [`Carousel::on_cooldown_elapsed`] when they fire. Times are plain
/// milliseconds from whatever clock the host uses.
#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    track: Track,
    index: usize,
    phase: Phase,
    visible: bool,
    cooldown_until: Option<u64>,
    drag: Option<DragState>,
    autoplay_armed: bool,
    cooldown_armed: bool,
    mounted: bool,
}

impl Carousel {
    pub fn new(config: CarouselConfig, item_count: usize) -> Self {
        let track = Track::new(item_count, config.item_extent, config.visible_extent);
        Self {
            config,
            track,
            index: 0,
            phase: Phase::Idle,
            visible: false,
            cooldown_until: None,
            drag: None,
            autoplay_armed: false,
            cooldown_armed: false,
            mounted: true,
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    pub fn cooldown_until(&self) -> Option<u64> {
        self.cooldown_until
    }

    pub fn is_auto_playing(&self) -> bool {
        self.mounted && self.phase == Phase::AutoPlaying
    }

    #[cfg(test)]
    pub fn autoplay_armed(&self) -> bool {
        self.autoplay_armed
    }

    #[cfg(test)]
    pub fn cooldown_armed(&self) -> bool {
        self.cooldown_armed
    }

    pub fn settled_offset(&self) -> f64 {
        self.track.offset_for(self.index)
    }

    /// Offset to paint right now: the settle offset, shifted by the live
    /// drag delta while a drag is in progress.
    pub fn offset(&self) -> f64 {
        match self.drag {
            Some(drag) => self.settled_offset() - drag.delta,
            None => self.settled_offset(),
        }
    }

    // Every instance on the site loops, so the arrows only go dead when
    // there is nothing to move to.
    pub fn can_go_prev(&self) -> bool {
        self.track.stop_count() > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.track.stop_count() > 1
    }

    /// Feeds the viewport signal. The first `true` starts autoplay.
    pub fn set_visible(&mut self, visible: bool, now_ms: u64) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if !self.mounted || self.visible == visible {
            return out;
        }
        self.visible = visible;
        if !visible {
            return out;
        }
        match self.phase {
            Phase::Idle => self.resume(&mut out),
            Phase::CooldownPaused if !self.cooldown_armed && self.cooldown_elapsed(now_ms) => {
                self.resume(&mut out)
            }
            Phase::AutoPlaying | Phase::Dragging | Phase::CooldownPaused => {}
        }
        out
    }

    /// Moves one step around the ring. Schedules nothing.
    pub fn advance(&mut self, direction: Direction) {
        if self.track.is_empty() {
            return;
        }
        self.index = self.track.wrap(self.index, direction.step());
    }

    pub fn on_autoplay_tick(&mut self, _now_ms: u64) {
        if !self.is_auto_playing() {
            return;
        }
        self.advance(Direction::Forward);
        debug!("carousel autoplay advanced to {}", self.index);
    }

    pub fn on_cooldown_elapsed(&mut self, now_ms: u64) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if !self.mounted || self.phase != Phase::CooldownPaused {
            return out;
        }
        self.cooldown_armed = false;
        match self.cooldown_until {
            Some(until) if now_ms < until => {
                // fired early; wait out the rest
                let remaining = (until - now_ms).min(u32::MAX as u64) as u32;
                out.push(TimerCommand::ArmCooldown { delay_ms: remaining });
                self.cooldown_armed = true;
            }
            _ if self.visible => self.resume(&mut out),
            // stays paused until the viewport reports visible again
            _ => {}
        }
        out
    }

    pub fn manual_navigate(&mut self, direction: Direction, now_ms: u64) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if !self.accepts_navigation() {
            return out;
        }
        self.disarm_autoplay(&mut out);
        self.advance(direction);
        self.enter_cooldown(now_ms, &mut out);
        out
    }

    /// Dot navigation. Out of range indices clamp to the last stop.
    pub fn set_index_directly(&mut self, index: usize, now_ms: u64) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if !self.accepts_navigation() {
            return out;
        }
        self.disarm_autoplay(&mut out);
        self.index = self.track.clamp_index(index);
        self.enter_cooldown(now_ms, &mut out);
        out
    }

    pub fn begin_drag(&mut self, position: f64) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if !self.mounted || self.track.is_empty() || self.drag.is_some() || !position.is_finite() {
            return out;
        }
        self.drag = Some(DragState {
            start: position,
            delta: 0.0,
        });
        self.disarm_autoplay(&mut out);
        self.disarm_cooldown(&mut out);
        self.cooldown_until = None;
        self.set_phase(Phase::Dragging);
        out
    }

    pub fn update_drag(&mut self, position: f64) {
        if !position.is_finite() {
            return;
        }
        let bound = self.config.max_drag;
        if let Some(drag) = self.drag.as_mut() {
            drag.delta = (position - drag.start).max(-bound).min(bound);
        }
    }

    /// Releases the drag. Past the threshold it navigates one step, with a
    /// rightward drag going backward; otherwise it snaps back. Either way
    /// autoplay waits out a fresh cooldown.
    pub fn end_drag(&mut self, now_ms: u64) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        let Some(drag) = self.drag.take() else {
            return out;
        };
        if drag.delta.abs() > self.config.drag_threshold {
            let direction = if drag.delta > 0.0 {
                Direction::Backward
            } else {
                Direction::Forward
            };
            self.advance(direction);
        }
        self.disarm_autoplay(&mut out);
        self.enter_cooldown(now_ms, &mut out);
        out
    }

    /// Pointer cancelled by the browser: snap back without navigating.
    pub fn cancel_drag(&mut self, now_ms: u64) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if self.drag.take().is_none() {
            return out;
        }
        self.disarm_autoplay(&mut out);
        self.enter_cooldown(now_ms, &mut out);
        out
    }

    /// The caller swapped its item list.
    pub fn set_item_count(&mut self, item_count: usize) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if !self.mounted || item_count == self.track.item_count {
            return out;
        }
        self.track.item_count = item_count;
        self.refit(&mut out);
        out
    }

    /// The window the track is shown through changed size (resize, or a
    /// layout narrower than the configured extent).
    pub fn set_visible_extent(&mut self, extent: f64) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if !self.mounted || !extent.is_finite() || extent <= 0.0 {
            return out;
        }
        if (extent - self.track.visible_extent).abs() < f64::EPSILON {
            return out;
        }
        self.track.visible_extent = extent;
        self.refit(&mut out);
        out
    }

    /// Swaps in a new config without remounting. The measured window
    /// extent is dropped in favour of the configured one until the host
    /// measures again.
    pub fn set_config(&mut self, config: CarouselConfig) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if !self.mounted || config == self.config {
            return out;
        }
        let interval_changed = config.interval_ms != self.config.interval_ms;
        self.track.item_extent = config.item_extent;
        self.track.visible_extent = config.visible_extent;
        self.config = config;
        self.update_drag_bound();
        if interval_changed && self.autoplay_armed {
            self.arm_autoplay(&mut out);
        }
        self.refit(&mut out);
        out
    }

    /// Unmount. Every timer is disarmed and later calls do nothing.
    pub fn teardown(&mut self) -> Vec<TimerCommand> {
        let mut out = Vec::new();
        if !self.mounted {
            return out;
        }
        self.disarm_autoplay(&mut out);
        self.disarm_cooldown(&mut out);
        self.drag = None;
        self.cooldown_until = None;
        self.set_phase(Phase::Idle);
        self.mounted = false;
        out
    }

    /// Re-clamps the index and autoplay after the track geometry changed.
    fn refit(&mut self, out: &mut Vec<TimerCommand>) {
        self.index = self.track.clamp_index(self.index);
        if self.track.is_empty() && self.drag.take().is_some() {
            self.disarm_cooldown(out);
            self.cooldown_until = None;
            self.set_phase(if self.visible {
                Phase::AutoPlaying
            } else {
                Phase::Idle
            });
        }
        if self.phase == Phase::AutoPlaying {
            let wants_timer = self.track.stop_count() > 1;
            if wants_timer && !self.autoplay_armed {
                self.arm_autoplay(out);
            } else if !wants_timer {
                self.disarm_autoplay(out);
            }
        }
    }

    fn update_drag_bound(&mut self) {
        let bound = self.config.max_drag;
        if let Some(drag) = self.drag.as_mut() {
            drag.delta = drag.delta.max(-bound).min(bound);
        }
    }

    fn accepts_navigation(&self) -> bool {
        self.mounted && !self.track.is_empty() && self.drag.is_none()
    }

    fn cooldown_elapsed(&self, now_ms: u64) -> bool {
        self.cooldown_until.map_or(true, |until| now_ms >= until)
    }

    fn resume(&mut self, out: &mut Vec<TimerCommand>) {
        self.cooldown_until = None;
        self.set_phase(Phase::AutoPlaying);
        self.arm_autoplay(out);
    }

    fn enter_cooldown(&mut self, now_ms: u64, out: &mut Vec<TimerCommand>) {
        self.disarm_cooldown(out);
        self.cooldown_until = Some(now_ms.saturating_add(self.config.cooldown_ms as u64));
        out.push(TimerCommand::ArmCooldown {
            delay_ms: self.config.cooldown_ms,
        });
        self.cooldown_armed = true;
        self.set_phase(Phase::CooldownPaused);
    }

    fn arm_autoplay(&mut self, out: &mut Vec<TimerCommand>) {
        self.disarm_autoplay(out);
        // a single stop has nowhere to go
        if self.track.stop_count() > 1 {
            out.push(TimerCommand::ArmAutoplay {
                period_ms: self.config.interval_ms,
            });
            self.autoplay_armed = true;
        }
    }

    fn disarm_autoplay(&mut self, out: &mut Vec<TimerCommand>) {
        if self.autoplay_armed {
            out.push(TimerCommand::DisarmAutoplay);
            self.autoplay_armed = false;
        }
    }

    fn disarm_cooldown(&mut self, out: &mut Vec<TimerCommand>) {
        if self.cooldown_armed {
            out.push(TimerCommand::DisarmCooldown);
            self.cooldown_armed = false;
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!("carousel {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}
