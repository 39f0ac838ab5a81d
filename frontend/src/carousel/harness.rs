//! Simulated clock and timer host for driving a [`Carousel`] in tests.
//!
//! Applies [`TimerCommand`]s the way the browser component does, except
//! that `Arm*` stacks a new timer instead of replacing the old one. A
//! carousel that forgets to disarm shows up as two live timers.

use super::{Carousel, CarouselConfig, Direction, TimerCommand};

#[derive(Debug, Clone, Copy)]
struct SimInterval {
    next_fire: u64,
    period: u64,
}

pub struct Harness {
    pub carousel: Carousel,
    pub now: u64,
    autoplay: Vec<SimInterval>,
    cooldown: Vec<u64>,
    /// Times at which an autoplay tick was delivered.
    pub ticks: Vec<u64>,
    pub max_live_autoplay: usize,
    pub max_live_cooldown: usize,
}

impl Harness {
    pub fn new(config: CarouselConfig, item_count: usize) -> Self {
        Self {
            carousel: Carousel::new(config, item_count),
            now: 0,
            autoplay: Vec::new(),
            cooldown: Vec::new(),
            ticks: Vec::new(),
            max_live_autoplay: 0,
            max_live_cooldown: 0,
        }
    }

    pub fn live_autoplay(&self) -> usize {
        self.autoplay.len()
    }

    pub fn live_cooldown(&self) -> usize {
        self.cooldown.len()
    }

    pub fn apply(&mut self, commands: Vec<TimerCommand>) {
        for command in commands {
            match command {
                TimerCommand::ArmAutoplay { period_ms } => {
                    let period = (period_ms as u64).max(1);
                    self.autoplay.push(SimInterval {
                        next_fire: self.now + period,
                        period,
                    });
                }
                TimerCommand::DisarmAutoplay => {
                    self.autoplay.pop();
                }
                TimerCommand::ArmCooldown { delay_ms } => {
                    self.cooldown.push(self.now + delay_ms as u64);
                }
                TimerCommand::DisarmCooldown => {
                    self.cooldown.pop();
                }
            }
            self.max_live_autoplay = self.max_live_autoplay.max(self.autoplay.len());
            self.max_live_cooldown = self.max_live_cooldown.max(self.cooldown.len());
        }
    }

    /// Runs the clock forward to `until`, firing due timers in order.
    pub fn run_until(&mut self, until: u64) {
        loop {
            let next_tick = self
                .autoplay
                .iter()
                .enumerate()
                .min_by_key(|(_, timer)| timer.next_fire)
                .map(|(i, timer)| (i, timer.next_fire));
            let next_cooldown = self
                .cooldown
                .iter()
                .enumerate()
                .min_by_key(|(_, at)| **at)
                .map(|(i, at)| (i, *at));

            match (next_tick, next_cooldown) {
                (Some((i, at)), cooldown) if at <= until && cooldown.map_or(true, |(_, c)| at <= c) => {
                    self.now = at;
                    self.autoplay[i].next_fire += self.autoplay[i].period;
                    self.ticks.push(at);
                    self.carousel.on_autoplay_tick(at);
                }
                (_, Some((i, at))) if at <= until => {
                    self.now = at;
                    self.cooldown.remove(i);
                    let commands = self.carousel.on_cooldown_elapsed(at);
                    self.apply(commands);
                }
                _ => break,
            }
        }
        self.now = self.now.max(until);
    }

    pub fn set_visible(&mut self, visible: bool) {
        let commands = self.carousel.set_visible(visible, self.now);
        self.apply(commands);
    }

    pub fn click(&mut self, direction: Direction) {
        let commands = self.carousel.manual_navigate(direction, self.now);
        self.apply(commands);
    }

    pub fn dot(&mut self, index: usize) {
        let commands = self.carousel.set_index_directly(index, self.now);
        self.apply(commands);
    }

    pub fn drag(&mut self, from: f64, to: f64) {
        let commands = self.carousel.begin_drag(from);
        self.apply(commands);
        self.carousel.update_drag(to);
        let commands = self.carousel.end_drag(self.now);
        self.apply(commands);
    }

    pub fn set_item_count(&mut self, item_count: usize) {
        let commands = self.carousel.set_item_count(item_count);
        self.apply(commands);
    }

    pub fn unmount(&mut self) {
        let commands = self.carousel.teardown();
        self.apply(commands);
    }
}
