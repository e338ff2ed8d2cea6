//! Wave scheduler: a repeating `[gap][wave]` timeline.
//!
//! The wave index and phase are always recomputed from the scheduler clock,
//! never stored, so they cannot drift. During the active portion of a wave,
//! spawns are due at a cadence that shortens with every wave index.

use std::f64::consts::TAU;

use rand::Rng;

use hexsurvival_core::config::WaveTuning;
use hexsurvival_core::enums::WavePhase;
use hexsurvival_core::types::WorldPoint;

/// Position on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveState {
    pub wave_index: u32,
    pub is_gap: bool,
}

impl WaveState {
    pub fn phase(&self) -> WavePhase {
        if self.is_gap {
            WavePhase::Gap
        } else {
            WavePhase::Active
        }
    }
}

/// A phase change observed by one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveTransition {
    /// The active portion of this wave began.
    Started(u32),
    /// This wave's active portion is over; the next gap began.
    Ended(u32),
}

/// Result of one `advance` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveTick {
    pub transition: Option<WaveTransition>,
    /// An enemy should be spawned on the ring this tick.
    pub spawn_due: bool,
}

type WaveCallback = Box<dyn FnMut(u32) + Send>;

/// Drives the wave timeline from a local clock.
pub struct WaveScheduler {
    tuning: WaveTuning,
    clock: f64,
    last_spawn_at: Option<f64>,
    on_start: Vec<WaveCallback>,
    on_end: Vec<WaveCallback>,
}

impl WaveScheduler {
    pub fn new(tuning: WaveTuning) -> Self {
        Self {
            tuning,
            clock: 0.0,
            last_spawn_at: None,
            on_start: Vec::new(),
            on_end: Vec::new(),
        }
    }

    pub fn tuning(&self) -> &WaveTuning {
        &self.tuning
    }

    /// Seconds since the last reset.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    fn period(&self) -> f64 {
        self.tuning.gap_secs + self.tuning.wave_secs
    }

    /// Timeline position at `t` seconds. Negative times count as zero.
    pub fn wave_state_at(&self, t: f64) -> WaveState {
        let t = t.max(0.0);
        let period = self.period();
        WaveState {
            wave_index: (t / period).floor() as u32,
            is_gap: t.rem_euclid(period) < self.tuning.gap_secs,
        }
    }

    /// Timeline position now.
    pub fn state(&self) -> WaveState {
        self.wave_state_at(self.clock)
    }

    /// Seconds left in the current gap or active portion.
    pub fn phase_remaining_secs(&self) -> f64 {
        let into_period = self.clock.max(0.0).rem_euclid(self.period());
        if into_period < self.tuning.gap_secs {
            self.tuning.gap_secs - into_period
        } else {
            self.period() - into_period
        }
    }

    /// Spawn cadence for a wave: `max(floor, base - index * decrement)`.
    pub fn spawn_gap_secs(&self, wave_index: u32) -> f64 {
        let t = &self.tuning;
        (t.spawn_gap_base_secs - wave_index as f64 * t.spawn_gap_decrement_secs)
            .max(t.spawn_gap_floor_secs)
    }

    /// Register a callback fired with the wave index when a wave starts.
    pub fn on_wave_start(&mut self, callback: impl FnMut(u32) + Send + 'static) {
        self.on_start.push(Box::new(callback));
    }

    /// Register a callback fired with the wave index when a wave ends.
    pub fn on_wave_end(&mut self, callback: impl FnMut(u32) + Send + 'static) {
        self.on_end.push(Box::new(callback));
    }

    /// Zero the clock and the last-spawn timestamp. Callbacks stay registered.
    pub fn reset(&mut self) {
        self.clock = 0.0;
        self.last_spawn_at = None;
    }

    /// Advance the clock by `dt` seconds.
    ///
    /// Reports at most one transition per call, judged from the final state:
    /// landing in an active portion starts that wave, landing in a gap ends
    /// the previous one. A gap-to-gap jump across whole periods still ends
    /// the wave just before the landing gap.
    pub fn advance(&mut self, dt: f64) -> WaveTick {
        let before = self.state();
        self.clock += dt.max(0.0);
        let after = self.state();

        let transition = if before == after {
            None
        } else if !after.is_gap {
            Some(WaveTransition::Started(after.wave_index))
        } else if after.wave_index >= 1 {
            Some(WaveTransition::Ended(after.wave_index - 1))
        } else {
            None
        };

        match transition {
            Some(WaveTransition::Started(index)) => {
                tracing::info!("Wave {} started", index);
                for callback in &mut self.on_start {
                    callback(index);
                }
            }
            Some(WaveTransition::Ended(index)) => {
                tracing::info!("Wave {} ended", index);
                for callback in &mut self.on_end {
                    callback(index);
                }
            }
            None => {}
        }

        let spawn_due = !after.is_gap
            && self
                .last_spawn_at
                .is_none_or(|at| self.clock - at >= self.spawn_gap_secs(after.wave_index));
        if spawn_due {
            self.last_spawn_at = Some(self.clock);
        }

        WaveTick {
            transition,
            spawn_due,
        }
    }

    /// Uniform angle on a ring of `ring_spawn_distance` around `center`.
    pub fn ring_spawn_point(&self, center: WorldPoint, rng: &mut impl Rng) -> WorldPoint {
        ring_point(center, self.tuning.ring_spawn_distance, rng)
    }
}

/// A point at exactly `radius` from `center`, at a uniformly random angle.
pub fn ring_point(center: WorldPoint, radius: f64, rng: &mut impl Rng) -> WorldPoint {
    let angle: f64 = rng.gen_range(0.0..TAU);
    WorldPoint::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}
