//! Timers that drive a [`SnippetField`] from a single cooperative loop.
//!
//! The host calls [`EffectScheduler::pump`] from its frame loop with the
//! current time. Every due callback runs to completion before the next one
//! starts, so the field needs no locking. Missed periods collapse into one
//! run: the tick always works from the latest timestamp anyway.

use rand::Rng;
use tracing::info;

use crate::field::SnippetField;
use crate::settings::{EffectSettings, MsRange};

/// Fixed-period timer. `None` means cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Interval {
    period_ms: u64,
    next_due_ms: Option<u64>,
}

impl Interval {
    fn new(period_ms: u64) -> Self {
        Self {
            period_ms: period_ms.max(1),
            next_due_ms: None,
        }
    }

    fn arm(&mut self, now_ms: u64) {
        self.next_due_ms = Some(now_ms.saturating_add(self.period_ms));
    }

    fn clear(&mut self) {
        self.next_due_ms = None;
    }

    /// Fire if due, re-arming from `now_ms`.
    fn poll(&mut self, now_ms: u64) -> bool {
        match self.next_due_ms {
            Some(due) if now_ms >= due => {
                self.arm(now_ms);
                true
            }
            _ => false,
        }
    }
}

/// What a single [`EffectScheduler::pump`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// The animator ran.
    pub ticked: bool,
    /// The animator changed the field.
    pub changed: bool,
    /// A spawn attempt ran.
    pub attempted_spawn: bool,
    /// Id of the snippet created by the spawn attempt.
    pub spawned: Option<u64>,
    /// The cell reclaimer cleared the used-cell set.
    pub reclaimed: bool,
}

/// The spawn, tick and reclaim loops.
#[derive(Debug, Clone)]
pub struct EffectScheduler {
    tick: Interval,
    reclaim: Interval,
    spawn_due_ms: Option<u64>,
    spawn_interval: MsRange,
    initial_delay: MsRange,
}

impl EffectScheduler {
    pub fn new(settings: &EffectSettings) -> Self {
        Self {
            tick: Interval::new(settings.tick_ms),
            reclaim: Interval::new(settings.reclaim_ms),
            spawn_due_ms: None,
            spawn_interval: settings.spawn_interval_ms,
            initial_delay: settings.initial_delay_ms,
        }
    }

    pub fn is_running(&self) -> bool {
        self.spawn_due_ms.is_some()
            || self.tick.next_due_ms.is_some()
            || self.reclaim.next_due_ms.is_some()
    }

    /// Arm all three timers. Does nothing if already running.
    pub fn start<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) {
        if self.is_running() {
            return;
        }
        let delay = self.initial_delay.sample(rng);
        self.spawn_due_ms = Some(now_ms.saturating_add(delay));
        self.tick.arm(now_ms);
        self.reclaim.arm(now_ms);
        info!(first_spawn_in_ms = delay, "snippet effect started");
    }

    /// Clear all timers. Safe to call any number of times.
    ///
    /// Returns true if the scheduler was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        self.spawn_due_ms = None;
        self.tick.clear();
        self.reclaim.clear();
        if was_running {
            info!("snippet effect stopped");
        }
        was_running
    }

    /// Earliest time at which a timer fires, if any is armed.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        [
            self.spawn_due_ms,
            self.tick.next_due_ms,
            self.reclaim.next_due_ms,
        ]
        .into_iter()
        .flatten()
        .min()
    }

    /// Run every callback that is due at `now_ms`: tick, spawn, reclaim.
    pub fn pump<R: Rng + ?Sized>(
        &mut self,
        now_ms: u64,
        field: &mut SnippetField,
        rng: &mut R,
    ) -> PumpReport {
        let mut report = PumpReport::default();

        if self.tick.poll(now_ms) {
            report.ticked = true;
            report.changed = field.tick(now_ms);
        }

        if let Some(due) = self.spawn_due_ms
            && now_ms >= due
        {
            report.attempted_spawn = true;
            report.spawned = field.try_spawn(now_ms, rng);
            // re-armed only once the attempt has finished
            let delay = self.spawn_interval.sample(rng);
            self.spawn_due_ms = Some(now_ms.saturating_add(delay));
        }

        if self.reclaim.poll(now_ms) {
            report.reclaimed = field.reclaim_cells();
        }

        report
    }
}
