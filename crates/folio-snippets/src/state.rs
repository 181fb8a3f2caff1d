//! The snippet effect as a host sees it.

use folio_core::{Viewport, ZoneSet};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{Frame, layout::Rect};

use crate::field::SnippetField;
use crate::render::SnippetLayer;
use crate::scheduler::EffectScheduler;
use crate::settings::EffectSettings;
use crate::snippet::Snippet;

/// Field, scheduler and random source bundled together.
#[derive(Debug)]
pub struct SnippetEffect {
    field: SnippetField,
    scheduler: EffectScheduler,
    rng: StdRng,
}

impl SnippetEffect {
    /// Create an effect seeded from the system clock.
    pub fn new(settings: EffectSettings, bank: Vec<String>, zones: ZoneSet) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);
        Self::with_seed(settings, bank, zones, seed)
    }

    /// Create an effect with a fixed seed, for reproducible runs.
    pub fn with_seed(
        settings: EffectSettings,
        bank: Vec<String>,
        zones: ZoneSet,
        seed: u64,
    ) -> Self {
        let scheduler = EffectScheduler::new(&settings);
        Self {
            field: SnippetField::new(settings, bank, zones, Viewport::default()),
            scheduler,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn snippets(&self) -> &[Snippet] {
        self.field.snippets()
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Start or tear down the effect.
    ///
    /// Disabling clears the timers and drops every live snippet, so nothing
    /// keeps changing while no one is watching.
    pub fn set_enabled(&mut self, enabled: bool, now_ms: u64) {
        if enabled {
            self.scheduler.start(now_ms, &mut self.rng);
        } else if self.scheduler.stop() {
            self.field.clear();
        }
    }

    /// Record the current viewport size.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.field.viewport() {
            self.field.set_viewport(viewport);
        }
    }

    /// Run whatever timers are due.
    pub fn update(&mut self, now_ms: u64) {
        self.scheduler.pump(now_ms, &mut self.field, &mut self.rng);
    }

    /// Earliest time at which [`SnippetEffect::update`] has work to do.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.scheduler.next_deadline_ms()
    }

    /// Draw the snippets into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, now_ms: u64) {
        frame.render_widget(SnippetLayer::new(self.field.snippets(), now_ms), area);
    }
}
