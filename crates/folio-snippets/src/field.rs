//! The live snippet collection and the three operations that drive it.

use std::collections::HashSet;

use folio_core::{DeviceCategory, Rect, Viewport, ZoneSet, in_any_zone};
use rand::{Rng, seq::SliceRandom};
use tracing::{debug, trace};

use crate::placement::{self, GridCell, SpawnGrid};
use crate::settings::EffectSettings;
use crate::snippet::{Snippet, VisualParams};

/// Bounded pool of snippets plus the bookkeeping for placing new ones.
///
/// All operations take the current time explicitly, so the field itself
/// has no notion of a clock and can be driven deterministically.
#[derive(Debug, Clone)]
pub struct SnippetField {
    settings: EffectSettings,
    bank: Vec<String>,
    zones: ZoneSet,
    viewport: Viewport,
    category: DeviceCategory,
    grid: SpawnGrid,
    used_cells: HashSet<GridCell>,
    snippets: Vec<Snippet>,
    next_id: u64,
}

impl SnippetField {
    pub fn new(
        settings: EffectSettings,
        bank: Vec<String>,
        zones: ZoneSet,
        viewport: Viewport,
    ) -> Self {
        let category = viewport.category(settings.compact_max_columns);
        let grid = SpawnGrid::new(
            settings.grid_size(category),
            zones.for_category(category),
        );
        Self {
            settings,
            bank,
            zones,
            viewport,
            category,
            grid,
            used_cells: HashSet::new(),
            snippets: Vec::new(),
            next_id: 0,
        }
    }

    /// Live snippets, oldest first.
    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.snippets.len() >= self.settings.capacity
    }

    pub fn settings(&self) -> &EffectSettings {
        &self.settings
    }

    pub fn category(&self) -> DeviceCategory {
        self.category
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn grid(&self) -> &SpawnGrid {
        &self.grid
    }

    /// Number of grid cells handed out since the last reclaim.
    pub fn used_cells(&self) -> usize {
        self.used_cells.len()
    }

    /// Zones currently protected for this viewport.
    pub fn active_zones(&self) -> &[Rect] {
        self.zones.for_category(self.category)
    }

    /// Record a new viewport size.
    ///
    /// A category change swaps the zone preset and grid for later spawns.
    /// Live snippets stay where they are; the next tick evicts any that now
    /// sit in a protected zone.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let category = viewport.category(self.settings.compact_max_columns);
        if category != self.category {
            debug!(?category, "viewport category changed");
            self.category = category;
            self.rebuild_grid();
        }
    }

    /// Replace the protected zones.
    pub fn set_zones(&mut self, zones: ZoneSet) {
        if zones != self.zones {
            self.zones = zones;
            self.rebuild_grid();
        }
    }

    fn rebuild_grid(&mut self) {
        self.grid = SpawnGrid::new(
            self.settings.grid_size(self.category),
            self.zones.for_category(self.category),
        );
        self.used_cells.clear();
    }

    /// Attempt to create one snippet. Returns its id on success.
    ///
    /// Does nothing at capacity, with an empty content bank or with an
    /// empty viewport. A failed position search is not an error; the
    /// attempt is simply skipped.
    pub fn try_spawn<R: Rng + ?Sized>(&mut self, now_ms: u64, rng: &mut R) -> Option<u64> {
        if self.is_full() || self.bank.is_empty() || self.viewport.is_empty() {
            return None;
        }

        let zones = self.zones.for_category(self.category);
        let grid_hit = placement::grid_position(
            &self.grid,
            &self.used_cells,
            zones,
            &self.snippets,
            &self.settings,
            rng,
        );
        let position = match grid_hit {
            Some((cell, p)) => {
                self.used_cells.insert(cell);
                p
            }
            None => match placement::random_position(zones, &self.snippets, &self.settings, rng) {
                Some(p) => p,
                None => {
                    trace!(live = self.snippets.len(), "no free spawn position");
                    return None;
                }
            },
        };

        let text = self.bank.choose(rng)?.clone();
        let lifetime_ms = self.settings.lifetime_ms.sample(rng);
        self.next_id += 1;
        let snippet = Snippet::new(
            self.next_id,
            position,
            text,
            now_ms,
            lifetime_ms,
            VisualParams::random(rng),
        );
        debug!(
            id = snippet.id(),
            x = position.x,
            y = position.y,
            lifetime_ms,
            "spawned snippet"
        );
        self.snippets.push(snippet);
        Some(self.next_id)
    }

    /// Advance every snippet to `now_ms` and prune the dead ones.
    ///
    /// All snippets are judged against the same timestamp and the same zone
    /// snapshot. Returns whether anything changed; when nothing did, the
    /// collection is left as it was.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let type_speed_ms = self.settings.type_speed_ms;
        let mut changed = false;
        for snippet in &mut self.snippets {
            changed |= snippet.advance(now_ms, type_speed_ms);
        }

        let zones = self.zones.for_category(self.category);
        let before = self.snippets.len();
        self.snippets.retain(|s| {
            let expired = s.is_expired(now_ms);
            let evicted = !expired && in_any_zone(s.position(), zones);
            if expired || evicted {
                debug!(id = s.id(), expired, evicted, "removed snippet");
            }
            !(expired || evicted)
        });

        changed || self.snippets.len() != before
    }

    /// Forget used grid cells once the population has thinned out.
    ///
    /// Returns true if the set was cleared.
    pub fn reclaim_cells(&mut self) -> bool {
        if self.snippets.len() * 2 < self.settings.capacity && !self.used_cells.is_empty() {
            trace!(cells = self.used_cells.len(), "reclaimed grid cells");
            self.used_cells.clear();
            true
        } else {
            false
        }
    }

    /// Drop every live snippet and used cell.
    pub fn clear(&mut self) {
        self.snippets.clear();
        self.used_cells.clear();
    }
}
