//! Tuning parameters for the snippet effect.

use folio_core::DeviceCategory;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A half-open millisecond range `[min, max)`, written as `[min, max]` in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsRange(pub u64, pub u64);

impl MsRange {
    pub fn min(&self) -> u64 {
        self.0
    }

    pub fn max(&self) -> u64 {
        self.1
    }

    /// Draw a value from the range. A degenerate range yields its minimum.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        if self.1 <= self.0 {
            self.0
        } else {
            rng.gen_range(self.0..self.1)
        }
    }
}

/// Parameters of the spawner, animator and reclaimer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    /// Maximum number of live snippets.
    pub capacity: usize,
    /// Milliseconds per revealed character.
    pub type_speed_ms: u64,
    /// Minimum distance between a new snippet and every live one, in viewport percent.
    pub min_distance: f32,
    /// Delay between spawn attempts.
    pub spawn_interval_ms: MsRange,
    /// Delay before the first spawn attempt.
    pub initial_delay_ms: MsRange,
    /// Snippet lifetime.
    pub lifetime_ms: MsRange,
    /// Animator period.
    pub tick_ms: u64,
    /// Cell reclaimer period.
    pub reclaim_ms: u64,
    /// Random offset applied around a grid cell centre, in viewport percent.
    pub cell_jitter: f32,
    /// Random positions tried when no grid cell qualifies.
    pub fallback_attempts: u32,
    /// Grid cells per axis on wide viewports.
    pub grid_wide: u16,
    /// Grid cells per axis on compact viewports.
    pub grid_compact: u16,
    /// Widest viewport, in columns, still treated as compact.
    pub compact_max_columns: u16,
}

impl Default for EffectSettings {
    fn default() -> Self {
        Self {
            capacity: 5,
            type_speed_ms: 80,
            min_distance: 15.0,
            spawn_interval_ms: MsRange(2000, 3500),
            initial_delay_ms: MsRange(500, 1000),
            lifetime_ms: MsRange(10_000, 15_000),
            tick_ms: 16,
            reclaim_ms: 5000,
            cell_jitter: 5.0,
            fallback_attempts: 100,
            grid_wide: 12,
            grid_compact: 8,
            compact_max_columns: 100,
        }
    }
}

impl EffectSettings {
    /// Grid density for a device category.
    pub fn grid_size(&self, category: DeviceCategory) -> u16 {
        match category {
            DeviceCategory::Compact => self.grid_compact,
            DeviceCategory::Wide => self.grid_wide,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_range_sample_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = MsRange(2000, 3500);
        for _ in 0..500 {
            let v = range.sample(&mut rng);
            assert!((2000..3500).contains(&v));
        }
    }

    #[test]
    fn test_degenerate_range() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(MsRange(100, 100).sample(&mut rng), 100);
        assert_eq!(MsRange(300, 100).sample(&mut rng), 300);
    }

    #[test]
    fn test_grid_size_by_category() {
        let settings = EffectSettings::default();
        assert_eq!(settings.grid_size(DeviceCategory::Wide), 12);
        assert_eq!(settings.grid_size(DeviceCategory::Compact), 8);
    }
}
