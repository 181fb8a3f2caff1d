//! Spawn position search: a shuffled grid first, random sampling second.

use std::collections::HashSet;

use folio_core::{Point, Rect, in_any_zone};
use rand::{Rng, seq::SliceRandom};

use crate::settings::EffectSettings;
use crate::snippet::Snippet;

/// Bounds of the fallback sampling square, in viewport percent.
const FALLBACK_MIN: f32 = 5.0;
const FALLBACK_MAX: f32 = 95.0;
/// Grid jitter is capped at half the viewport.
const MAX_JITTER: f32 = 50.0;

/// One cell of the spawn grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: u16,
    pub col: u16,
}

/// The lattice of candidate cells for one zone preset.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnGrid {
    size: u16,
    cells: Vec<GridCell>,
}

impl SpawnGrid {
    /// Build a `size` x `size` grid, keeping only cells whose centre is
    /// outside every zone.
    pub fn new(size: u16, zones: &[Rect]) -> Self {
        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |col| GridCell { row, col }))
            .filter(|cell| !in_any_zone(cell_center(*cell, size), zones))
            .collect();
        Self { size, cells }
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    /// Candidate cells, in row-major order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Centre of a cell in viewport percent.
    pub fn center(&self, cell: GridCell) -> Point {
        cell_center(cell, self.size)
    }
}

fn cell_center(cell: GridCell, size: u16) -> Point {
    let step = 100.0 / f32::from(size.max(1));
    Point::new(
        f32::from(cell.col) * step + step / 2.0,
        f32::from(cell.row) * step + step / 2.0,
    )
}

/// Whether `p` is closer than `min_distance` to any live snippet.
pub(crate) fn too_close(p: Point, live: &[Snippet], min_distance: f32) -> bool {
    live.iter().any(|s| s.position().distance(p) < min_distance)
}

fn is_clear(p: Point, zones: &[Rect], live: &[Snippet], min_distance: f32) -> bool {
    !in_any_zone(p, zones) && !too_close(p, live, min_distance)
}

/// Try the grid strategy. Returns the chosen cell and the (jittered) position.
pub(crate) fn grid_position<R: Rng + ?Sized>(
    grid: &SpawnGrid,
    used: &HashSet<GridCell>,
    zones: &[Rect],
    live: &[Snippet],
    settings: &EffectSettings,
    rng: &mut R,
) -> Option<(GridCell, Point)> {
    let mut candidates: Vec<GridCell> = grid
        .cells()
        .iter()
        .copied()
        .filter(|cell| !used.contains(cell))
        .collect();
    candidates.shuffle(rng);

    let jitter = settings.cell_jitter.clamp(0.0, MAX_JITTER);
    candidates.into_iter().find_map(|cell| {
        let center = grid.center(cell);
        let p = if jitter > 0.0 {
            Point::new(
                (center.x + rng.gen_range(-jitter..jitter)).clamp(0.0, 100.0),
                (center.y + rng.gen_range(-jitter..jitter)).clamp(0.0, 100.0),
            )
        } else {
            center
        };
        is_clear(p, zones, live, settings.min_distance).then_some((cell, p))
    })
}

/// Try the fallback strategy: uniform samples in the inner square.
pub(crate) fn random_position<R: Rng + ?Sized>(
    zones: &[Rect],
    live: &[Snippet],
    settings: &EffectSettings,
    rng: &mut R,
) -> Option<Point> {
    (0..settings.fallback_attempts).find_map(|_| {
        let p = Point::new(
            rng.gen_range(FALLBACK_MIN..FALLBACK_MAX),
            rng.gen_range(FALLBACK_MIN..FALLBACK_MAX),
        );
        is_clear(p, zones, live, settings.min_distance).then_some(p)
    })
}
