//! Viewport geometry in percentage units.

use serde::{Deserialize, Serialize};

/// A position in viewport-percentage units (0.0-100.0 on both axes).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// An axis-aligned rectangle in viewport-percentage units.
///
/// Bounds are inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Whether the point lies inside or on the edge of the rectangle.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x1 && p.x <= self.x2 && p.y >= self.y1 && p.y <= self.y2
    }

    /// Whether `x1 <= x2` and `y1 <= y2`.
    pub fn is_well_formed(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }
}

/// Check a point against a list of protected zones.
pub fn in_any_zone(p: Point, zones: &[Rect]) -> bool {
    zones.iter().any(|zone| zone.contains(p))
}

/// Viewport size class, which selects the zone preset and grid density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCategory {
    /// Narrow terminals (the "mobile" layout).
    Compact,
    #[default]
    Wide,
}

/// Terminal viewport size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Classify the viewport; widths up to `compact_max_columns` are compact.
    pub fn category(&self, compact_max_columns: u16) -> DeviceCategory {
        if self.width <= compact_max_columns {
            DeviceCategory::Compact
        } else {
            DeviceCategory::Wide
        }
    }
}

/// The two protected zone presets, one per device category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSet {
    pub compact: Vec<Rect>,
    pub wide: Vec<Rect>,
}

impl ZoneSet {
    /// A zone set with nothing protected.
    pub fn empty() -> Self {
        Self {
            compact: Vec::new(),
            wide: Vec::new(),
        }
    }

    /// Zones that apply to the given category.
    pub fn for_category(&self, category: DeviceCategory) -> &[Rect] {
        match category {
            DeviceCategory::Compact => &self.compact,
            DeviceCategory::Wide => &self.wide,
        }
    }
}

impl Default for ZoneSet {
    /// Zones covering the hero name, the call-to-action buttons and the
    /// central decoration.
    fn default() -> Self {
        Self {
            compact: vec![
                Rect::new(10.0, 15.0, 90.0, 50.0),
                Rect::new(25.0, 65.0, 75.0, 80.0),
            ],
            wide: vec![
                Rect::new(15.0, 15.0, 65.0, 45.0),
                Rect::new(25.0, 65.0, 55.0, 75.0),
                Rect::new(45.0, 25.0, 75.0, 65.0),
            ],
        }
    }
}
