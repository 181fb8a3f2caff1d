//! Core types shared by the folio crates.
//!
//! Everything in here is plain data: viewport geometry in percentage units,
//! the protected zone presets, the feature flags that gate the background
//! effect, the page sections and the color themes.

mod flags;
mod geometry;
mod section;
mod theme;

pub use flags::{EffectFlags, DISABLED_ROUTES, WORK_VISIBILITY_THRESHOLD};
pub use geometry::{DeviceCategory, Point, Rect, Viewport, ZoneSet, in_any_zone};
pub use section::Section;
pub use theme::ColorTheme;
