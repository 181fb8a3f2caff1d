//! Environment signals that switch the decorative effects on and off.
//!
//! The host resolves these whenever something relevant happens (a resize,
//! a scroll, a route change) and hands the result to the effect. Nothing in
//! here reads global state.

use crate::Section;

/// Routes on which the background effect never runs.
pub const DISABLED_ROUTES: &[&str] = &["/work", "/featured-work", "/projects"];

/// Fraction of the work section that must be on screen to suppress the effect.
pub const WORK_VISIBILITY_THRESHOLD: f32 = 0.25;

/// Resolved feature flags for the decorative effects.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectFlags {
    /// User asked for reduced motion.
    pub reduced_motion: bool,
    /// The terminal reports pointer motion (mouse capture is on).
    pub hover_capable: bool,
    /// Current route path, e.g. `/`.
    pub route: String,
    /// Anchor the user last jumped to.
    pub anchor: Option<Section>,
    /// Visible fraction of the work section (0.0-1.0).
    pub work_visible_ratio: f32,
}

impl Default for EffectFlags {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            hover_capable: false,
            route: "/".to_string(),
            anchor: None,
            work_visible_ratio: 0.0,
        }
    }
}

impl EffectFlags {
    /// Whether the current route is one that disables effects.
    pub fn route_disables_effects(&self) -> bool {
        DISABLED_ROUTES
            .iter()
            .any(|prefix| self.route.starts_with(prefix))
    }

    /// Whether the floating snippet effect should run.
    pub fn snippets_enabled(&self) -> bool {
        !self.reduced_motion
            && !self.route_disables_effects()
            && self.anchor != Some(Section::Work)
            && self.work_visible_ratio < WORK_VISIBILITY_THRESHOLD
    }

    /// Whether the pointer highlight should be drawn.
    pub fn cursor_enabled(&self) -> bool {
        self.hover_capable && !self.reduced_motion
    }
}
