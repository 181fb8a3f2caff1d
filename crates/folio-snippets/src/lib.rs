//! Floating code snippet background for the folio portfolio.
//!
//! A small, bounded pool of code lines drifts over the page. Each snippet
//! types itself out, lingers, fades away and is replaced at a random
//! interval by a new one placed away from protected screen zones and from
//! its neighbours.
//!
//! The pieces:
//! - [`SnippetField`] owns the live snippets and implements spawning,
//!   ticking and cell reclaiming against explicit timestamps.
//! - [`EffectScheduler`] drives those three activities from timers on a
//!   single cooperative loop.
//! - [`SnippetLayer`] renders the current state into a ratatui buffer.
//! - [`SnippetEffect`] bundles all of the above for a host application.

mod bank;
mod color;
mod field;
mod placement;
mod render;
mod scheduler;
mod settings;
mod snippet;
mod state;

pub use bank::{CURSOR_CHAR, DEFAULT_BANK, default_bank};
pub use color::{hsl_to_rgb, snippet_color};
pub use field::SnippetField;
pub use placement::{GridCell, SpawnGrid};
pub use render::{SnippetLayer, alpha, cursor_visible, oscillation};
pub use scheduler::{EffectScheduler, PumpReport};
pub use settings::{EffectSettings, MsRange};
pub use snippet::{Snippet, SnippetPhase, VisualParams, reveal_count};
pub use state::SnippetEffect;
