//! Rendering snippets into a ratatui buffer.
//!
//! Everything here is a pure function of the snippet and the current time;
//! nothing is written back to the field.

use folio_core::Point;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::bank::CURSOR_CHAR;
use crate::color::{hsl_to_rgb, snippet_color};
use crate::snippet::{FADE_IN_FRACTION, FADE_OUT_FRACTION, Snippet};

/// Oscillation period divisor: `sin(now / OSCILLATION_DIVISOR_MS + phase)`.
const OSCILLATION_DIVISOR_MS: f32 = 2000.0;
/// Peak oscillation multiplier applied to the drift vector.
const OSCILLATION_AMPLITUDE: f32 = 2.0;
/// Cursor blink half-period.
const BLINK_MS: u64 = 500;
/// Scale at and above which snippets render bold.
const BOLD_SCALE: f32 = 0.85;
/// Below this alpha a snippet is not drawn at all.
const MIN_VISIBLE_ALPHA: f32 = 0.05;
/// Terminal cells are roughly twice as tall as wide.
const CELL_ASPECT: f32 = 0.5;

/// Opacity at `now_ms`: fade in, hold, fade out, scaled by peak opacity.
pub fn alpha(snippet: &Snippet, now_ms: u64) -> f32 {
    let life = snippet.life_fraction(now_ms);
    let fade_in = (life / FADE_IN_FRACTION).min(1.0);
    let fade_out = ((1.0 - life) / FADE_OUT_FRACTION).min(1.0);
    fade_in.min(fade_out).clamp(0.0, 1.0) * snippet.visual().opacity
}

/// Offset from the anchor position at `now_ms`, in viewport percent.
pub fn oscillation(snippet: &Snippet, now_ms: u64) -> Point {
    let visual = snippet.visual();
    let wave =
        (now_ms as f32 / OSCILLATION_DIVISOR_MS + visual.phase).sin() * OSCILLATION_AMPLITUDE;
    Point::new(visual.drift.x * wave, visual.drift.y * wave)
}

/// Whether the typing cursor is lit at `now_ms`.
pub fn cursor_visible(snippet: &Snippet, now_ms: u64) -> bool {
    snippet.revealed() < snippet.len() && (now_ms / BLINK_MS) % 2 == 0
}

/// A widget drawing the given snippets over whatever is already in the buffer.
#[derive(Debug, Clone, Copy)]
pub struct SnippetLayer<'a> {
    snippets: &'a [Snippet],
    now_ms: u64,
}

impl<'a> SnippetLayer<'a> {
    pub fn new(snippets: &'a [Snippet], now_ms: u64) -> Self {
        Self { snippets, now_ms }
    }
}

impl Widget for SnippetLayer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        for snippet in self.snippets {
            render_snippet(snippet, self.now_ms, area, buf);
        }
    }
}

fn render_snippet(snippet: &Snippet, now_ms: u64, area: Rect, buf: &mut Buffer) {
    let alpha = alpha(snippet, now_ms);
    if alpha < MIN_VISIBLE_ALPHA {
        return;
    }
    let visual = snippet.visual();

    let offset = oscillation(snippet, now_ms);
    let cx = f32::from(area.x) + (snippet.position().x + offset.x) / 100.0 * f32::from(area.width);
    let cy =
        f32::from(area.y) + (snippet.position().y + offset.y) / 100.0 * f32::from(area.height);

    // Anchor on the full text so typing grows left to right in place.
    let half = snippet.len() as f32 / 2.0;
    let start_x = (cx - half).round() as i32;
    let row = cy.round() as i32;
    let shear = visual.rotation.to_radians().tan() * CELL_ASPECT;

    let mut style = Style::new().fg(snippet_color(visual.hue, alpha));
    if visual.scale >= BOLD_SCALE {
        style = style.add_modifier(Modifier::BOLD);
    }

    let mut column = 0;
    for ch in snippet.revealed_text().chars() {
        let dy = ((column as f32 - half) * shear).round() as i32;
        put(buf, area, start_x + column, row + dy, ch, style);
        column += 1;
    }

    if cursor_visible(snippet, now_ms) {
        let dy = ((column as f32 - half) * shear).round() as i32;
        let cursor_style = Style::new().fg(hsl_to_rgb(visual.hue, 0.5, 0.9 * alpha));
        put(buf, area, start_x + column, row + dy, CURSOR_CHAR, cursor_style);
    }
}

fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, ch: char, style: Style) {
    let inside = x >= i32::from(area.left())
        && x < i32::from(area.right())
        && y >= i32::from(area.top())
        && y < i32::from(area.bottom());
    if !inside {
        return;
    }
    if let Some(cell) = buf.cell_mut((x as u16, y as u16)) {
        cell.set_char(ch).set_style(style);
    }
}
