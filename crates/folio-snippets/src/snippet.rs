//! The snippet entity and the state derived from its age.

use folio_core::Point;
use rand::Rng;

/// Fraction of the lifetime spent fading in.
pub(crate) const FADE_IN_FRACTION: f32 = 0.2;
/// Fraction of the lifetime spent fading out.
pub(crate) const FADE_OUT_FRACTION: f32 = 0.25;

/// Visual parameters, randomized once at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualParams {
    /// Relative text size (0.7-0.95); large snippets render bold.
    pub scale: f32,
    /// Rotation in degrees (-3.0-3.0).
    pub rotation: f32,
    /// Peak opacity (0.6-0.8).
    pub opacity: f32,
    /// Tint hue in degrees (180-280).
    pub hue: f32,
    /// Oscillation amplitude per axis, in viewport percent.
    pub drift: Point,
    /// Oscillation phase offset in radians.
    pub phase: f32,
}

impl VisualParams {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            scale: rng.gen_range(0.7..0.95),
            rotation: rng.gen_range(-3.0..3.0),
            opacity: rng.gen_range(0.6..0.8),
            hue: rng.gen_range(180.0..280.0),
            drift: Point::new(rng.gen_range(-0.3..0.3), rng.gen_range(-0.3..0.3)),
            phase: rng.gen_range(0.0..std::f32::consts::TAU),
        }
    }
}

impl Default for VisualParams {
    fn default() -> Self {
        Self {
            scale: 0.8,
            rotation: 0.0,
            opacity: 0.7,
            hue: 220.0,
            drift: Point::default(),
            phase: 0.0,
        }
    }
}

/// Where a snippet is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetPhase {
    /// Created, nothing typed yet.
    Spawning,
    /// Part of the text is visible.
    Revealing,
    /// The whole text is visible.
    FullyRevealed,
    /// In the fade-out window before removal.
    Expiring,
}

/// Number of characters visible after `age_ms`, typing one every `type_speed_ms`.
pub fn reveal_count(age_ms: u64, type_speed_ms: u64, len: usize) -> usize {
    if type_speed_ms == 0 {
        return len;
    }
    let typed = age_ms / type_speed_ms;
    usize::try_from(typed).map_or(len, |typed| typed.min(len))
}

/// A floating, self-typing line of code.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    id: u64,
    position: Point,
    text: String,
    len: usize,
    revealed: usize,
    created_at_ms: u64,
    lifetime_ms: u64,
    visual: VisualParams,
}

impl Snippet {
    pub(crate) fn new(
        id: u64,
        position: Point,
        text: String,
        created_at_ms: u64,
        lifetime_ms: u64,
        visual: VisualParams,
    ) -> Self {
        let len = text.chars().count();
        Self {
            id,
            position,
            text,
            len,
            revealed: 0,
            created_at_ms,
            lifetime_ms,
            visual,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Anchor position in viewport percent.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of characters currently visible.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// The visible prefix of the text.
    pub fn revealed_text(&self) -> &str {
        match self.text.char_indices().nth(self.revealed) {
            Some((end, _)) => &self.text[..end],
            None => &self.text,
        }
    }

    pub fn created_at_ms(&self) -> u64 {
        self.created_at_ms
    }

    pub fn lifetime_ms(&self) -> u64 {
        self.lifetime_ms
    }

    pub fn visual(&self) -> &VisualParams {
        &self.visual
    }

    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at_ms)
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.age_ms(now_ms) >= self.lifetime_ms
    }

    /// Age as a fraction of the lifetime, clamped to 0.0-1.0.
    pub fn life_fraction(&self, now_ms: u64) -> f32 {
        if self.lifetime_ms == 0 {
            return 1.0;
        }
        (self.age_ms(now_ms) as f32 / self.lifetime_ms as f32).clamp(0.0, 1.0)
    }

    pub fn phase(&self, now_ms: u64) -> SnippetPhase {
        if self.life_fraction(now_ms) >= 1.0 - FADE_OUT_FRACTION {
            SnippetPhase::Expiring
        } else if self.revealed == 0 {
            SnippetPhase::Spawning
        } else if self.revealed < self.len {
            SnippetPhase::Revealing
        } else {
            SnippetPhase::FullyRevealed
        }
    }

    /// Bring the revealed count up to date. Returns true if it changed.
    ///
    /// The count never decreases, even if `now_ms` goes backwards.
    pub(crate) fn advance(&mut self, now_ms: u64, type_speed_ms: u64) -> bool {
        let target = reveal_count(self.age_ms(now_ms), type_speed_ms, self.len);
        if target > self.revealed {
            self.revealed = target;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(text: &str, lifetime_ms: u64) -> Snippet {
        Snippet::new(
            1,
            Point::new(10.0, 10.0),
            text.to_string(),
            0,
            lifetime_ms,
            VisualParams::default(),
        )
    }

    #[test]
    fn test_reveal_count() {
        assert_eq!(reveal_count(0, 80, 10), 0);
        assert_eq!(reveal_count(79, 80, 10), 0);
        assert_eq!(reveal_count(400, 80, 10), 5);
        assert_eq!(reveal_count(1000, 80, 10), 10);
        assert_eq!(reveal_count(u64::MAX, 1, 10), 10);
        assert_eq!(reveal_count(5, 0, 10), 10);
    }

    #[test]
    fn test_advance_types_at_fixed_speed() {
        let mut s = snippet("0123456789", 10_000);
        assert!(s.advance(400, 80));
        assert_eq!(s.revealed(), 5);
        assert_eq!(s.revealed_text(), "01234");
        assert!(!s.advance(401, 80));
        assert!(s.advance(1000, 80));
        assert_eq!(s.revealed(), 10);
        assert_eq!(s.revealed_text(), "0123456789");
    }

    #[test]
    fn test_advance_never_goes_backwards() {
        let mut s = snippet("0123456789", 10_000);
        s.advance(800, 80);
        assert!(!s.advance(100, 80));
        assert_eq!(s.revealed(), 10);
    }

    #[test]
    fn test_revealed_text_respects_char_boundaries() {
        let mut s = snippet("λx→y", 10_000);
        s.advance(160, 80);
        assert_eq!(s.revealed_text(), "λx");
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn test_expiry_boundary() {
        let s = snippet("abc", 10_000);
        assert!(!s.is_expired(9_999));
        assert!(s.is_expired(10_000));
        assert!(s.is_expired(10_001));
    }

    #[test]
    fn test_phase_progression() {
        let mut s = snippet("0123456789", 10_000);
        assert_eq!(s.phase(0), SnippetPhase::Spawning);
        s.advance(400, 80);
        assert_eq!(s.phase(400), SnippetPhase::Revealing);
        s.advance(2000, 80);
        assert_eq!(s.phase(2000), SnippetPhase::FullyRevealed);
        assert_eq!(s.phase(7500), SnippetPhase::Expiring);
    }

    #[test]
    fn test_zero_lifetime_is_immediately_done() {
        let s = snippet("abc", 0);
        assert!(s.is_expired(0));
        assert_eq!(s.life_fraction(0), 1.0);
    }
}
