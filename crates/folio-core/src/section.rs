//! Page sections, in display order.

/// A section of the portfolio page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    Work,
    About,
    Blog,
    Contact,
}

impl Section {
    /// All sections in the order they are composed on the page.
    pub const ALL: [Section; 5] = [
        Section::Hero,
        Section::Work,
        Section::About,
        Section::Blog,
        Section::Contact,
    ];

    /// Navigation label.
    pub fn title(self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::Work => "Work",
            Section::About => "About",
            Section::Blog => "Blog",
            Section::Contact => "Contact",
        }
    }

    /// Anchor name, as used in `#anchor` links.
    pub fn anchor(self) -> &'static str {
        match self {
            Section::Hero => "home",
            Section::Work => "work",
            Section::About => "about",
            Section::Blog => "blog",
            Section::Contact => "contact",
        }
    }

    /// Look up a section by anchor, with or without the leading `#`.
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        let anchor = anchor.trim_start_matches('#');
        Self::ALL.into_iter().find(|s| s.anchor() == anchor)
    }

    /// Map a `1`-`5` key to a section.
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }

    /// The next section, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}
