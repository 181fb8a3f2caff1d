//! Static page content.

use chrono::NaiveDate;

/// Owner's name, shown large in the hero.
pub const NAME: &str = "Rowan Ellery";

/// Lead-in for the rotating word.
pub const TAGLINE: &str = "I'm a software engineer with an interest in";

/// Words cycled through beneath the tagline.
pub const FLIP_WORDS: &[&str] = &[
    "Systems Programming",
    "Machine Learning",
    "Research",
    "Cybersecurity",
    "Interface Design",
];

/// How long each flip word stays up.
pub const FLIP_INTERVAL_MS: u64 = 2500;

/// Hero buttons.
pub const BUTTONS: [&str; 2] = ["Download CV", "View my work ↓"];

/// Short handles for the social links row.
pub const SOCIALS: &[(&str, &str)] = &[
    ("GH", "github.com/rowan-ellery"),
    ("LN", "linkedin.com/in/rowan-ellery"),
    ("EM", "rowan@ellery.dev"),
];

/// The word showing at `now_ms`.
pub fn flip_word(now_ms: u64) -> &'static str {
    let index = (now_ms / FLIP_INTERVAL_MS) as usize % FLIP_WORDS.len();
    FLIP_WORDS[index]
}

#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub blurb: &'static str,
    pub tags: &'static [&'static str],
    pub link: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Retinal Scan Triage",
        blurb: "Benchmarks six image backbones on fundus photographs, then ships \
                quantized feature extractors with a small classifier head so the \
                model fits on point-of-care hardware without giving up accuracy.",
        tags: &["Keras", "TensorFlow", "CNNs"],
        link: "github.com/rowan-ellery/retina-triage",
    },
    Project {
        title: "Kidney Disease Prediction",
        blurb: "Classifies chronic kidney disease from routine lab values. Most of \
                the work went into cleaning sparse clinical records and choosing \
                features a clinician can explain.",
        tags: &["scikit-learn", "pandas", "Data pipelines"],
        link: "github.com/rowan-ellery/ckd-predict",
    },
    Project {
        title: "Vulnerability Detection for C/C++",
        blurb: "Pre-trains a RoBERTa model with a custom tokenizer on open-source \
                C and C++ code, then fine-tunes classifiers that flag vulnerable \
                functions.",
        tags: &["Deep learning", "Static analysis", "Representation learning"],
        link: "github.com/rowan-ellery/vuln-bert",
    },
];

pub const ABOUT: &[&str] = &[
    "I study computer science and build things across the stack: responsive \
     interfaces, cloud services, and machine learning models that make it to \
     production.",
    "Whether it is a small command-line tool or a larger application, I like \
     shipping something that feels considered. I keep a running list of new \
     languages and libraries to try.",
    "Outside of coursework I run workshops for my university's computing society \
     and mentor first-year students.",
    "Away from the keyboard: anime, long walks, and far too many playlists.",
];

#[derive(Debug, Clone, Copy)]
pub struct Post {
    pub title: &'static str,
    /// Publication date as (year, month, day).
    pub date: (i32, u32, u32),
    pub read_minutes: u32,
    pub link: &'static str,
}

impl Post {
    pub fn published(&self) -> Option<NaiveDate> {
        let (y, m, d) = self.date;
        NaiveDate::from_ymd_opt(y, m, d)
    }

    /// Date as shown on the card, e.g. `Mar 14, 2025`.
    pub fn date_label(&self) -> String {
        self.published()
            .map(|d| d.format("%b %d, %Y").to_string())
            .unwrap_or_default()
    }
}

pub const POSTS: &[Post] = &[
    Post {
        title: "Jailbreaks, Poisons, and Prompts: Attacking LLMs",
        date: (2025, 3, 14),
        read_minutes: 9,
        link: "blog.ellery.dev/attacking-llms",
    },
    Post {
        title: "What is the OWASP Top 10?",
        date: (2024, 11, 2),
        read_minutes: 6,
        link: "blog.ellery.dev/owasp-top-10",
    },
    Post {
        title: "A Short History of Cyber Attacks",
        date: (2024, 7, 21),
        read_minutes: 7,
        link: "blog.ellery.dev/history-of-cyber-attacks",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_word_cycles() {
        assert_eq!(flip_word(0), FLIP_WORDS[0]);
        assert_eq!(flip_word(FLIP_INTERVAL_MS - 1), FLIP_WORDS[0]);
        assert_eq!(flip_word(FLIP_INTERVAL_MS), FLIP_WORDS[1]);
        let full_cycle = FLIP_INTERVAL_MS * FLIP_WORDS.len() as u64;
        assert_eq!(flip_word(full_cycle), FLIP_WORDS[0]);
    }

    #[test]
    fn test_post_dates_are_valid() {
        for post in POSTS {
            assert!(post.published().is_some(), "{}", post.title);
        }
        assert_eq!(POSTS[0].date_label(), "Mar 14, 2025");
    }
}
