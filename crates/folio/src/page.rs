//! The scrolling page: every section laid out as one column of lines.

use std::ops::Range;

use folio_core::{ColorTheme, Section};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::contact_form::{ContactForm, Field, SendStatus};
use crate::content::{self, ABOUT, BUTTONS, NAME, POSTS, PROJECTS, SOCIALS, TAGLINE};

/// Widest the text column gets.
const COLUMN_WIDTH: u16 = 76;

/// What the page needs to lay itself out.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub width: u16,
    pub viewport_height: u16,
    pub theme: ColorTheme,
    pub now_ms: u64,
    pub year: i32,
    pub form: &'a ContactForm,
}

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            lines.push(word.drain(..width).collect());
        }
        let len = word.len();
        if len == 0 {
            continue;
        }
        if current_len > 0 && current_len + 1 + len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word);
        current_len += len;
    }
    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// The laid-out page.
#[derive(Debug, Clone)]
pub struct Page {
    lines: Vec<Line<'static>>,
    spans: Vec<(Section, Range<usize>)>,
    column: u16,
}

impl Page {
    pub fn build(ctx: &PageContext) -> Self {
        let column = ctx.width.min(COLUMN_WIDTH);
        let mut page = Self {
            lines: Vec::new(),
            spans: Vec::with_capacity(Section::ALL.len()),
            column,
        };
        for section in Section::ALL {
            let start = page.lines.len();
            let lines = match section {
                Section::Hero => hero(ctx),
                Section::Work => work(ctx, column),
                Section::About => about(ctx, column),
                Section::Blog => blog(ctx, column),
                Section::Contact => contact(ctx, column),
            };
            page.lines.extend(lines);
            page.spans.push((section, start..page.lines.len()));
        }
        page
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Rows occupied by `section`.
    pub fn span(&self, section: Section) -> Range<usize> {
        self.spans
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, range)| range.clone())
            .unwrap_or(0..0)
    }

    /// Largest useful scroll offset.
    pub fn max_scroll(&self, viewport_height: u16) -> usize {
        self.height().saturating_sub(usize::from(viewport_height))
    }

    /// Section under the top of the viewport.
    pub fn section_at(&self, row: usize) -> Section {
        self.spans
            .iter()
            .find(|(_, range)| range.contains(&row))
            .map(|(s, _)| *s)
            .unwrap_or(Section::Contact)
    }

    /// How much of `section` is on screen.
    ///
    /// Measured against the smaller of the section and the viewport, so a
    /// section taller than the screen still reaches 1.0 when it fills it.
    pub fn visible_ratio(&self, section: Section, scroll: usize, viewport_height: u16) -> f32 {
        let range = self.span(section);
        let view_end = scroll + usize::from(viewport_height);
        let visible = view_end.min(range.end).saturating_sub(scroll.max(range.start));
        let basis = range.len().min(usize::from(viewport_height));
        if basis == 0 {
            return 0.0;
        }
        visible as f32 / basis as f32
    }

    /// Draw the rows starting at `scroll` into a centred column of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, scroll: usize) {
        let column = self.column.min(area.width);
        let x = area.x + (area.width - column) / 2;
        let target = Rect::new(x, area.y, column, area.height);

        let start = scroll.min(self.lines.len());
        let end = (start + usize::from(area.height)).min(self.lines.len());
        frame.render_widget(Paragraph::new(self.lines[start..end].to_vec()), target);
    }
}

fn heading(section: Section, theme: ColorTheme) -> Vec<Line<'static>> {
    let number = Section::ALL.iter().position(|s| *s == section).unwrap_or(0) + 1;
    vec![
        Line::default(),
        Line::from(vec![
            Span::styled(format!("{number:02} "), Style::new().fg(theme.accent())),
            Span::styled(
                section.title().to_string(),
                Style::new().fg(theme.color()).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
    ]
}

fn paragraph(text: &str, width: u16, style: Style) -> impl Iterator<Item = Line<'static>> {
    wrap(text, usize::from(width))
        .into_iter()
        .map(move |line| Line::styled(line, style))
}

fn hero(ctx: &PageContext) -> Vec<Line<'static>> {
    let theme = ctx.theme;
    let buttons: Vec<Span> = BUTTONS
        .iter()
        .enumerate()
        .flat_map(|(i, label)| {
            let style = if i == 0 {
                Style::new().fg(Color::Black).bg(theme.color())
            } else {
                Style::new().fg(theme.color())
            };
            [Span::raw("  "), Span::styled(format!("[ {label} ]"), style)]
        })
        .collect();
    let socials: Vec<Span> = SOCIALS
        .iter()
        .flat_map(|(tag, handle)| {
            [
                Span::styled(format!(" {tag} "), Style::new().fg(theme.accent()).bold()),
                Span::styled(format!("{handle}  "), Style::new().dark_gray()),
            ]
        })
        .collect();

    let body = vec![
        Line::styled(NAME, Style::new().fg(theme.color()).bold()).centered(),
        Line::default(),
        Line::styled(TAGLINE, Style::new().gray()).centered(),
        Line::styled(
            content::flip_word(ctx.now_ms),
            Style::new().fg(theme.accent()).bold(),
        )
        .centered(),
        Line::default(),
        Line::from(buttons).centered(),
        Line::default(),
        Line::from(socials).centered(),
    ];

    // The hero fills the first screen with its content centred.
    let fill = usize::from(ctx.viewport_height).saturating_sub(body.len());
    let top = fill / 2;
    let mut lines = vec![Line::default(); top];
    lines.extend(body);
    lines.extend(vec![Line::default(); fill - top]);
    lines
}

fn work(ctx: &PageContext, width: u16) -> Vec<Line<'static>> {
    let theme = ctx.theme;
    let mut lines = heading(Section::Work, theme);
    for project in PROJECTS {
        lines.push(Line::styled(project.title, Style::new().white().bold()));
        lines.extend(paragraph(project.blurb, width, Style::new().gray()));
        let tags: Vec<Span> = project
            .tags
            .iter()
            .map(|tag| Span::styled(format!("#{tag}  "), Style::new().fg(theme.accent())))
            .collect();
        lines.push(Line::from(tags));
        lines.push(Line::styled(project.link, Style::new().dark_gray()));
        lines.push(Line::default());
    }
    lines
}

fn about(ctx: &PageContext, width: u16) -> Vec<Line<'static>> {
    let mut lines = heading(Section::About, ctx.theme);
    for (i, text) in ABOUT.iter().enumerate() {
        let style = if i == 0 {
            Style::new().white().italic()
        } else {
            Style::new().gray()
        };
        lines.extend(paragraph(text, width, style));
        lines.push(Line::default());
    }
    lines
}

fn blog(ctx: &PageContext, width: u16) -> Vec<Line<'static>> {
    let mut lines = heading(Section::Blog, ctx.theme);
    for post in POSTS {
        lines.extend(paragraph(post.title, width, Style::new().white().bold()));
        lines.push(Line::from(vec![
            Span::styled(post.date_label(), Style::new().green()),
            Span::styled(
                format!(" · {} min read", post.read_minutes),
                Style::new().dark_gray(),
            ),
        ]));
        lines.push(Line::styled(post.link, Style::new().dark_gray()));
        lines.push(Line::default());
    }
    lines
}

fn contact(ctx: &PageContext, width: u16) -> Vec<Line<'static>> {
    let theme = ctx.theme;
    let form = ctx.form;
    let mut lines = heading(Section::Contact, theme);
    lines.extend(paragraph(
        "Have a question or want to work together? Leave a note below.",
        width,
        Style::new().gray(),
    ));
    lines.push(Line::default());

    let value_width = usize::from(width.saturating_sub(10)).max(1);
    for field in Field::ALL {
        let focused = form.focus() == Some(field);
        let label_style = if focused {
            Style::new().fg(theme.color()).bold()
        } else {
            Style::new().dark_gray()
        };
        let mut value = form.value(field).to_string();
        if focused {
            value.push('▌');
        }
        let mut rows = wrap(&value, value_width).into_iter();
        let first = rows.next().unwrap_or_default();
        lines.push(Line::from(vec![
            Span::styled(format!("{:<8}│ ", field.label()), label_style),
            Span::styled(first, Style::new().white()),
        ]));
        for row in rows {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<8}│ ", ""), label_style),
                Span::styled(row, Style::new().white()),
            ]));
        }
    }
    lines.push(Line::default());

    let hint = if form.is_focused() {
        "Tab next field · Enter on Message sends · Esc leaves the form"
    } else {
        "Press Enter to write a message"
    };
    lines.push(Line::styled(hint, Style::new().dark_gray()));

    let status = form.status();
    if let Some(message) = status.message() {
        let style = match status {
            SendStatus::Sent => Style::new().green(),
            SendStatus::Failed(_) => Style::new().red(),
            _ => Style::new().yellow(),
        };
        lines.push(Line::styled(message.to_string(), style));
    }

    lines.push(Line::default());
    lines.push(
        Line::styled(
            format!("© {} {NAME}", ctx.year),
            Style::new().dark_gray(),
        )
        .centered(),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_contact::ContactError;

    fn form() -> ContactForm {
        ContactForm::new(Err(ContactError::MissingSetting("test".to_string())))
    }

    fn page(form: &ContactForm, viewport_height: u16) -> Page {
        Page::build(&PageContext {
            width: 100,
            viewport_height,
            theme: ColorTheme::default(),
            now_ms: 0,
            year: 2026,
            form,
        })
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert!(wrap("   ", 10).is_empty());
        assert_eq!(wrap("a b", 0), vec!["a", "b"]);
    }

    #[test]
    fn test_sections_are_contiguous_and_ordered() {
        let form = form();
        let page = page(&form, 30);
        let mut expected_start = 0;
        for section in Section::ALL {
            let span = page.span(section);
            assert_eq!(span.start, expected_start);
            assert!(!span.is_empty(), "{section:?} is empty");
            expected_start = span.end;
        }
        assert_eq!(expected_start, page.height());
    }

    #[test]
    fn test_hero_fills_the_first_screen() {
        let form = form();
        let page = page(&form, 40);
        assert_eq!(page.span(Section::Hero), 0..40);
        assert_eq!(page.section_at(0), Section::Hero);
        assert_eq!(page.section_at(40), Section::Work);
    }

    #[test]
    fn test_work_visibility() {
        let form = form();
        let page = page(&form, 30);
        let work = page.span(Section::Work);

        assert_eq!(page.visible_ratio(Section::Work, 0, 30), 0.0);
        let ratio = page.visible_ratio(Section::Work, work.start, 30);
        assert!((ratio - 1.0).abs() < f32::EPSILON);

        // a few rows peeking in from the bottom
        let peek = page.visible_ratio(Section::Work, work.start - 27, 30);
        assert!(peek > 0.0 && peek < 0.25);
    }

    #[test]
    fn test_max_scroll() {
        let form = form();
        let page = page(&form, 30);
        assert_eq!(page.max_scroll(30), page.height() - 30);
        assert_eq!(page.max_scroll(u16::MAX), 0);
    }

    #[test]
    fn test_contact_shows_status() {
        let mut form = form();
        form.focus_first();
        form.submit();
        let page = page(&form, 30);
        let text: Vec<String> = page.lines[page.span(Section::Contact)]
            .iter()
            .map(|line| line.to_string())
            .collect();
        assert!(text.iter().any(|l| l.contains("All fields are required.")));
        assert!(text.iter().any(|l| l.starts_with("Name") && l.contains('▌')));
    }
}
