use std::time::{Duration, Instant};

use chrono::{Datelike, Local};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use folio_config::Config;
use folio_core::{ColorTheme, EffectFlags, Section, Viewport};
use folio_snippets::SnippetEffect;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Position},
    style::{Color, Style, Stylize},
    text::{Line, Span},
};
use tracing::debug;

use crate::contact_form::{ContactForm, build_transport};
use crate::page::{Page, PageContext};

/// Longest wait for input when no effect timer is due.
const IDLE_POLL_MS: u64 = 100;
/// Rows reserved for the help bar.
const HELP_HEIGHT: u16 = 1;
/// Rows moved per mouse wheel notch.
const WHEEL_STEP: isize = 3;

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Master switch from config / `--no-effects`.
    effects_enabled: bool,
    theme: ColorTheme,
    flags: EffectFlags,
    effect: SnippetEffect,
    form: ContactForm,
    /// First page row on screen.
    scroll: usize,
    /// Size of the page area (terminal minus the help bar).
    viewport: Viewport,
    /// Last known mouse position.
    pointer: Option<Position>,
    /// Section named by the route's `#anchor`, scrolled to on the first step.
    landing: Option<Section>,
    started: Instant,
}

impl App {
    pub fn new(config: &Config, route: impl Into<String>, seed: Option<u64>) -> Self {
        let effects = &config.effects;
        let effect = match seed {
            Some(seed) => SnippetEffect::with_seed(
                effects.tuning.clone(),
                effects.bank(),
                effects.zones.clone(),
                seed,
            ),
            None => SnippetEffect::new(
                effects.tuning.clone(),
                effects.bank(),
                effects.zones.clone(),
            ),
        };
        let route: String = route.into();
        let (path, landing) = match route.split_once('#') {
            Some((path, anchor)) => (path.to_string(), Section::from_anchor(anchor)),
            None => (route.clone(), None),
        };
        let flags = EffectFlags {
            reduced_motion: effects.reduced_motion,
            hover_capable: config.ui.mouse,
            route: if path.is_empty() { "/".to_string() } else { path },
            anchor: landing,
            ..Default::default()
        };
        if flags.route_disables_effects() {
            debug!(route = %flags.route, "route suppresses the snippet background");
        }

        Self {
            running: false,
            effects_enabled: effects.enabled,
            theme: config.ui.theme,
            flags,
            effect,
            form: ContactForm::new(build_transport(&config.contact)),
            scroll: 0,
            viewport: Viewport::default(),
            pointer: None,
            landing,
            started: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let size = terminal.size()?;
            self.resize(size.width, size.height);

            let now = self.now_ms();
            let page = self.step(now);
            terminal.draw(|frame| self.render(frame, &page, now))?;
            self.handle_crossterm_events(&page, now)?;
        }
        self.effect.set_enabled(false, self.now_ms());
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Viewport::new(width, height.saturating_sub(HELP_HEIGHT));
        self.effect.resize(self.viewport);
    }

    fn build_page(&self, now_ms: u64) -> Page {
        Page::build(&PageContext {
            width: self.viewport.width,
            viewport_height: self.viewport.height,
            theme: self.theme,
            now_ms,
            year: Local::now().year(),
            form: &self.form,
        })
    }

    fn snippets_enabled(&self) -> bool {
        self.effects_enabled && self.flags.snippets_enabled()
    }

    /// Advance everything to `now_ms` and lay out the page for drawing.
    fn step(&mut self, now_ms: u64) -> Page {
        self.form.poll();
        let page = self.build_page(now_ms);
        if let Some(section) = self.landing.take() {
            self.jump_to(section, &page);
        }
        self.scroll = self.scroll.min(page.max_scroll(self.viewport.height));
        self.flags.work_visible_ratio =
            page.visible_ratio(Section::Work, self.scroll, self.viewport.height);

        self.effect.set_enabled(self.snippets_enabled(), now_ms);
        self.effect.update(now_ms);
        page
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame, page: &Page, now_ms: u64) {
        let [page_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(HELP_HEIGHT)])
                .areas(frame.area());

        // Snippets go down first so the page text sits on top of them.
        self.effect.render(frame, page_area, now_ms);
        page.render(frame, page_area, self.scroll);

        if self.flags.cursor_enabled()
            && let Some(pointer) = self.pointer
            && page_area.contains(pointer)
            && let Some(cell) = frame.buffer_mut().cell_mut(pointer)
        {
            cell.set_style(Style::new().fg(Color::Black).bg(self.theme.color()));
        }

        frame.render_widget(self.help_line(), help_area);
    }

    fn help_line(&self) -> Line<'static> {
        let color = self.theme.color();
        let keys: &[(&str, &str)] = if self.form.is_focused() {
            &[("Esc", " leave form  "), ("Tab", " next field  "), ("Enter", " next / send")]
        } else {
            &[
                ("q", " quit  "),
                ("j/k", " scroll  "),
                ("1-5", " jump  "),
                ("Tab", " next section  "),
                ("t", " theme  "),
                ("Enter", " contact"),
            ]
        };
        Line::from(
            keys.iter()
                .flat_map(|(key, label)| [key.bold().fg(color), Span::from(*label).dark_gray()])
                .collect::<Vec<_>>(),
        )
        .centered()
    }

    /// Reads the crossterm events and updates the state of [`App`].
    ///
    /// Waits no longer than the next effect deadline so timers fire on time.
    fn handle_crossterm_events(&mut self, page: &Page, now_ms: u64) -> color_eyre::Result<()> {
        let wait = self
            .effect
            .next_deadline_ms()
            .map_or(IDLE_POLL_MS, |due| due.saturating_sub(now_ms))
            .min(IDLE_POLL_MS);
        if event::poll(Duration::from_millis(wait))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key, page),
                Event::Mouse(mouse) => self.on_mouse_event(mouse, page),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, page: &Page) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
        {
            self.quit();
            return;
        }
        if self.form.is_focused() {
            self.on_form_key(key);
            return;
        }

        let step = usize::from(self.viewport.height.saturating_sub(2)).max(1) as isize;
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(),
            KeyCode::Char('j') | KeyCode::Down => self.scroll_by(1, page),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_by(-1, page),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(step, page),
            KeyCode::PageUp => self.scroll_by(-step, page),
            KeyCode::Home | KeyCode::Char('g') => self.scroll = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.scroll = page.max_scroll(self.viewport.height)
            }
            KeyCode::Tab => {
                let next = self.current_section(page).next();
                self.jump_to(next, page);
            }
            KeyCode::Char('t') => self.theme = self.theme.next(),
            KeyCode::Enter if self.contact_in_view(page) => {
                self.jump_to(Section::Contact, page);
                self.form.focus_first();
            }
            KeyCode::Char(c) => {
                if let Some(section) = Section::from_digit(c) {
                    self.jump_to(section, page);
                }
            }
            _ => {}
        }
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.form.blur(),
            KeyCode::Tab => self.form.focus_next(),
            KeyCode::BackTab => self.form.focus_prev(),
            KeyCode::Enter => self.form.enter(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.insert(c)
            }
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent, page: &Page) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_by(WHEEL_STEP, page),
            MouseEventKind::ScrollUp => self.scroll_by(-WHEEL_STEP, page),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.pointer = Some(Position::new(mouse.column, mouse.row));
            }
            _ => {}
        }
    }

    fn scroll_by(&mut self, rows: isize, page: &Page) {
        let max = page.max_scroll(self.viewport.height);
        self.scroll = self.scroll.saturating_add_signed(rows).min(max);
    }

    /// Scroll to a section and make it the current anchor.
    fn jump_to(&mut self, section: Section, page: &Page) {
        self.scroll = page
            .span(section)
            .start
            .min(page.max_scroll(self.viewport.height));
        self.flags.anchor = Some(section);
        debug!(anchor = section.anchor(), "jumped to section");
    }

    fn current_section(&self, page: &Page) -> Section {
        self.flags
            .anchor
            .unwrap_or_else(|| page.section_at(self.scroll))
    }

    fn contact_in_view(&self, page: &Page) -> bool {
        self.current_section(page) == Section::Contact
            || page.visible_ratio(Section::Contact, self.scroll, self.viewport.height) >= 0.5
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn press(app: &mut App, code: KeyCode, page: &Page) {
        app.on_key_event(KeyEvent::new(code, KeyModifiers::NONE), page);
    }

    fn app_with(config: &Config, route: &str) -> App {
        let mut app = App::new(config, route, Some(3));
        app.running = true;
        app.resize(120, 41);
        app
    }

    /// Step the app in 16 ms frames from `from` until `to`.
    fn run_for(app: &mut App, from: u64, to: u64) -> Page {
        let mut page = app.step(from);
        let mut now = from;
        while now < to {
            now += 16;
            page = app.step(now);
        }
        page
    }

    #[test]
    fn test_effect_runs_on_the_hero() {
        let mut app = app_with(&Config::default(), "/");
        run_for(&mut app, 0, 4_000);
        assert!(app.effect.is_running());
        assert!(!app.effect.snippets().is_empty());
    }

    #[test]
    fn test_work_anchor_tears_down_effect() {
        let mut app = app_with(&Config::default(), "/");
        let page = run_for(&mut app, 0, 4_000);
        assert!(!app.effect.snippets().is_empty());

        press(&mut app, KeyCode::Char('2'), &page);
        assert_eq!(app.flags.anchor, Some(Section::Work));
        let page = app.step(4_016);
        assert!(!app.effect.is_running());
        assert!(app.effect.snippets().is_empty());

        press(&mut app, KeyCode::Char('1'), &page);
        assert_eq!(app.scroll, 0);
        app.step(4_032);
        assert!(app.effect.is_running());
    }

    #[test]
    fn test_scrolling_work_into_view_disables_effect() {
        let mut app = app_with(&Config::default(), "/");
        let page = run_for(&mut app, 0, 1_000);
        assert!(app.effect.is_running());

        let work_start = page.span(Section::Work).start;
        for _ in 0..work_start {
            press(&mut app, KeyCode::Char('j'), &page);
        }
        app.step(1_016);
        assert!(app.flags.work_visible_ratio >= 0.25);
        assert!(app.flags.anchor.is_none());
        assert!(!app.effect.is_running());
    }

    #[test]
    fn test_disabled_routes_and_switches() {
        let mut app = app_with(&Config::default(), "/projects/rust");
        run_for(&mut app, 0, 5_000);
        assert!(!app.effect.is_running());

        let mut config = Config::default();
        config.effects.reduced_motion = true;
        let mut app = app_with(&config, "/");
        run_for(&mut app, 0, 5_000);
        assert!(app.effect.snippets().is_empty());
        assert!(!app.flags.cursor_enabled());

        let mut config = Config::default();
        config.effects.enabled = false;
        let mut app = app_with(&config, "/");
        run_for(&mut app, 0, 5_000);
        assert!(!app.effect.is_running());
    }

    #[test]
    fn test_route_anchor_lands_on_section() {
        let mut app = app_with(&Config::default(), "/#work");
        assert_eq!(app.flags.route, "/");
        let page = run_for(&mut app, 0, 4_000);
        assert_eq!(app.flags.anchor, Some(Section::Work));
        assert_eq!(app.scroll, page.span(Section::Work).start.min(page.max_scroll(40)));
        assert!(!app.effect.is_running());

        let mut app = app_with(&Config::default(), "#nope");
        assert_eq!(app.flags.route, "/");
        assert!(app.flags.anchor.is_none());
        run_for(&mut app, 0, 4_000);
        assert!(app.effect.is_running());
    }

    #[test]
    fn test_tab_cycles_sections() {
        let mut app = app_with(&Config::default(), "/");
        let page = app.step(0);
        press(&mut app, KeyCode::Tab, &page);
        assert_eq!(app.flags.anchor, Some(Section::Work));
        press(&mut app, KeyCode::Tab, &page);
        assert_eq!(app.flags.anchor, Some(Section::About));
    }

    #[test]
    fn test_form_captures_keys_until_escape() {
        let mut app = app_with(&Config::default(), "/");
        let page = app.step(0);
        press(&mut app, KeyCode::Char('5'), &page);
        press(&mut app, KeyCode::Enter, &page);
        assert!(app.form.is_focused());

        press(&mut app, KeyCode::Char('q'), &page);
        assert!(app.running);
        assert_eq!(app.form.value(crate::contact_form::Field::Name), "q");

        press(&mut app, KeyCode::Esc, &page);
        assert!(!app.form.is_focused());
        assert!(app.running);
        press(&mut app, KeyCode::Esc, &page);
        assert!(!app.running);
    }

    #[test]
    fn test_enter_outside_contact_does_nothing() {
        let mut app = app_with(&Config::default(), "/");
        let page = app.step(0);
        press(&mut app, KeyCode::Enter, &page);
        assert!(!app.form.is_focused());
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = app_with(&Config::default(), "/");
        let page = app.step(0);
        app.form.focus_first();
        app.on_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &page,
        );
        assert!(!app.running);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut app = app_with(&Config::default(), "/");
        let page = app.step(0);
        press(&mut app, KeyCode::Char('k'), &page);
        assert_eq!(app.scroll, 0);
        press(&mut app, KeyCode::End, &page);
        assert_eq!(app.scroll, page.max_scroll(app.viewport.height));
        press(&mut app, KeyCode::PageDown, &page);
        assert_eq!(app.scroll, page.max_scroll(app.viewport.height));
    }

    #[test]
    fn test_render_draws_page_and_help() {
        let mut app = app_with(&Config::default(), "/");
        let page = app.step(0);
        let mut terminal = Terminal::new(TestBackend::new(120, 42)).unwrap();
        terminal.draw(|frame| app.render(frame, &page, 0)).unwrap();

        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = (0..42u16)
            .map(|y| (0..120u16).map(|x| buffer[(x, y)].symbol().to_string()).collect())
            .collect();
        assert!(rows.iter().any(|r| r.contains(crate::content::NAME)));
        assert!(rows[41].contains("quit"));
    }
}
