//! The stopwatch screen.
//!
//! [`StopwatchApp`] ties a [`TimerControlSurface`] to the widgets. It maps
//! input events to commands, keeps the buttons and panel in step with the
//! running state, and composes frames. It never touches the terminal: the
//! main loop feeds it events and ticks and presents what it renders, so the
//! whole screen is testable with a [`ManualClock`](crate::stopwatch::ManualClock).

use crate::actor::{InputEvent, KeyCode};
use crate::buffer::{Buffer, Style};
use crate::layout::{Rect, StopwatchLayout};
use crate::stopwatch::{Clock, Command, MonotonicClock, Outcome, TimerControlSurface};
use crate::theme::{Theme, ThemeName};
use crate::widget::{Button, ButtonVariant, StatusBar, TimeDisplay, Widget};

/// Key hints shown in the footer.
const KEY_HINTS: [(&str, &str); 5] = [
    ("s", "Start"),
    ("t", "Stop"),
    ("r", "Reset"),
    ("h", "Header"),
    ("q", "Quit"),
];

/// Screen settings chosen at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Title shown in the header.
    pub title: String,
    /// Palette.
    pub theme: ThemeName,
    /// Whether the header and footer start visible.
    pub show_chrome: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Stopwatch".to_string(),
            theme: ThemeName::default(),
            show_chrome: false,
        }
    }
}

/// What the main loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Nothing visible changed.
    None,
    /// Render and present a frame.
    Redraw,
    /// Render, then pause or resume the refresh ticker.
    RunningChanged(bool),
    /// Leave the main loop.
    Quit,
}

/// Which button slot holds keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    /// Start or Stop, whichever is shown.
    Toggle,
    Reset,
}

/// One stopwatch on one screen.
#[derive(Debug)]
pub struct StopwatchApp<C: Clock = MonotonicClock> {
    control: TimerControlSurface<C>,
    theme: Theme,
    title: String,
    chrome_visible: bool,
    layout: StopwatchLayout,
    width: u16,
    height: u16,
    header: StatusBar,
    footer: StatusBar,
    display: TimeDisplay,
    start: Button,
    stop: Button,
    reset: Button,
    focus: Focus,
    /// Set for changes outside any widget (panel color, layout).
    dirty: bool,
}

impl StopwatchApp<MonotonicClock> {
    /// Create the screen on the system clock.
    pub fn new(config: AppConfig, width: u16, height: u16) -> Self {
        Self::with_clock(config, MonotonicClock, width, height)
    }
}

impl<C: Clock> StopwatchApp<C> {
    /// Create the screen reading time from `clock`.
    pub fn with_clock(config: AppConfig, clock: C, width: u16, height: u16) -> Self {
        let mut header = StatusBar::new(Rect::ZERO);
        header.set_center(config.title.clone());
        let mut footer = StatusBar::new(Rect::ZERO);
        footer.set_hints(KEY_HINTS);

        let mut app = Self {
            control: TimerControlSurface::with_clock(clock),
            theme: Theme::named(config.theme),
            title: config.title,
            chrome_visible: config.show_chrome,
            layout: StopwatchLayout::compute(width, height, config.show_chrome),
            width,
            height,
            header,
            footer,
            display: TimeDisplay::new(),
            start: Button::new("Start", ButtonVariant::Success),
            stop: Button::new("Stop", ButtonVariant::Error),
            reset: Button::new("Reset", ButtonVariant::Default),
            focus: Focus::Toggle,
            dirty: true,
        };
        app.relayout();
        app.sync_presentation();
        app
    }

    /// Handle one input event.
    pub fn handle_event(&mut self, event: &InputEvent) -> AppAction {
        match event {
            InputEvent::Key { code: KeyCode::Char('c'), modifiers } if modifiers.control => {
                AppAction::Quit
            }
            InputEvent::Key { code, .. } => self.handle_key(*code, event),
            InputEvent::MouseDown(_) => self.press_buttons(event),
            InputEvent::MouseUp(_) => AppAction::None,
            InputEvent::Resize { width, height } => {
                self.resize(*width, *height);
                AppAction::Redraw
            }
            InputEvent::Error(message) => {
                log::warn!("input error: {message}");
                AppAction::None
            }
            InputEvent::Shutdown => AppAction::Quit,
        }
    }

    fn handle_key(&mut self, code: KeyCode, event: &InputEvent) -> AppAction {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
            KeyCode::Char('s') => self.run(Command::Start),
            KeyCode::Char('t') => self.run(Command::Stop),
            KeyCode::Char('r') => self.run(Command::Reset),
            KeyCode::Char('h') => {
                self.toggle_chrome();
                AppAction::Redraw
            }
            // Two slots, so forward and backward land on the same button.
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => self.move_focus(),
            KeyCode::Enter | KeyCode::Char(' ') => self.press_buttons(event),
            KeyCode::Char(_) => AppAction::None,
        }
    }

    /// Refresh the display from the clock.
    ///
    /// Returns `true` if the shown text changed and a frame is due.
    pub fn tick(&mut self) -> bool {
        self.display.set_elapsed(self.control.current_elapsed())
    }

    /// Apply a command as if its button had been pressed.
    pub fn run(&mut self, command: Command) -> AppAction {
        let outcome = self.control.apply(command);
        match outcome {
            Outcome::Transition(signal) => {
                self.sync_presentation();
                self.tick();
                AppAction::RunningChanged(signal.running)
            }
            Outcome::Cleared => {
                self.tick();
                AppAction::Redraw
            }
            Outcome::Ignored => AppAction::None,
        }
    }

    /// Show or hide the header and footer together.
    pub fn toggle_chrome(&mut self) {
        self.chrome_visible = !self.chrome_visible;
        log::debug!("chrome {}", if self.chrome_visible { "shown" } else { "hidden" });
        self.relayout();
    }

    /// Lay the screen out for a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.relayout();
    }

    /// Compose a frame into `buffer`.
    pub fn render(&mut self, buffer: &mut Buffer) {
        let background = Style::new(self.theme.foreground, self.theme.background);
        buffer.fill_rect(buffer.area(), background.cell(' '));

        let panel_bg = if self.control.is_running() { self.theme.success_muted } else { self.theme.surface };
        buffer.fill_rect(self.layout.panel, Style::new(self.theme.foreground, panel_bg).cell(' '));

        self.display.render(buffer, &self.theme);
        self.start.render(buffer, &self.theme);
        self.stop.render(buffer, &self.theme);
        self.reset.render(buffer, &self.theme);
        self.header.render(buffer, &self.theme);
        self.footer.render(buffer, &self.theme);

        self.display.clear_redraw();
        self.start.clear_redraw();
        self.stop.clear_redraw();
        self.reset.clear_redraw();
        self.header.clear_redraw();
        self.footer.clear_redraw();
        self.dirty = false;
    }

    /// Whether anything changed since the last [`render`](Self::render).
    pub fn needs_redraw(&self) -> bool {
        self.dirty
            || self.display.needs_redraw()
            || self.start.needs_redraw()
            || self.stop.needs_redraw()
            || self.reset.needs_redraw()
            || self.header.needs_redraw()
            || self.footer.needs_redraw()
    }

    /// The control surface.
    pub const fn control(&self) -> &TimerControlSurface<C> {
        &self.control
    }

    /// Whether the stopwatch is running.
    pub const fn is_running(&self) -> bool {
        self.control.is_running()
    }

    /// Whether the header and footer are shown.
    pub const fn chrome_visible(&self) -> bool {
        self.chrome_visible
    }

    /// Current layout.
    pub const fn layout(&self) -> &StopwatchLayout {
        &self.layout
    }

    /// Text currently shown by the time display.
    pub fn display_text(&self) -> &str {
        self.display.text()
    }

    /// Header title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The palette in use.
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// The Start, Stop and Reset buttons.
    pub const fn buttons(&self) -> [&Button; 3] {
        [&self.start, &self.stop, &self.reset]
    }

    fn relayout(&mut self) {
        self.layout = StopwatchLayout::compute(self.width, self.height, self.chrome_visible);
        log::debug!(
            "layout {}x{} chrome={} compact={}",
            self.width,
            self.height,
            self.chrome_visible,
            self.layout.compact
        );

        self.header.set_bounds(self.layout.header.unwrap_or(Rect::ZERO));
        self.header.set_visible(self.layout.header.is_some());
        self.footer.set_bounds(self.layout.footer.unwrap_or(Rect::ZERO));
        self.footer.set_visible(self.layout.footer.is_some());

        self.display.set_bounds(self.layout.display);
        self.start.set_bounds(self.layout.toggle_button);
        self.stop.set_bounds(self.layout.toggle_button);
        self.reset.set_bounds(self.layout.reset_button);
        self.dirty = true;
    }

    /// Restyle for the current state: Start or Stop, Reset enablement,
    /// display styling and the header's state label.
    fn sync_presentation(&mut self) {
        let running = self.control.is_running();
        self.start.set_visible(!running);
        self.stop.set_visible(running);
        self.reset.set_enabled(self.control.is_enabled(Command::Reset));
        self.display.set_active(running);
        self.header.set_right(if running { "running" } else { "stopped" });
        if !self.reset.is_interactive() {
            self.focus = Focus::Toggle;
        }
        self.apply_focus();
        self.dirty = true;
    }

    fn move_focus(&mut self) -> AppAction {
        let next = match self.focus {
            Focus::Toggle if self.reset.is_interactive() => Focus::Reset,
            Focus::Toggle | Focus::Reset => Focus::Toggle,
        };
        if next == self.focus {
            return AppAction::None;
        }
        self.focus = next;
        self.apply_focus();
        AppAction::Redraw
    }

    fn apply_focus(&mut self) {
        let toggle = self.focus == Focus::Toggle;
        self.start.set_focused(toggle);
        self.stop.set_focused(toggle);
        self.reset.set_focused(!toggle);
    }

    /// Offer a click or Enter/Space to the buttons and run what was pressed.
    fn press_buttons(&mut self, event: &InputEvent) -> AppAction {
        // Start and Stop share a slot; only the visible one reacts.
        self.start.handle_input(event);
        self.stop.handle_input(event);
        self.reset.handle_input(event);

        let command = if self.start.take_pressed() {
            Command::Start
        } else if self.stop.take_pressed() {
            Command::Stop
        } else if self.reset.take_pressed() {
            Command::Reset
        } else {
            return AppAction::None;
        };

        let clicked = matches!(event, InputEvent::MouseDown(_));
        if clicked {
            self.focus = if command == Command::Reset { Focus::Reset } else { Focus::Toggle };
            self.apply_focus();
        }
        match self.run(command) {
            AppAction::None if clicked => AppAction::Redraw,
            action => action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::KeyModifiers;
    use crate::stopwatch::ManualClock;
    use std::time::Duration;

    fn app() -> (StopwatchApp<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let app = StopwatchApp::with_clock(AppConfig::default(), clock.clone(), 80, 24);
        (app, clock)
    }

    fn key(ch: char) -> InputEvent {
        InputEvent::key(KeyCode::Char(ch))
    }

    fn rendered(app: &mut StopwatchApp<ManualClock>) -> Buffer {
        let mut buffer = Buffer::new(80, 24);
        app.render(&mut buffer);
        buffer
    }

    #[test]
    fn test_initial_screen() {
        let (mut app, _) = app();
        assert!(!app.is_running());
        assert!(!app.chrome_visible());
        assert_eq!(app.display_text(), "00:00:00.00");

        let buffer = rendered(&mut app);
        // Large digits, centered in the display row band.
        assert!(buffer.row_text(8).contains("╭─╮╭─╮"));
        let labels = buffer.row_text(13);
        assert!(labels.contains("Start"));
        assert!(labels.contains("Reset"));
        assert!(!labels.contains("Stop"));
    }

    #[test]
    fn test_start_swaps_buttons_and_disables_reset() {
        let (mut app, _) = app();
        assert_eq!(app.handle_event(&key('s')), AppAction::RunningChanged(true));

        let [start, stop, reset] = app.buttons();
        assert!(!start.is_visible());
        assert!(stop.is_visible());
        assert!(!reset.is_enabled());

        let buffer = rendered(&mut app);
        assert!(buffer.row_text(13).contains("Stop"));
        assert!(!buffer.row_text(13).contains("Start"));
    }

    #[test]
    fn test_panel_background_follows_state() {
        let (mut app, _) = app();
        let panel = app.layout().panel;

        let buffer = rendered(&mut app);
        let idle = buffer.get(panel.x, panel.y).unwrap().bg();
        assert_eq!(idle, app.theme().surface);

        app.handle_event(&key('s'));
        let buffer = rendered(&mut app);
        let running = buffer.get(panel.x, panel.y).unwrap().bg();
        assert_eq!(running, app.theme().success_muted);
    }

    #[test]
    fn test_run_stop_resume_accumulates() {
        let (mut app, clock) = app();

        app.handle_event(&key('s'));
        clock.advance_secs(5.0);
        assert!(app.tick());
        assert_eq!(app.display_text(), "00:00:05.00");

        assert_eq!(app.handle_event(&key('t')), AppAction::RunningChanged(false));
        clock.advance_secs(10.0);
        assert!(!app.tick());

        app.handle_event(&key('s'));
        clock.advance_secs(2.5);
        app.tick();
        assert_eq!(app.display_text(), "00:00:07.50");
    }

    #[test]
    fn test_tick_without_visible_change_is_quiet() {
        let (mut app, clock) = app();
        app.handle_event(&key('s'));
        let mut buffer = Buffer::new(80, 24);
        app.render(&mut buffer);

        clock.advance(Duration::from_millis(3));
        assert!(!app.tick());
        assert!(!app.needs_redraw());
    }

    #[test]
    fn test_reset_only_while_stopped() {
        let (mut app, clock) = app();
        app.handle_event(&key('s'));
        clock.advance_secs(3.0);

        assert_eq!(app.handle_event(&key('r')), AppAction::None);
        app.tick();
        assert_eq!(app.display_text(), "00:00:03.00");

        app.handle_event(&key('t'));
        assert_eq!(app.handle_event(&key('r')), AppAction::Redraw);
        assert_eq!(app.display_text(), "00:00:00.00");
    }

    #[test]
    fn test_double_start_is_ignored() {
        let (mut app, _) = app();
        app.handle_event(&key('s'));
        assert_eq!(app.handle_event(&key('s')), AppAction::None);
        assert_eq!(app.handle_event(&key('t')), AppAction::RunningChanged(false));
        assert_eq!(app.handle_event(&key('t')), AppAction::None);
    }

    #[test]
    fn test_clicks_press_buttons() {
        let (mut app, clock) = app();
        let toggle = app.layout().toggle_button;

        let action = app.handle_event(&InputEvent::click(toggle.x + 1, toggle.y + 1));
        assert_eq!(action, AppAction::RunningChanged(true));

        clock.advance_secs(1.0);
        let action = app.handle_event(&InputEvent::click(toggle.x + 1, toggle.y + 1));
        assert_eq!(action, AppAction::RunningChanged(false));
        assert_eq!(app.display_text(), "00:00:01.00");

        let reset = app.layout().reset_button;
        assert_eq!(app.handle_event(&InputEvent::click(reset.x, reset.y)), AppAction::Redraw);
        assert_eq!(app.display_text(), "00:00:00.00");
    }

    #[test]
    fn test_click_outside_buttons_does_nothing() {
        let (mut app, _) = app();
        assert_eq!(app.handle_event(&InputEvent::click(0, 0)), AppAction::None);
        assert!(!app.is_running());
    }

    #[test]
    fn test_keyboard_focus_and_enter() {
        let (mut app, _) = app();
        assert!(app.buttons()[0].is_focused());

        assert_eq!(app.handle_event(&InputEvent::key(KeyCode::Tab)), AppAction::Redraw);
        assert!(app.buttons()[2].is_focused());

        assert_eq!(app.handle_event(&InputEvent::key(KeyCode::BackTab)), AppAction::Redraw);
        assert_eq!(app.handle_event(&InputEvent::key(KeyCode::Enter)), AppAction::RunningChanged(true));

        // Reset is disabled while running, so focus cannot leave the toggle.
        assert_eq!(app.handle_event(&InputEvent::key(KeyCode::Tab)), AppAction::None);
        assert_eq!(app.handle_event(&key(' ')), AppAction::RunningChanged(false));
    }

    #[test]
    fn test_starting_moves_focus_off_reset() {
        let (mut app, _) = app();
        app.handle_event(&InputEvent::key(KeyCode::Tab));
        app.handle_event(&key('s'));
        let [_, stop, reset] = app.buttons();
        assert!(stop.is_focused());
        assert!(!reset.is_focused());
    }

    #[test]
    fn test_h_toggles_header_and_footer() {
        let (mut app, _) = app();
        assert_eq!(app.handle_event(&key('h')), AppAction::Redraw);
        assert!(app.chrome_visible());

        let buffer = rendered(&mut app);
        let header = buffer.row_text(0);
        assert!(header.contains("Stopwatch"));
        assert!(header.contains("stopped"));
        assert!(buffer.row_text(23).contains("q Quit"));

        app.handle_event(&key('h'));
        let buffer = rendered(&mut app);
        assert!(!buffer.row_text(0).contains("Stopwatch"));
    }

    #[test]
    fn test_header_shows_running_state() {
        let config = AppConfig { show_chrome: true, ..AppConfig::default() };
        let mut app = StopwatchApp::with_clock(config, ManualClock::new(), 80, 24);
        app.handle_event(&key('s'));
        let buffer = rendered(&mut app);
        assert!(buffer.row_text(0).contains("running"));
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _) = app();
        assert_eq!(app.handle_event(&key('q')), AppAction::Quit);
        assert_eq!(app.handle_event(&InputEvent::key(KeyCode::Esc)), AppAction::Quit);
        let ctrl_c = InputEvent::Key { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL };
        assert_eq!(app.handle_event(&ctrl_c), AppAction::Quit);
        assert_eq!(app.handle_event(&key('c')), AppAction::None);
    }

    #[test]
    fn test_resize_relayouts() {
        let (mut app, _) = app();
        assert_eq!(app.handle_event(&InputEvent::Resize { width: 100, height: 30 }), AppAction::Redraw);
        assert_eq!(*app.layout(), StopwatchLayout::compute(100, 30, false));
        assert!(app.needs_redraw());
    }

    #[test]
    fn test_small_terminal_falls_back_to_text_digits() {
        let clock = ManualClock::new();
        let mut app = StopwatchApp::with_clock(AppConfig::default(), clock, 30, 6);
        assert!(app.layout().compact);

        let mut buffer = Buffer::new(30, 6);
        app.render(&mut buffer);
        let shown = (0..6).any(|y| buffer.row_text(y).contains("00:00:00.00"));
        assert!(shown);
    }
}
