//! Input Actor: Dedicated thread for polling terminal events.
//!
//! Polls crossterm with a short timeout so the shutdown flag is noticed
//! promptly, and forwards the events the stopwatch cares about.

use super::messages::{InputEvent, KeyCode, KeyModifiers, MouseEvent};
use crossbeam_channel::{Sender, TrySendError};
use crossterm::event::{self, Event, KeyEventKind};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Consecutive read failures after which the input thread gives up.
pub const MAX_CONSECUTIVE_ERRORS: u32 = 8;

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel to send input events to the main loop.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration) -> io::Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("stopwatch-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout);
            })?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration) {
        Self::run_loop_with(sender, shutdown, poll_timeout, |timeout| {
            if event::poll(timeout)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        });
    }

    /// Forward events from `next_event` until shutdown, disconnect or
    /// [`MAX_CONSECUTIVE_ERRORS`] failures in a row.
    fn run_loop_with<F>(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration, mut next_event: F)
    where
        F: FnMut(Duration) -> io::Result<Option<Event>>,
    {
        let mut errors = 0u32;
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.try_send(InputEvent::Shutdown);
                break;
            }

            let input = match next_event(poll_timeout) {
                Ok(None) => continue,
                Ok(Some(event)) => {
                    errors = 0;
                    convert_event(event)
                }
                Err(e) => {
                    errors += 1;
                    log::warn!("terminal input error ({errors}/{MAX_CONSECUTIVE_ERRORS}): {e}");
                    if errors >= MAX_CONSECUTIVE_ERRORS {
                        log::error!("terminal input unavailable, shutting down");
                        let _ = sender.try_send(InputEvent::Shutdown);
                        break;
                    }
                    // A dead stdin fails instantly; don't spin on it.
                    thread::sleep(poll_timeout);
                    Some(InputEvent::Error(e.to_string()))
                }
            };

            // Never block: the engine joins this thread while it holds the receiver.
            match input.map(|input| sender.try_send(input)) {
                Some(Err(TrySendError::Disconnected(_))) => break,
                Some(Err(TrySendError::Full(dropped))) => log::warn!("input queue full, dropping {dropped:?}"),
                Some(Ok(())) | None => {}
            }
        }
        log::debug!("input thread exiting");
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event to an [`InputEvent`].
///
/// Key releases/repeats, unbound keys and non-left mouse activity map to `None`.
pub fn convert_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => {
            if key.kind != KeyEventKind::Press {
                return None;
            }
            let code = convert_key_code(key.code)?;
            let modifiers = KeyModifiers {
                shift: key.modifiers.contains(event::KeyModifiers::SHIFT),
                control: key.modifiers.contains(event::KeyModifiers::CONTROL),
                alt: key.modifiers.contains(event::KeyModifiers::ALT),
            };
            Some(InputEvent::Key { code, modifiers })
        }
        Event::Mouse(mouse) => {
            let at = MouseEvent { x: mouse.column, y: mouse.row };
            match mouse.kind {
                event::MouseEventKind::Down(event::MouseButton::Left) => Some(InputEvent::MouseDown(at)),
                event::MouseEventKind::Up(event::MouseButton::Left) => Some(InputEvent::MouseUp(at)),
                _ => None,
            }
        }
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
    }
}

const fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::BackTab => KeyCode::BackTab,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use crossterm::event::{KeyEvent, KeyEventState, MouseEventKind};

    fn key(code: event::KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: event::KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_key_press_converted() {
        let converted = convert_event(key(event::KeyCode::Char('h'), KeyEventKind::Press));
        assert_eq!(converted, Some(InputEvent::key(KeyCode::Char('h'))));
    }

    #[test]
    fn test_key_release_ignored() {
        assert_eq!(convert_event(key(event::KeyCode::Char('h'), KeyEventKind::Release)), None);
    }

    #[test]
    fn test_unbound_key_ignored() {
        assert_eq!(convert_event(key(event::KeyCode::F(5), KeyEventKind::Press)), None);
    }

    #[test]
    fn test_control_modifier() {
        let event = Event::Key(KeyEvent::new(event::KeyCode::Char('c'), event::KeyModifiers::CONTROL));
        assert_eq!(
            convert_event(event),
            Some(InputEvent::Key { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
        );
    }

    #[test]
    fn test_left_click_converted() {
        let event = Event::Mouse(event::MouseEvent {
            kind: MouseEventKind::Down(event::MouseButton::Left),
            column: 12,
            row: 4,
            modifiers: event::KeyModifiers::NONE,
        });
        assert_eq!(convert_event(event), Some(InputEvent::click(12, 4)));
    }

    #[test]
    fn test_right_click_ignored() {
        let event = Event::Mouse(event::MouseEvent {
            kind: MouseEventKind::Down(event::MouseButton::Right),
            column: 0,
            row: 0,
            modifiers: event::KeyModifiers::NONE,
        });
        assert_eq!(convert_event(event), None);
    }

    #[test]
    fn test_resize_converted() {
        assert_eq!(
            convert_event(Event::Resize(100, 40)),
            Some(InputEvent::Resize { width: 100, height: 40 })
        );
    }

    #[test]
    fn test_persistent_errors_back_off_then_shut_down() {
        let (tx, rx) = unbounded();
        let shutdown = AtomicBool::new(false);
        let mut calls = 0;
        InputActor::run_loop_with(&tx, &shutdown, Duration::from_millis(1), |_| {
            calls += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"))
        });

        assert_eq!(calls, MAX_CONSECUTIVE_ERRORS);
        let events: Vec<_> = rx.try_iter().collect();
        let errors = events.iter().filter(|e| matches!(e, InputEvent::Error(_))).count();
        assert_eq!(errors, MAX_CONSECUTIVE_ERRORS as usize - 1);
        assert_eq!(events.last(), Some(&InputEvent::Shutdown));
    }

    #[test]
    fn test_successful_read_resets_error_count() {
        let (tx, rx) = unbounded();
        let shutdown = AtomicBool::new(false);
        let mut calls = 0u32;
        InputActor::run_loop_with(&tx, &shutdown, Duration::from_millis(1), |_| {
            calls += 1;
            // Fail just short of the limit, succeed once, then keep failing.
            if calls == MAX_CONSECUTIVE_ERRORS {
                Ok(Some(Event::Resize(80, 24)))
            } else {
                Err(io::Error::other("flaky"))
            }
        });

        assert_eq!(calls, 2 * MAX_CONSECUTIVE_ERRORS);
        assert!(rx.try_iter().any(|e| e == InputEvent::Resize { width: 80, height: 24 }));
    }

    #[test]
    fn test_shutdown_flag_stops_loop() {
        let (tx, rx) = unbounded();
        let shutdown = AtomicBool::new(true);
        InputActor::run_loop_with(&tx, &shutdown, Duration::from_millis(1), |_| Ok(None));
        assert_eq!(rx.try_recv(), Ok(InputEvent::Shutdown));
    }
}
