//! Ticker Actor: Dedicated thread for generating refresh ticks.
//!
//! Drives the elapsed-time display at a fixed rate while the stopwatch
//! runs. A paused ticker parks its thread, so an idle stopwatch costs
//! nothing.

use crossbeam_channel::{bounded, Receiver, Sender};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// A tick event sent at regular intervals.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Tick number (monotonically increasing, not reset by pauses).
    pub frame: u64,
    /// Time elapsed since the ticker was spawned.
    pub elapsed: Duration,
}

/// Flags shared with the ticker thread.
#[derive(Debug, Default)]
struct Control {
    shutdown: AtomicBool,
    paused: AtomicBool,
}

/// Ticker actor that generates regular timing events.
pub struct TickerActor {
    handle: Option<JoinHandle<()>>,
    control: Arc<Control>,
    tick_rx: Receiver<Tick>,
    interval: Duration,
}

impl TickerActor {
    /// Spawn a running ticker.
    ///
    /// # Arguments
    ///
    /// * `interval` - Time between ticks (e.g., 16ms for ~60 FPS).
    pub fn spawn(interval: Duration) -> io::Result<Self> {
        Self::spawn_with(interval, false)
    }

    /// Spawn a ticker that stays silent until [`TickerActor::resume`].
    pub fn spawn_paused(interval: Duration) -> io::Result<Self> {
        Self::spawn_with(interval, true)
    }

    fn spawn_with(interval: Duration, paused: bool) -> io::Result<Self> {
        let control = Arc::new(Control {
            shutdown: AtomicBool::new(false),
            paused: AtomicBool::new(paused),
        });
        let thread_control = control.clone();

        // Small buffer: ticks must not queue up behind a slow receiver.
        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name("stopwatch-ticker".to_string())
            .spawn(move || Self::run_loop(&tick_tx, &thread_control, interval))?;

        Ok(Self {
            handle: Some(handle),
            control,
            tick_rx,
            interval,
        })
    }

    /// The tick receiver, for use with `select!`.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Configured interval.
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Stop emitting ticks until resumed.
    pub fn pause(&self) {
        if !self.control.paused.swap(true, Ordering::AcqRel) {
            log::debug!("ticker paused");
        }
        self.wake();
    }

    /// Resume emitting ticks. The first tick arrives one interval later.
    pub fn resume(&self) {
        if self.control.paused.swap(false, Ordering::AcqRel) {
            log::debug!("ticker resumed");
        }
        self.wake();
    }

    /// Whether the ticker is paused.
    pub fn is_paused(&self) -> bool {
        self.control.paused.load(Ordering::Acquire)
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&self) {
        self.control.shutdown.store(true, Ordering::Release);
        self.wake();
    }

    /// Wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn wake(&self) {
        if let Some(handle) = &self.handle {
            handle.thread().unpark();
        }
    }

    fn run_loop(tick_tx: &Sender<Tick>, control: &Control, interval: Duration) {
        let start = Instant::now();
        let mut frame = 0u64;
        let mut next_tick: Option<Instant> = None;

        loop {
            if control.shutdown.load(Ordering::Acquire) {
                break;
            }

            if control.paused.load(Ordering::Acquire) {
                next_tick = None;
                // Spurious wakeups just go round the loop again.
                thread::park();
                continue;
            }

            let now = Instant::now();
            let due = *next_tick.get_or_insert(now + interval);
            if now < due {
                thread::park_timeout(due - now);
                continue;
            }

            // Non-blocking send: drop the tick if the receiver is behind.
            let _ = tick_tx.try_send(Tick {
                frame,
                elapsed: now - start,
            });
            frame += 1;

            // Catch up without queuing when we fell behind.
            let mut following = due + interval;
            if following < now {
                following = now + interval;
            }
            next_tick = Some(following);
        }
    }
}

impl Drop for TickerActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}
