//! Engine: Main coordinator that ties actors together.
//!
//! The Engine owns the terminal session. It enters raw mode and the
//! alternate screen, spawns the input and renderer actors, hands frames
//! to the renderer and restores the terminal when dropped.

use super::messages::{InputEvent, RenderCommand};
use super::{InputActor, RendererActor};
use crate::buffer::Buffer;
use crossbeam_channel::{bounded, Receiver, Sender};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;
use std::time::Duration;

/// Configuration for the Engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Refresh rate while the stopwatch runs.
    pub target_fps: u32,
    /// Input poll timeout.
    pub input_poll_timeout: Duration,
    /// Whether to enable mouse capture (clickable buttons).
    pub enable_mouse: bool,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
}

impl EngineConfig {
    /// Interval between refresh ticks.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            input_poll_timeout: Duration::from_millis(10),
            enable_mouse: true,
            alternate_screen: true,
        }
    }
}

/// The terminal session.
pub struct Engine {
    config: EngineConfig,
    input_rx: Receiver<InputEvent>,
    render_tx: Sender<RenderCommand>,
    input_actor: Option<InputActor>,
    renderer_actor: Option<RendererActor>,
    /// Frame being composed.
    buffer: Buffer,
    width: u16,
    height: u16,
    frame_count: u64,
    running: bool,
}

impl Engine {
    /// Create a new engine with default configuration.
    pub fn new() -> io::Result<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Create a new engine with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen,
    /// thread spawn).
    pub fn with_config(config: EngineConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        // Some terminals report 0x0 before the first resize.
        let (width, height) = (width.max(1), height.max(1));

        // Drop restores the terminal, so the struct must exist before any
        // setup step that can fail halfway.
        let (mut engine, input_tx, render_rx) = Self::unstarted(config, width, height);
        engine.enter_terminal()?;
        engine.input_actor = Some(InputActor::spawn(input_tx, engine.config.input_poll_timeout)?);
        engine.renderer_actor = Some(RendererActor::spawn(render_rx, width, height)?);

        log::info!("terminal session started ({width}x{height})");
        Ok(engine)
    }

    /// An engine with channels but no terminal setup and no threads.
    fn unstarted(config: EngineConfig, width: u16, height: u16) -> (Self, Sender<InputEvent>, Receiver<RenderCommand>) {
        let (input_tx, input_rx) = bounded::<InputEvent>(64);
        let (render_tx, render_rx) = bounded::<RenderCommand>(16);
        let engine = Self {
            config,
            input_rx,
            render_tx,
            input_actor: None,
            renderer_actor: None,
            buffer: Buffer::new(width, height),
            width,
            height,
            frame_count: 0,
            running: true,
        };
        (engine, input_tx, render_rx)
    }

    fn enter_terminal(&self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if self.config.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if self.config.enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        execute!(stdout, cursor::Hide)
    }

    /// Engine configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Terminal width.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Terminal height.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Mutable access to the frame being composed.
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Input receiver for event-driven loops.
    pub const fn input_receiver(&self) -> &Receiver<InputEvent> {
        &self.input_rx
    }

    /// Whether the engine is still running.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the engine.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Frames handed to the renderer so far.
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Send the composed frame to the renderer (diffed).
    pub fn present(&mut self) {
        self.frame_count += 1;
        let _ = self.render_tx.send(RenderCommand::Update(Box::new(self.buffer.clone())));
    }

    /// Send the composed frame to the renderer as a full repaint.
    pub fn present_full(&mut self) {
        self.frame_count += 1;
        let _ = self.render_tx.send(RenderCommand::FullRedraw(Box::new(self.buffer.clone())));
    }

    /// Handle a resize event.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        let (width, height) = (width.max(1), height.max(1));
        self.width = width;
        self.height = height;
        self.buffer.resize(width, height);
        let _ = self.render_tx.send(RenderCommand::Resize { width, height });
        log::debug!("terminal resized to {width}x{height}");
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if let Some(actor) = self.input_actor.take() {
            actor.join();
        }

        let _ = self.render_tx.send(RenderCommand::Shutdown);
        if let Some(actor) = self.renderer_actor.take() {
            actor.join();
        }

        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.config.enable_mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.config.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
        log::info!("terminal session ended after {} frames", self.frame_count);
    }
}
