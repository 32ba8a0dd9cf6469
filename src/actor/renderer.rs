//! Renderer Actor: Dedicated thread for rendering to the terminal.
//!
//! Owns the on-screen buffer, diffs each incoming frame against it and
//! flushes the result in a single write.

use super::messages::RenderCommand;
use crate::buffer::diff::{render_diff, render_full, DiffState};
use crate::buffer::Buffer;
use crossbeam_channel::Receiver;
use std::io::{self, Write};
use std::thread::{self, JoinHandle};
use std::time::Instant;

/// Render statistics for debugging/profiling.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderStats {
    /// Frames rendered.
    pub frames: u64,
    /// Bytes written to the terminal.
    pub bytes_written: u64,
    /// Smoothed render time in microseconds.
    pub avg_render_us: u64,
}

/// Frame diffing state, independent of the output sink.
pub struct Renderer<W: Write> {
    /// What the terminal currently shows.
    current: Buffer,
    diff_state: DiffState,
    /// Reused escape-sequence buffer.
    output: Vec<u8>,
    sink: W,
    stats: RenderStats,
    needs_full_redraw: bool,
}

impl<W: Write> Renderer<W> {
    /// Create a renderer writing to `sink`.
    pub fn new(sink: W, width: u16, height: u16) -> Self {
        Self {
            current: Buffer::new(width, height),
            diff_state: DiffState::new(),
            output: Vec::with_capacity(16 * 1024),
            sink,
            stats: RenderStats::default(),
            needs_full_redraw: true,
        }
    }

    /// Present a frame, diffing against the screen unless a full redraw is due.
    pub fn present(&mut self, next: &Buffer, force_full: bool) -> io::Result<()> {
        if next.width() != self.current.width() || next.height() != self.current.height() {
            // Frame built for a different size; resync everything.
            self.resize(next.width(), next.height());
        }

        let start = Instant::now();
        self.output.clear();

        if force_full || self.needs_full_redraw {
            render_full(next, &mut self.output, &mut self.diff_state);
            self.needs_full_redraw = false;
        } else {
            render_diff(&self.current, next, &mut self.output, &mut self.diff_state);
        }

        if !self.output.is_empty() {
            self.sink.write_all(&self.output)?;
            self.sink.flush()?;
        }
        self.current.copy_from(next);

        let micros = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        self.stats.frames += 1;
        self.stats.bytes_written += self.output.len() as u64;
        self.stats.avg_render_us = if self.stats.avg_render_us == 0 {
            micros
        } else {
            (self.stats.avg_render_us * 15 + micros) / 16
        };
        Ok(())
    }

    /// Resize and schedule a full repaint.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.current.resize(width, height);
        self.needs_full_redraw = true;
        self.diff_state.reset();
    }

    /// Counters so far.
    pub const fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Borrow the output sink.
    pub const fn sink(&self) -> &W {
        &self.sink
    }
}

/// Renderer actor that handles terminal output.
pub struct RendererActor {
    handle: Option<JoinHandle<()>>,
}

impl RendererActor {
    /// Spawn the renderer thread writing to stdout.
    pub fn spawn(receiver: Receiver<RenderCommand>, width: u16, height: u16) -> io::Result<Self> {
        let handle = thread::Builder::new()
            .name("stopwatch-render".to_string())
            .spawn(move || {
                let mut renderer = Renderer::new(io::stdout(), width, height);
                if let Err(e) = Self::run_loop(&receiver, &mut renderer) {
                    log::error!("render thread error: {e}");
                }
                let stats = renderer.stats();
                log::debug!(
                    "renderer done: {} frames, {} bytes, ~{}us/frame",
                    stats.frames,
                    stats.bytes_written,
                    stats.avg_render_us
                );
            })?;

        Ok(Self { handle: Some(handle) })
    }

    /// Wait for the render thread to finish. Send
    /// [`RenderCommand::Shutdown`] first.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    fn run_loop<W: Write>(receiver: &Receiver<RenderCommand>, renderer: &mut Renderer<W>) -> io::Result<()> {
        let mut pending = None;
        loop {
            // Blocks until a command arrives; a disconnected channel ends the loop.
            let command = match pending.take() {
                Some(command) => command,
                None => match receiver.recv() {
                    Ok(command) => command,
                    Err(_) => break,
                },
            };
            match command {
                RenderCommand::FullRedraw(buffer) => renderer.present(&buffer, true)?,
                RenderCommand::Update(mut buffer) => {
                    // Skip stale frames when the producer is ahead of us.
                    loop {
                        match receiver.try_recv() {
                            Ok(RenderCommand::Update(newer)) => buffer = newer,
                            Ok(other) => {
                                pending = Some(other);
                                break;
                            }
                            Err(_) => break,
                        }
                    }
                    renderer.present(&buffer, false)?;
                }
                RenderCommand::Resize { width, height } => renderer.resize(width, height),
                RenderCommand::Shutdown => break,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Cell;
    use crossbeam_channel::unbounded;

    #[test]
    fn test_first_frame_is_full_redraw() {
        let mut renderer = Renderer::new(Vec::new(), 4, 2);
        let frame = Buffer::new(4, 2);
        renderer.present(&frame, false).unwrap();

        assert!(renderer.sink().starts_with(b"\x1b[0m\x1b[2J"));
        assert_eq!(renderer.stats().frames, 1);
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let mut renderer = Renderer::new(Vec::new(), 4, 2);
        let frame = Buffer::new(4, 2);
        renderer.present(&frame, false).unwrap();
        let written = renderer.sink().len();

        renderer.present(&frame, false).unwrap();
        assert_eq!(renderer.sink().len(), written);
    }

    #[test]
    fn test_changed_cell_is_diffed() {
        let mut renderer = Renderer::new(Vec::new(), 4, 2);
        let mut frame = Buffer::new(4, 2);
        renderer.present(&frame, false).unwrap();
        let written = renderer.sink().len();

        frame.set(1, 1, Cell::new('9'));
        renderer.present(&frame, false).unwrap();

        let tail = String::from_utf8_lossy(&renderer.sink()[written..]).into_owned();
        assert!(tail.starts_with("\x1b[2;2H"));
        assert!(tail.ends_with('9'));
    }

    #[test]
    fn test_resized_frame_forces_full_redraw() {
        let mut renderer = Renderer::new(Vec::new(), 4, 2);
        renderer.present(&Buffer::new(4, 2), false).unwrap();
        let written = renderer.sink().len();

        renderer.present(&Buffer::new(6, 3), false).unwrap();
        assert!(renderer.sink()[written..].starts_with(b"\x1b[0m\x1b[2J"));
    }

    #[test]
    fn test_run_loop_stops_on_shutdown() {
        let (tx, rx) = unbounded();
        let mut renderer = Renderer::new(Vec::new(), 3, 1);
        tx.send(RenderCommand::Update(Box::new(Buffer::new(3, 1)))).unwrap();
        tx.send(RenderCommand::Shutdown).unwrap();
        tx.send(RenderCommand::Update(Box::new(Buffer::new(3, 1)))).unwrap();

        RendererActor::run_loop(&rx, &mut renderer).unwrap();
        assert_eq!(renderer.stats().frames, 1);
    }
}
