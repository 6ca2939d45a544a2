//! Renderer Actor: Dedicated thread for drawing frames to the terminal.
//!
//! The simulation loop never writes to stdout. It hands each tick's
//! [`Frame`] to a [`FrameSink`]; in the game that sink is a
//! [`RenderHandle`] that forwards frames over a channel to this actor,
//! which paints them into an [`OutputBuffer`] and flushes once per frame.

use super::messages::{Frame, RenderCommand};
use crate::config::{DisplayMode, Glyphs};
use crate::game::{Outcome, Vulnerability};
use crate::maze::{Position, Tile};
use crate::terminal::{OutputBuffer, Rgb};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::io::{self, Write};
use std::thread::{self, JoinHandle};
use unicode_width::UnicodeWidthStr;

/// Frames queued before the simulation loop waits on the render thread.
const RENDER_QUEUE: usize = 16;

/// Consumer of per-tick snapshots.
///
/// Rendering failures are the sink's own business; the simulation loop
/// never sees them.
pub trait FrameSink {
    /// Draw one frame.
    fn draw(&mut self, frame: Frame);
}

/// Keeps every frame in memory, for headless runs.
impl FrameSink for Vec<Frame> {
    fn draw(&mut self, frame: Frame) {
        self.push(frame);
    }
}

/// Sending half of the render channel.
#[derive(Debug, Clone)]
pub struct RenderHandle {
    tx: Sender<RenderCommand>,
}

impl FrameSink for RenderHandle {
    fn draw(&mut self, frame: Frame) {
        if self.tx.send(RenderCommand::Frame(Box::new(frame))).is_err() {
            log::warn!("render thread gone, frame dropped");
        }
    }
}

/// Renderer actor that owns stdout.
pub struct RendererActor {
    /// Handle to the render thread.
    handle: Option<JoinHandle<()>>,
    /// Command sender, kept for shutdown.
    tx: Sender<RenderCommand>,
}

impl RendererActor {
    /// Spawn the renderer actor thread.
    ///
    /// # Arguments
    ///
    /// * `painter` - Glyphs and layout used to draw frames.
    ///
    /// # Errors
    ///
    /// Returns an error if the OS fails to spawn the thread.
    pub fn spawn(painter: Painter) -> io::Result<Self> {
        let (tx, rx) = bounded::<RenderCommand>(RENDER_QUEUE);

        let handle = thread::Builder::new()
            .name("mazechase-render".to_string())
            .spawn(move || {
                let mut stdout = io::stdout();
                if let Err(e) = Self::run_loop(&rx, &painter, &mut stdout) {
                    log::error!("render thread error: {e}");
                }
            })?;

        Ok(Self {
            handle: Some(handle),
            tx,
        })
    }

    /// A sink that feeds this actor.
    pub fn handle(&self) -> RenderHandle {
        RenderHandle {
            tx: self.tx.clone(),
        }
    }

    /// Draw every queued frame, then stop the render thread.
    pub fn join(mut self) {
        let _ = self.tx.send(RenderCommand::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main render loop.
    fn run_loop<W: Write>(
        receiver: &Receiver<RenderCommand>,
        painter: &Painter,
        out: &mut W,
    ) -> io::Result<()> {
        let mut buffer = OutputBuffer::new();

        for command in receiver {
            match command {
                RenderCommand::Frame(frame) => {
                    buffer.clear();
                    painter.paint(&frame, &mut buffer);
                    buffer.flush_to(out)?;
                }
                RenderCommand::Shutdown => break,
            }
        }

        Ok(())
    }
}

/// Turns frames into ANSI output.
#[derive(Debug, Clone)]
pub struct Painter {
    glyphs: Glyphs,
    mode: DisplayMode,
}

impl Painter {
    /// Create a painter.
    pub const fn new(glyphs: Glyphs, mode: DisplayMode) -> Self {
        Self { glyphs, mode }
    }

    /// Paint a full frame into `out`.
    pub fn paint(&self, frame: &Frame, out: &mut OutputBuffer) {
        let width = self.mode.cell_width();
        let rows = frame.grid.rows();

        out.clear_screen();
        out.cursor_hide();

        for (row, tiles) in frame.grid.iter_rows().enumerate() {
            out.cursor_move(0, row);
            for &tile in tiles {
                match tile {
                    Tile::Wall => {
                        out.set_bg(Rgb::WALL_BLUE);
                        out.write_str(&pad(&self.glyphs.wall, width));
                        out.reset_attrs();
                    }
                    Tile::Dot => out.write_str(&pad(&self.glyphs.dot, width)),
                    Tile::Power => out.write_str(&pad(&self.glyphs.power, width)),
                    Tile::Empty => out.write_str(&pad(&self.glyphs.empty, width)),
                }
            }
        }

        for pursuer in &frame.pursuers {
            let glyph = match pursuer.vulnerability {
                Vulnerability::Normal => &self.glyphs.pursuer,
                Vulnerability::Vulnerable => &self.glyphs.pursuer_vulnerable,
            };
            self.put(out, pursuer.position, glyph);
        }
        self.put(out, frame.player, &self.glyphs.player);

        if let Some(at) = frame.death {
            self.put(out, at, &self.glyphs.death);
        }

        out.cursor_move(0, rows + 1);
        out.write_str(&format!("Score: {}", frame.score));
        out.cursor_move(0, rows + 2);
        out.write_str(&format!("Lives: {}", self.lives(frame.lives)));

        if let Some(outcome) = frame.outcome {
            out.cursor_move(0, rows + 4);
            out.write_str(match outcome {
                Outcome::Won => "You win!",
                Outcome::Lost => "Game over",
            });
        }

        out.cursor_move(0, rows + 5);
    }

    fn put(&self, out: &mut OutputBuffer, at: Position, glyph: &str) {
        let width = self.mode.cell_width();
        out.cursor_move(at.col * width, at.row);
        out.write_str(&pad(glyph, width));
    }

    fn lives(&self, lives: u32) -> String {
        match self.mode {
            DisplayMode::Ascii => lives.to_string(),
            DisplayMode::Emoji => self.glyphs.player.repeat(lives as usize),
        }
    }
}

/// Pad `glyph` with spaces to `width` terminal columns.
fn pad(glyph: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(glyph);
    let mut cell = String::with_capacity(glyph.len() + width);
    cell.push_str(glyph);
    for _ in used..width {
        cell.push(' ');
    }
    cell
}
