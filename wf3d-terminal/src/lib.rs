/// Terminal front end for the wireframe viewer
use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self},
};
use nalgebra::Point2;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use wf3d_core::{
    Anchor, Canvas, Color, DisplayFlags, Drawable, ModelController, Updatable,
};

pub mod cli;
pub mod clock;
pub mod input;
pub mod renderer;

pub use clock::FpsCounter;
pub use input::KeyTracker;
pub use renderer::TerminalCanvas;

const CONTROLS: &str =
    "arrows/PgUp/PgDn move | q z d a w s rotate | l j Home End i k scale | r reset | Esc quit";

/// Main application struct for terminal wireframe rendering
pub struct TerminalApp {
    controller: ModelController,
    flags: DisplayFlags,
    canvas: TerminalCanvas,
    keys: KeyTracker,
    clock: FpsCounter,
    target_fps: f64,
    enhanced_keys: bool,
    running: bool,
}

impl TerminalApp {
    pub fn new(controller: ModelController, flags: DisplayFlags, target_fps: f64) -> Result<Self> {
        let (width, height) = terminal::size()?;
        let enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if !enhanced_keys {
            warn!("terminal does not report key releases, keys count as held for a short window");
        }

        Ok(Self {
            controller,
            flags,
            canvas: TerminalCanvas::new(width as usize, height as usize),
            keys: KeyTracker::new(enhanced_keys),
            clock: FpsCounter::new(),
            target_fps,
            enhanced_keys,
            running: true,
        })
    }

    /// Override how long keys stay held on terminals without release events.
    pub fn hold_window(mut self, window: Duration) -> Self {
        self.keys = KeyTracker::new(self.enhanced_keys).with_hold_window(window);
        self
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        if self.enhanced_keys {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }

        let result = self.main_loop();

        // Cleanup, every step runs even if an earlier one fails
        let cleanup = [
            if self.enhanced_keys {
                execute!(stdout(), PopKeyboardEnhancementFlags)
            } else {
                Ok(())
            },
            terminal::disable_raw_mode(),
            execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show),
        ];

        first_error(result, cleanup)
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = Duration::from_secs_f64(1.0 / self.target_fps);
        info!(target_fps = self.target_fps, flags = self.flags.bits(), "entering frame loop");

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?);
            }
            if !self.running {
                break;
            }

            // Update
            let input = self.keys.snapshot(Instant::now());
            self.controller.update(&input, self.clock.fps());

            // Render
            self.render()?;

            // Frame timing
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }
            self.clock.tick(frame_start.elapsed());
        }

        info!("frame loop finished");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if input::is_quit(&key) {
                    self.running = false;
                } else {
                    self.keys.handle(&key, Instant::now());
                }
            }
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.canvas.resize(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> Result<()> {
        self.canvas.clear();
        self.controller.draw(&mut self.canvas, self.flags)?;

        // Overlay
        let status = format!("FPS: {:.0} | {}", self.clock.fps(), CONTROLS);
        self.canvas
            .draw_text(&status, Anchor::TopLeft(Point2::new(0.0, 0.0)), Color::Yellow);

        let mut stdout = stdout();
        self.canvas.present(&mut stdout)?;
        stdout.flush()?;
        Ok(())
    }
}

/// The frame loop's error if any, otherwise the first failed cleanup step.
fn first_error<I>(result: Result<()>, cleanup: I) -> Result<()>
where
    I: IntoIterator<Item = std::io::Result<()>>,
{
    let mut cleanup_error = None;
    for step in cleanup {
        if let Err(err) = step {
            warn!(%err, "terminal cleanup failed");
            cleanup_error.get_or_insert(err);
        }
    }

    result?;
    match cleanup_error {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_frame_loop_error_wins() {
        let result = first_error(
            Err(anyhow::anyhow!("frame loop")),
            [Err(Error::new(ErrorKind::Other, "pop flags")), Ok(())],
        );
        assert_eq!(result.unwrap_err().to_string(), "frame loop");
    }

    #[test]
    fn test_first_cleanup_error_is_reported() {
        let result = first_error(
            Ok(()),
            [
                Ok(()),
                Err(Error::new(ErrorKind::Other, "raw mode")),
                Err(Error::new(ErrorKind::Other, "alternate screen")),
            ],
        );
        assert_eq!(result.unwrap_err().to_string(), "raw mode");
    }

    #[test]
    fn test_clean_exit() {
        assert!(first_error(Ok(()), [Ok(()), Ok(()), Ok(())]).is_ok());
    }
}
