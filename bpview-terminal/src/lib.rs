/// Terminal host for blueprint wireframe previews
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stderr, stdin, stdout, IsTerminal, Write};
use std::time::{Duration, Instant};
use bpview_core::{Frame, WireframeRenderer};

pub mod demo;
pub mod export;
pub mod renderer;

pub use renderer::AsciiRenderer;

/// What a key press asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    ToggleSpin,
    StepBack,
    StepForward,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char(' ') => Some(Command::ToggleSpin),
            KeyCode::Left | KeyCode::Char('a') => Some(Command::StepBack),
            KeyCode::Right | KeyCode::Char('d') => Some(Command::StepForward),
            _ => None,
        }
    }
}

fn poll_command(timeout: Duration) -> io::Result<Option<Command>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) => Ok(Command::from_key(code)),
        _ => Ok(None),
    }
}

/// Render every frame, reporting progress on stderr.
///
/// Returns `None` if the user quit with `q`/`Esc` between frames. Without a
/// terminal on stdin and stderr this falls back to [`render_unattended`].
pub fn render_with_progress(renderer: &WireframeRenderer) -> io::Result<Option<Vec<Frame>>> {
    if !(stdin().is_terminal() && stderr().is_terminal()) {
        return Ok(Some(render_unattended(renderer)));
    }

    let total = renderer.len();
    let mut frames = Vec::with_capacity(total);

    terminal::enable_raw_mode()?;
    let result = (|| -> io::Result<bool> {
        let mut err = stderr();
        for (i, frame) in renderer.frames().enumerate() {
            frames.push(frame);
            queue!(
                err,
                cursor::MoveToColumn(0),
                terminal::Clear(ClearType::CurrentLine),
                Print(format!("Rendering frame {}/{} (q to cancel)", i + 1, total))
            )?;
            err.flush()?;

            if poll_command(Duration::ZERO)? == Some(Command::Quit) {
                return Ok(false);
            }
        }
        execute!(err, cursor::MoveToColumn(0), terminal::Clear(ClearType::CurrentLine))?;
        Ok(true)
    })();
    terminal::disable_raw_mode()?;

    match result {
        Ok(true) => Ok(Some(frames)),
        Ok(false) => {
            tracing::info!("Rendering cancelled after {} of {} frames", frames.len(), total);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Render every frame without touching the terminal, logging progress.
pub fn render_unattended(renderer: &WireframeRenderer) -> Vec<Frame> {
    let total = renderer.len();
    renderer
        .frames()
        .enumerate()
        .map(|(i, frame)| {
            tracing::debug!("Rendered frame {}/{}", i + 1, total);
            frame
        })
        .collect()
}

/// Plays a pre-rendered frame sequence in the terminal
pub struct TerminalApp {
    frames: Vec<Frame>,
    title: String,
    current: usize,
    spinning: bool,
    renderer: AsciiRenderer,
    running: bool,
    frame_interval: Duration,
}

impl TerminalApp {
    pub fn new(frames: Vec<Frame>, title: impl Into<String>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            frames,
            title: title.into(),
            current: 0,
            spinning: true,
            // Top row is the status line
            renderer: AsciiRenderer::new(width as usize, height.saturating_sub(1) as usize),
            running: true,
            frame_interval: Duration::from_millis(export::FRAME_DELAY_MS as u64),
        })
    }

    pub fn current_frame(&self) -> usize {
        self.current
    }

    pub fn is_spinning(&self) -> bool {
        self.spinning
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            self.render()?;

            // Wait out the rest of the frame, reacting to keys as they come
            loop {
                let elapsed = frame_start.elapsed();
                if elapsed >= self.frame_interval || !self.running {
                    break;
                }
                if let Some(command) = poll_command(self.frame_interval - elapsed)? {
                    self.apply(command);
                    self.render()?;
                }
            }

            if self.spinning {
                self.step(1);
            }
        }

        Ok(())
    }

    /// Apply a playback command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Quit => self.running = false,
            Command::ToggleSpin => self.spinning = !self.spinning,
            Command::StepBack => {
                self.spinning = false;
                self.step(-1);
            }
            Command::StepForward => {
                self.spinning = false;
                self.step(1);
            }
        }
    }

    fn step(&mut self, delta: isize) {
        let count = self.frames.len();
        if count == 0 {
            return;
        }
        self.current = (self.current as isize + delta).rem_euclid(count as isize) as usize;
    }

    fn render(&mut self) -> io::Result<()> {
        match self.frames.get(self.current) {
            Some(frame) => self.renderer.rasterize(frame),
            None => self.renderer.clear(),
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.renderer.draw(&mut stdout)?;

        // Status line
        let state = if self.spinning { "spinning" } else { "paused" };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | frame {}/{} ({}) | Space=Spin Left/Right=Step Q=Quit",
                self.title,
                self.current + 1,
                self.frames.len(),
                state
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
