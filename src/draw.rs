use std::{
    io::{self, Write},
    thread,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
    tty::IsTty,
};
use tracing::{error, info};

use crate::{cache::advance, config::Mode, grid::Snapshot, SnapshotSequence};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Glyphs {
    pub alive: char,
    pub dead: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Glyphs { alive: 'X', dead: ' ' }
    }
}

/// Plays a snapshot sequence back frame by frame.
pub struct Player<'a> {
    sequence: &'a SnapshotSequence,
    mode: Mode,
    delay: Duration,
    period: usize,
    glyphs: Glyphs,
    frames: Option<u64>,
}

impl<'a> Player<'a> {
    #[inline]
    pub fn new(sequence: &'a SnapshotSequence, mode: Mode, delay: Duration, period: usize) -> Self {
        Player {
            sequence,
            mode,
            delay,
            period,
            glyphs: Glyphs::default(),
            frames: None,
        }
    }

    #[inline]
    pub fn glyphs(mut self, glyphs: Glyphs) -> Self {
        self.glyphs = glyphs;
        self
    }

    /// Caps the number of frames shown in loop mode.
    #[inline]
    pub fn frames(mut self, frames: Option<u64>) -> Self {
        self.frames = frames;
        self
    }

    /// Sequence indices in the order they are shown.
    pub fn indices(&self) -> Box<dyn Iterator<Item = usize> + 'a> {
        let n = self.sequence.len();
        match self.mode {
            Mode::Once => Box::new(0..n),
            Mode::Loop => {
                let period = self.period;
                let it = std::iter::successors((n > 0).then_some(0), move |i| {
                    Some(advance(*i, n, period))
                });
                match self.frames {
                    Some(f) => Box::new(it.take(f as usize)),
                    None => Box::new(it),
                }
            }
        }
    }
}

/// One frame of text, rows ended by `line_end`.
pub fn render_frame(s: &Snapshot, glyphs: Glyphs, line_end: &str) -> String {
    let mut out = String::with_capacity((s.width() + line_end.len()) * s.height());
    for r in s.rows() {
        out.extend(r.iter().map(|c| if *c { glyphs.alive } else { glyphs.dead }));
        out.push_str(line_end);
    }
    out
}

pub fn run(p: &Player) -> Result<()> {
    info!(mode = ?p.mode, delay_ms = p.delay.as_millis() as u64, period = p.period, "playing");

    if p.mode == Mode::Loop && io::stdout().is_tty() {
        runup()?;
        let d = animate(p);
        shutdown();
        d
    } else {
        let stdout = io::stdout();
        play_plain(p, &mut stdout.lock())
    }
}

/// Prints frames one after another, as a pipe or a scrolling terminal sees them.
pub fn play_plain<W: Write>(p: &Player, out: &mut W) -> Result<()> {
    for (k, i) in p.indices().enumerate() {
        if k > 0 {
            if p.mode == Mode::Once {
                writeln!(out)?;
            }
            sleep(p.delay);
        }
        out.write_all(render_frame(p.sequence.at(i), p.glyphs, "\n").as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

fn runup() -> Result<()> {
    execute!(io::stdout(), EnterAlternateScreen, SetTitle("Life reel"), Hide)
        .context("failed to enter alternate screen")?;
    enable_raw_mode().context("failed to enable raw mode")?;
    Ok(())
}

fn shutdown() {
    if let Err(err) = disable_raw_mode() {
        error!(?err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        error!(?err, "failed to leave alternate screen");
    }
}

fn animate(p: &Player) -> Result<()> {
    let mut stdout = io::stdout();
    for i in p.indices() {
        let frame = render_frame(p.sequence.at(i), p.glyphs, "\r\n");
        queue!(stdout, MoveTo(0, 0), Clear(ClearType::All), Print(frame))?;
        stdout.flush()?;

        if wait(p.delay)? {
            info!("stopped by user");
            break;
        }
    }
    Ok(())
}

/// Waits out `delay`, returning early with `true` when a quit key is pressed.
fn wait(delay: Duration) -> Result<bool> {
    let deadline = Instant::now() + delay;
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        if !event::poll(left)? {
            return Ok(false);
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && is_quit(key.code, key.modifiers) {
                return Ok(true);
            }
        }
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn sleep(t: Duration) {
    if !t.is_zero() {
        thread::sleep(t)
    }
}
