use std::time::Duration;

use anyhow::{ensure, Result};
use clap::{builder::RangedU64ValueParser, Parser, ValueEnum};

use crate::{grid::Window, FAST_DELAY, GENERATIONS, PERIOD, SLOW_DELAY, WINDOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Play every stored generation once, frames separated by a blank line.
    Once,
    /// Play forever, jumping back one period after the last stored generation.
    Loop,
}

#[derive(Debug, Parser)]
#[command(author, version, about = "Plays the Game of Life glider gun in the terminal", long_about = None)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = Mode::Loop)]
    pub mode: Mode,
    /// Milliseconds between frames; 1000 in once mode and 200 in loop mode when omitted.
    #[arg(long = "delay-ms", value_name = "MILLISECONDS")]
    pub delay_ms: Option<u64>,
    /// Generations computed up front.
    #[arg(long, default_value_t = GENERATIONS, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub generations: usize,
    /// Generations after which the window repeats.
    #[arg(long, default_value_t = PERIOD, conflicts_with = "detect_period")]
    pub period: usize,
    /// Derive the period from the computed frames instead of trusting --period.
    #[arg(long)]
    pub detect_period: bool,
    #[arg(long = "origin-x", default_value_t = WINDOW.x(), allow_negative_numbers = true)]
    pub origin_x: i64,
    #[arg(long = "origin-y", default_value_t = WINDOW.y(), allow_negative_numbers = true)]
    pub origin_y: i64,
    #[arg(long, default_value_t = WINDOW.w())]
    pub width: usize,
    #[arg(long, default_value_t = WINDOW.h())]
    pub height: usize,
    /// Stop looping after this many frames.
    #[arg(long, value_name = "COUNT")]
    pub frames: Option<u64>,
    #[arg(long, default_value_t = 'X')]
    pub alive: char,
    #[arg(long, default_value_t = ' ')]
    pub dead: char,
}

impl Cli {
    #[inline]
    pub fn window(&self) -> Window {
        Window::new(self.origin_x, self.origin_y, self.width, self.height)
    }

    pub fn delay(&self) -> Duration {
        match (self.delay_ms, self.mode) {
            (Some(ms), _) => Duration::from_millis(ms),
            (None, Mode::Once) => SLOW_DELAY,
            (None, Mode::Loop) => FAST_DELAY,
        }
    }

    /// Whether the shipped window and generation count are requested.
    pub fn is_reference(&self) -> bool {
        self.window() == WINDOW && self.generations == GENERATIONS
    }

    pub fn validate(&self) -> Result<()> {
        if !self.detect_period && self.mode == Mode::Loop {
            check_period(self.period, self.generations)?;
        }
        Ok(())
    }
}

pub fn check_period(period: usize, generations: usize) -> Result<()> {
    ensure!(
        period > 0 && period < generations,
        "period {period} must be between 1 and {} for {generations} generations",
        generations.saturating_sub(1)
    );
    Ok(())
}
