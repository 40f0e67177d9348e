use std::{sync::OnceLock, time::Instant};

use tracing::info;

use crate::{
    error::BuildError,
    grid::{Snapshot, Window},
    pattern::Pattern,
    proc::Engine,
    GENERATIONS, WINDOW,
};

/// Upper bound on cells held by a working field or a stored sequence.
pub const MAX_CELLS: u128 = 1 << 30;

/// Snapshots of one window for generations `0..len()`, computed once.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SnapshotSequence {
    window: Window,
    frames: Vec<Snapshot>,
}

impl SnapshotSequence {
    /// Runs a single materialization pass over `window` for `generations` generations.
    pub fn build(engine: &Engine, window: Window, generations: usize) -> Result<Self, BuildError> {
        if generations == 0 {
            return Err(BuildError::NoGenerations);
        }

        let cells = cells_needed(&window, generations);
        if cells > MAX_CELLS {
            return Err(BuildError::TooLarge {
                window,
                generations,
                cells,
                limit: MAX_CELLS,
            });
        }

        let mut frames = Vec::new();
        frames
            .try_reserve_exact(generations)
            .map_err(|source| BuildError::OutOfMemory { generations, source })?;

        let started = Instant::now();
        frames.extend(engine.materialize(&window, generations));
        info!(
            %window,
            generations,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "snapshot sequence built"
        );

        Ok(SnapshotSequence { window, frames })
    }

    /// The snapshot of generation `index`.
    ///
    /// # Panics
    ///
    /// If `index >= self.len()`.
    #[inline]
    pub fn at(&self, index: usize) -> &Snapshot {
        assert!(
            index < self.frames.len(),
            "snapshot index {index} out of range 0..{}",
            self.frames.len()
        );
        &self.frames[index]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.frames.iter()
    }

    /// Smallest `p` such that the last frame already appeared `p` generations earlier.
    ///
    /// Only the window is compared, so activity outside it can make this
    /// shorter than the true period of the pattern.
    pub fn detect_period(&self) -> Option<usize> {
        let (last, rest) = self.frames.split_last()?;
        rest.iter().rev().position(|s| s == last).map(|p| p + 1)
    }
}

/// Cells held at once by the stored frames or the working field, whichever is larger.
fn cells_needed(window: &Window, generations: usize) -> u128 {
    let (w, h, n) = (window.w() as u128, window.h() as u128, generations as u128);
    let margin = 2 * n.saturating_sub(1);
    let stored = w.checked_mul(h).and_then(|a| a.checked_mul(n));
    let field = (w + margin).checked_mul(h + margin);
    match (stored, field) {
        (Some(s), Some(f)) => s.max(f),
        _ => u128::MAX,
    }
}

/// Index following `index` in a sequence of `n` frames that repeats every `period`.
///
/// Stepping off the end jumps back by `period`, landing on the frame that
/// generation `n` would have shown.
#[inline]
pub fn advance(index: usize, n: usize, period: usize) -> usize {
    debug_assert!(period > 0 && period < n, "period {period} must lie in 1..{n}");
    debug_assert!(index < n);
    let next = index + 1;
    if next >= n {
        next - period
    } else {
        next
    }
}

/// The shipped gun over the shipped window, built on first use.
pub fn get_snapshot_sequence() -> Result<&'static SnapshotSequence, BuildError> {
    static SEQUENCE: OnceLock<Result<SnapshotSequence, BuildError>> = OnceLock::new();
    SEQUENCE
        .get_or_init(|| {
            let engine = Engine::new(Pattern::new_gun().clone());
            SnapshotSequence::build(&engine, WINDOW, GENERATIONS)
        })
        .as_ref()
        .map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blinker() -> Engine {
        Engine::new(Pattern::parse("OOO", 'O').unwrap())
    }

    #[test]
    fn advance_wraps_by_period() {
        assert_eq!(advance(0, 92, 46), 1);
        assert_eq!(advance(90, 92, 46), 91);
        assert_eq!(advance(91, 92, 46), 46);
        assert_eq!(advance(3, 4, 2), 2);
        assert_eq!(advance(3, 4, 3), 1);
    }

    #[test]
    fn at_returns_stored_frames() {
        let e = blinker();
        let w = Window::new(-1, -1, 5, 3);
        let seq = SnapshotSequence::build(&e, w, 6).unwrap();
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.window(), &w);
        assert_eq!(seq.at(4), &e.snapshot(4, &w));
        assert!(std::ptr::eq(seq.at(2), seq.iter().nth(2).unwrap()));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn at_past_the_end_panics() {
        let seq = SnapshotSequence::build(&blinker(), Window::new(0, 0, 3, 3), 4).unwrap();
        seq.at(4);
    }

    #[test]
    fn no_generations_is_an_error() {
        let r = SnapshotSequence::build(&blinker(), Window::new(0, 0, 3, 3), 0);
        assert!(matches!(r, Err(BuildError::NoGenerations)));
    }

    #[test]
    fn oversized_requests_fail_before_computing() {
        let e = blinker();
        let r = SnapshotSequence::build(&e, Window::new(0, 0, 100_000, 100_000), 2);
        assert!(matches!(r, Err(BuildError::TooLarge { .. })));
        let r = SnapshotSequence::build(&e, Window::new(0, 0, 1, 1), 1_000_000);
        assert!(matches!(r, Err(BuildError::TooLarge { .. })));
        let r = SnapshotSequence::build(&e, Window::new(0, 0, usize::MAX / 2, 4), 2);
        assert!(matches!(r, Err(BuildError::TooLarge { .. })));
        let r = SnapshotSequence::build(&e, Window::new(0, 0, usize::MAX, usize::MAX), usize::MAX);
        assert!(matches!(r, Err(BuildError::TooLarge { cells: u128::MAX, .. })));
        assert_eq!(e.passes(), 0);
    }

    #[test]
    fn period_is_detected_from_frames() {
        let e = blinker();
        let w = Window::new(-1, -1, 5, 3);
        assert_eq!(SnapshotSequence::build(&e, w, 5).unwrap().detect_period(), Some(2));
        assert_eq!(SnapshotSequence::build(&e, w, 2).unwrap().detect_period(), None);
        assert_eq!(SnapshotSequence::build(&e, w, 1).unwrap().detect_period(), None);

        let block = Engine::new(Pattern::parse("OO\nOO", 'O').unwrap());
        let seq = SnapshotSequence::build(&block, Window::new(0, 0, 2, 2), 3).unwrap();
        assert_eq!(seq.detect_period(), Some(1));
    }

    #[test]
    fn playback_never_recomputes() {
        let e = blinker();
        let seq = SnapshotSequence::build(&e, Window::new(-1, -1, 5, 3), 4).unwrap();
        let mut i = 0;
        for _ in 0..100 {
            seq.at(i);
            i = advance(i, seq.len(), 2);
        }
        assert_eq!(e.passes(), 1);
    }
}
