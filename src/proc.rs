use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::debug;

use crate::{
    grid::{Snapshot, Window},
    pattern::Pattern,
};

/// B3/S23: two live neighbours keep the cell as it was, three make it live,
/// anything else kills it.
#[inline]
pub fn next_state(previous: bool, neighbours: u8) -> bool {
    match neighbours {
        2 => previous,
        3 => true,
        _ => false,
    }
}

/// A finite working copy of the plane, double buffered.
///
/// Cells beyond its edge are read as dead, so after `t` ticks only cells
/// at least `t` away from the edge are guaranteed to match the unbounded plane.
#[derive(Clone)]
pub struct Field {
    area: Window,
    data: Vec<bool>,
    back: Vec<bool>,
}

impl Field {
    /// Copies `area` of the pattern at generation 0.
    pub fn new(pattern: &Pattern, area: Window) -> Self {
        let mut data = Vec::with_capacity(area.area());
        for j in 0..area.h() as i64 {
            for i in 0..area.w() as i64 {
                data.push(pattern.get(area.x().saturating_add(i), area.y().saturating_add(j)));
            }
        }
        Field {
            area,
            back: vec![false; data.len()],
            data,
        }
    }

    #[inline]
    pub fn area(&self) -> &Window {
        &self.area
    }

    #[inline]
    fn get(&self, i: i64, j: i64) -> bool {
        if i < 0 || j < 0 || i >= self.area.w() as i64 || j >= self.area.h() as i64 {
            false
        } else {
            self.data[j as usize * self.area.w() + i as usize]
        }
    }

    fn neighbours(&self, i: i64, j: i64) -> u8 {
        [
            self.get(i - 1, j - 1),
            self.get(i, j - 1),
            self.get(i + 1, j - 1),
            self.get(i - 1, j),
            self.get(i + 1, j),
            self.get(i - 1, j + 1),
            self.get(i, j + 1),
            self.get(i + 1, j + 1),
        ]
        .iter()
        .filter(|c| **c)
        .count() as u8
    }

    pub fn tick(&mut self) {
        let (w, h) = (self.area.w(), self.area.h());
        for j in 0..h {
            for i in 0..w {
                let idx = j * w + i;
                self.back[idx] = next_state(self.data[idx], self.neighbours(i as i64, j as i64));
            }
        }
        std::mem::swap(&mut self.data, &mut self.back);
    }

    /// Copies `window`, which must lie inside this field.
    pub fn snapshot(&self, window: &Window) -> Snapshot {
        let dx = window.x().abs_diff(self.area.x()) as usize;
        let dy = window.y().abs_diff(self.area.y()) as usize;
        debug_assert!(dx + window.w() <= self.area.w() && dy + window.h() <= self.area.h());

        let mut cells = Vec::with_capacity(window.area());
        for j in dy..dy + window.h() {
            let start = j * self.area.w() + dx;
            cells.extend_from_slice(&self.data[start..start + window.w()]);
        }
        Snapshot::from_cells(window.w(), window.h(), cells)
    }
}

/// Evaluates the Game of Life over the unbounded plane seeded with a pattern.
pub struct Engine {
    pattern: Pattern,
    passes: AtomicUsize,
}

impl Engine {
    pub fn new(pattern: Pattern) -> Self {
        Engine {
            pattern,
            passes: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Number of materialization passes run so far.
    #[inline]
    pub fn passes(&self) -> usize {
        self.passes.load(Ordering::Relaxed)
    }

    /// The working field needed to produce `generations` generations of `window`.
    pub fn field_area(window: &Window, generations: usize) -> Window {
        window.padded(generations.saturating_sub(1))
    }

    /// Whether every cell of `window` is still dead at generation `t`: life
    /// spreads at most one cell per generation beyond the pattern.
    #[inline]
    pub fn out_of_reach(&self, window: &Window, t: usize) -> bool {
        window.beyond(self.pattern.width(), self.pattern.height(), t)
    }

    /// Snapshots of `window` for generations `0..generations`, in one pass.
    pub fn materialize(&self, window: &Window, generations: usize) -> Vec<Snapshot> {
        self.passes.fetch_add(1, Ordering::Relaxed);
        if generations == 0 {
            return vec![];
        }
        if self.out_of_reach(window, generations - 1) {
            return vec![Snapshot::dead(window.w(), window.h()); generations];
        }

        let area = Self::field_area(window, generations);
        debug!(%window, field = %area, generations, "materializing");

        let mut field = Field::new(&self.pattern, area);
        let mut out = Vec::with_capacity(generations);
        out.push(field.snapshot(window));
        for _ in 1..generations {
            field.tick();
            out.push(field.snapshot(window));
        }
        out
    }

    pub fn snapshot(&self, t: usize, window: &Window) -> Snapshot {
        if self.out_of_reach(window, t) {
            return Snapshot::dead(window.w(), window.h());
        }
        let mut gens = self.materialize(window, t + 1);
        gens.swap_remove(t)
    }

    pub fn cell_state(&self, t: usize, x: i64, y: i64) -> bool {
        self.snapshot(t, &Window::new(x, y, 1, 1)).get(0, 0) == Some(true)
    }
}
