use std::fmt;

/// A rectangle of the unbounded plane, `width` columns by `height` rows,
/// whose top-left cell is `(x, y)`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Window {
    x: i64,
    y: i64,
    w: usize,
    h: usize,
}

impl Window {
    #[inline]
    pub const fn new(x: i64, y: i64, width: usize, height: usize) -> Self {
        Window { x, y, w: width, h: height }
    }

    #[inline]
    pub fn x(&self) -> i64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> i64 {
        self.y
    }

    #[inline]
    pub fn w(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn h(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.w.saturating_mul(self.h)
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        let (dx, dy) = (x as i128 - self.x as i128, y as i128 - self.y as i128);
        dx >= 0 && dy >= 0 && dx < self.w as i128 && dy < self.h as i128
    }

    /// The same window grown by `margin` cells on every side.
    ///
    /// Clamps at the ends of the coordinate range instead of wrapping.
    #[inline]
    pub fn padded(&self, margin: usize) -> Self {
        let shift = i64::try_from(margin).unwrap_or(i64::MAX);
        let grow = margin.saturating_mul(2);
        Window {
            x: self.x.saturating_sub(shift),
            y: self.y.saturating_sub(shift),
            w: self.w.saturating_add(grow),
            h: self.h.saturating_add(grow),
        }
    }

    /// Whether no cell of the window lies within `reach` cells of the
    /// `width` by `height` rectangle whose top-left cell is the origin.
    pub fn beyond(&self, width: usize, height: usize, reach: usize) -> bool {
        let reach = reach as i128;
        let (x0, y0) = (self.x as i128, self.y as i128);
        self.w == 0
            || self.h == 0
            || x0 + self.w as i128 <= -reach
            || y0 + self.h as i128 <= -reach
            || x0 >= width as i128 + reach
            || y0 >= height as i128 + reach
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window {}x{} at ({}, {})", self.w, self.h, self.x, self.y)
    }
}

/// The state of every cell of one window at one generation.
///
/// Row 0 is the top of the window and column 0 its left edge.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Snapshot {
    w: usize,
    h: usize,
    data: Vec<bool>,
}

impl Snapshot {
    pub(crate) fn from_cells(w: usize, h: usize, data: Vec<bool>) -> Self {
        debug_assert_eq!(data.len(), w * h);
        Snapshot { w, h, data }
    }

    pub(crate) fn dead(w: usize, h: usize) -> Self {
        Snapshot { w, h, data: vec![false; w * h] }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// Cell at `column`, `row`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, column: usize, row: usize) -> Option<bool> {
        if column >= self.w || row >= self.h {
            None
        } else {
            Some(self.data[row * self.w + column])
        }
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.w.max(1)).take(self.h)
    }

    pub fn population(&self) -> usize {
        self.data.iter().filter(|c| **c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_contains_its_cells_only() {
        let w = Window::new(-5, -5, 60, 30);
        assert!(w.contains(-5, -5));
        assert!(w.contains(54, 24));
        assert!(!w.contains(55, 24));
        assert!(!w.contains(54, 25));
        assert!(!w.contains(-6, 0));
    }

    #[test]
    fn padding_grows_every_side() {
        let w = Window::new(0, 0, 3, 2).padded(4);
        assert_eq!(w, Window::new(-4, -4, 11, 10));
    }

    #[test]
    fn padding_clamps_at_the_coordinate_limits() {
        let w = Window::new(i64::MIN, i64::MIN + 2, 1, 1).padded(5);
        assert_eq!(w, Window::new(i64::MIN, i64::MIN, 11, 11));
        let w = Window::new(0, 0, usize::MAX / 2, 1).padded(usize::MAX);
        assert_eq!((w.x(), w.w(), w.h()), (i64::MIN + 1, usize::MAX, usize::MAX));
        assert_eq!(Window::new(0, 0, usize::MAX, 2).area(), usize::MAX);
    }

    #[test]
    fn extreme_windows_contain_their_corner() {
        assert!(Window::new(i64::MIN, i64::MIN, 1, 1).contains(i64::MIN, i64::MIN));
        assert!(!Window::new(i64::MIN, 0, 1, 1).contains(i64::MAX, 0));
        assert!(Window::new(i64::MAX, 0, 1, 1).contains(i64::MAX, 0));
    }

    #[test]
    fn beyond_measures_distance_to_the_rectangle() {
        // rectangle 4x3 at the origin, reach 2: cells in -2..6 x -2..5 are reachable
        assert!(!Window::new(-2, -2, 1, 1).beyond(4, 3, 2));
        assert!(Window::new(-3, 0, 1, 1).beyond(4, 3, 2));
        assert!(!Window::new(5, 4, 1, 1).beyond(4, 3, 2));
        assert!(Window::new(6, 0, 1, 1).beyond(4, 3, 2));
        assert!(Window::new(0, 5, 10, 1).beyond(4, 3, 2));
        assert!(!Window::new(-100, -100, 300, 300).beyond(4, 3, 0));
        assert!(Window::new(0, 0, 0, 5).beyond(4, 3, 2));
        assert!(Window::new(i64::MIN, 0, 1, 1).beyond(4, 3, 2));
        assert!(Window::new(i64::MAX, 0, 1, 1).beyond(4, 3, 2));
    }

    #[test]
    fn rows_are_top_to_bottom() {
        let s = Snapshot::from_cells(3, 2, vec![true, false, false, false, false, true]);
        let rows: Vec<&[bool]> = s.rows().collect();
        assert_eq!(rows, vec![&[true, false, false][..], &[false, false, true][..]]);
        assert_eq!(s.get(2, 1), Some(true));
        assert_eq!(s.get(3, 0), None);
        assert_eq!(s.population(), 2);
    }

    #[test]
    fn empty_window_has_no_rows() {
        let s = Snapshot::from_cells(0, 4, vec![]);
        assert_eq!(s.rows().count(), 0);
    }
}
