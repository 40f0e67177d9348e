use std::sync::OnceLock;

use crate::error::PatternError;

/// Glyph marking a live cell in authored patterns.
pub const LIVING: char = 'O';

// Based on https://conwaylife.com/wiki/New_gun_1
pub const NEW_GUN: &str = "\
..............................OO.................
.............................O.O...............OO
.............................O.................OO
.................O...........OOO.................
OO...............OO..............................
OO................OO.............................
.............OO..OO..............................
.............................OOO.................
.............................O.................OO
.............................O.O...............OO
.............OO..OO...........OO.................
OO................OO.............................
OO...............OO..............................
.................O...............................
";

/// An authored, read-only starting pattern.
///
/// Cell `(i, j)` is column `i`, row `j`; anything outside the authored
/// rectangle is dead.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Pattern {
    w: usize,
    h: usize,
    data: Vec<bool>,
}

impl Pattern {
    /// Reads one row per line, `living` marking live cells. Blank lines are skipped.
    pub fn parse(s: &str, living: char) -> Result<Self, PatternError> {
        let mut data = vec![];
        let mut w = None;
        let mut h = 0;

        for line in s.lines().filter(|l| !l.trim().is_empty()) {
            let row: Vec<bool> = line.chars().map(|c| c == living).collect();
            match w {
                None => w = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(PatternError::Ragged {
                        row: h,
                        expected,
                        found: row.len(),
                    })
                }
                _ => {}
            }
            data.extend(row);
            h += 1;
        }

        let w = w.ok_or(PatternError::Empty)?;
        Ok(Pattern { w, h, data })
    }

    /// The shipped glider gun, parsed once per process.
    pub fn new_gun() -> &'static Pattern {
        static GUN: OnceLock<Pattern> = OnceLock::new();
        GUN.get_or_init(|| Pattern {
            w: 49,
            h: 14,
            data: NEW_GUN
                .lines()
                .flat_map(|l| l.chars().map(|c| c == LIVING))
                .collect(),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn get(&self, i: i64, j: i64) -> bool {
        if i < 0 || j < 0 || i >= self.w as i64 || j >= self.h as i64 {
            false
        } else {
            self.data[j as usize * self.w + i as usize]
        }
    }

    pub fn population(&self) -> usize {
        self.data.iter().filter(|c| **c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gun_matches_its_source_text() {
        let parsed = Pattern::parse(NEW_GUN, LIVING).unwrap();
        assert_eq!(&parsed, Pattern::new_gun());
        assert_eq!(parsed.width(), 49);
        assert_eq!(parsed.height(), 14);
        assert_eq!(parsed.population(), 50);
    }

    #[test]
    fn outside_is_dead() {
        let gun = Pattern::new_gun();
        assert!(gun.get(0, 4));
        assert!(gun.get(48, 1));
        assert!(!gun.get(-1, 4));
        assert!(!gun.get(49, 1));
        assert!(!gun.get(0, 14));
        assert!(!gun.get(i64::MIN, i64::MAX));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert_eq!(
            Pattern::parse("OO.\nO.\n", 'O'),
            Err(PatternError::Ragged { row: 1, expected: 3, found: 2 })
        );
        assert_eq!(Pattern::parse("\n\n", 'O'), Err(PatternError::Empty));
    }
}
