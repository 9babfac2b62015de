//! Field module - manages the game grid
//!
//! The field is a `height x width` grid where each cell is empty or holds the tag of
//! the figure that was locked there. Storage is a flat row-major vector.
//!
//! Everything outside `[0, height) x [0, width)` reads as occupied: columns past the
//! edges are walls, rows past the bottom are floor, rows above the top are ceiling.
//! Collision checks therefore need no separate bounds branch.

use crate::error::FieldError;
use crate::types::{Cell, Coord, ShapeTag};

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Field {
    /// Create an empty field.
    ///
    /// Dimensions are validated by `GameConfig::validate`; a zero dimension here yields
    /// a field on which every coordinate is out of bounds.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, row: i16, col: i16) -> Option<usize> {
        if row < 0 || col < 0 || row >= self.height as i16 || col >= self.width as i16 {
            return None;
        }
        Some(row as usize * self.width as usize + col as usize)
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Get cell at `(row, col)`. Returns None if out of bounds.
    pub fn get(&self, row: i16, col: i16) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    pub fn in_bounds(&self, row: i16, col: i16) -> bool {
        self.index(row, col).is_some()
    }

    /// Occupancy query. Out-of-bounds coordinates are walls/floor and count as occupied.
    pub fn is_occupied(&self, row: i16, col: i16) -> bool {
        !matches!(self.get(row, col), Some(None))
    }

    /// True iff every coordinate is inside the field and empty.
    pub fn fits<I>(&self, cells: I) -> bool
    where
        I: IntoIterator<Item = Coord>,
    {
        cells
            .into_iter()
            .all(|(row, col)| !self.is_occupied(row, col))
    }

    /// Mark cells occupied with `tag`.
    ///
    /// All cells are validated before any is written, so a failed lock leaves the field
    /// untouched. A failure means the caller skipped a legality check.
    pub fn lock<I>(&mut self, cells: I, tag: ShapeTag) -> Result<(), FieldError>
    where
        I: IntoIterator<Item = Coord>,
    {
        let mut targets: Vec<usize> = Vec::new();
        for (row, col) in cells {
            match self.index(row, col) {
                Some(idx) if self.cells[idx].is_none() && !targets.contains(&idx) => {
                    targets.push(idx)
                }
                _ => return Err(FieldError::InvalidCell { row, col }),
            }
        }
        for idx in targets {
            self.cells[idx] = Some(tag);
        }
        Ok(())
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height as usize {
            return false;
        }
        let start = row * self.width as usize;
        self.cells[start..start + self.width as usize]
            .iter()
            .all(|cell| cell.is_some())
    }

    /// Remove every completed row and return how many were removed.
    pub fn clear_completed_rows(&mut self) -> usize {
        self.remove_completed_rows().len()
    }

    /// Remove every completed row in one pass, shifting the rows above down.
    ///
    /// Returns the removed row indices (as they were before the shift), top to bottom.
    /// Vacated rows at the top become empty.
    pub fn remove_completed_rows(&mut self) -> Vec<usize> {
        let mut removed = Vec::new();
        let width = self.width as usize;
        let mut write_row = self.height as usize;

        // Two pointers: scan bottom to top, compacting surviving rows downwards.
        for read_row in (0..self.height as usize).rev() {
            if self.is_row_full(read_row) {
                removed.push(read_row);
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.cells.copy_within(src..src + width, write_row * width);
                }
            }
        }

        for cell in &mut self.cells[..write_row * width] {
            *cell = None;
        }

        removed.reverse();
        removed
    }

    /// Empty the whole field (game restart).
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1) as usize)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Build a field from a picture, one string per row: `.` is empty, any other
    /// character is occupied with tag 1.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len() as u16;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u16;
        let mut field = Self::new(width, height);
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate().take(width as usize) {
                if ch != '.' {
                    field.cells[row * width as usize + col] = Some(1);
                }
            }
        }
        field
    }

    /// Inverse of [`Field::from_rows`]: `#` for occupied, `.` for empty.
    pub fn to_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|cell| if cell.is_some() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_as_occupied() {
        let field = Field::new(10, 20);
        assert!(!field.is_occupied(0, 0));
        assert!(!field.is_occupied(19, 9));
        assert!(field.is_occupied(0, -1));
        assert!(field.is_occupied(0, 10));
        assert!(field.is_occupied(20, 0));
        assert!(field.is_occupied(-1, 0));
    }

    #[test]
    fn test_lock_writes_tag() {
        let mut field = Field::new(4, 4);
        field.lock([(3, 0), (3, 1)], 7).unwrap();
        assert_eq!(field.get(3, 0), Some(Some(7)));
        assert_eq!(field.get(3, 1), Some(Some(7)));
        assert_eq!(field.occupied_count(), 2);
    }

    #[test]
    fn test_lock_rejects_occupied_without_partial_write() {
        let mut field = Field::new(4, 4);
        field.lock([(3, 1)], 1).unwrap();
        let err = field.lock([(3, 0), (3, 1)], 2).unwrap_err();
        assert_eq!(err, FieldError::InvalidCell { row: 3, col: 1 });
        assert_eq!(field.get(3, 0), Some(None));
    }

    #[test]
    fn test_lock_rejects_out_of_bounds() {
        let mut field = Field::new(4, 4);
        assert!(field.lock([(4, 0)], 1).is_err());
        assert!(field.lock([(0, -1)], 1).is_err());
        assert_eq!(field.occupied_count(), 0);
    }

    #[test]
    fn test_lock_rejects_duplicate_cells() {
        let mut field = Field::new(4, 4);
        assert!(field.lock([(1, 1), (1, 1)], 1).is_err());
    }

    #[test]
    fn test_clear_is_noop_without_full_rows() {
        let mut field = Field::from_rows(&["....", "#...", "##.#"]);
        let before = field.clone();
        assert_eq!(field.clear_completed_rows(), 0);
        assert_eq!(field, before);
    }

    #[test]
    fn test_clear_shifts_rows_above() {
        let mut field = Field::from_rows(&["#...", "####", ".#..", "####"]);
        assert_eq!(field.remove_completed_rows(), vec![1, 3]);
        assert_eq!(field.to_rows(), vec!["....", "....", "#...", ".#.."]);
    }

    #[test]
    fn test_rows_iterates_top_to_bottom() {
        let field = Field::from_rows(&["#..", "..#"]);
        let rows: Vec<_> = field.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], Some(1));
        assert_eq!(rows[1][2], Some(1));
    }
}
