use std::fmt;

use super::{
    COLS, ROWS,
    stone::{Stone, StoneKind},
};

const TOTAL_ROWS: usize = ROWS + 1;
const FLOOR_CELL: u8 = 8;

/// One board row: `0` is empty, anything else is occupied.
pub type Row = [u8; COLS];

const EMPTY_ROW: Row = [0; COLS];
const FLOOR_ROW: Row = [FLOOR_CELL; COLS];

/// Grid of settled cells.
///
/// The board holds [`ROWS`] playable rows of [`COLS`] cells, plus one
/// synthetic floor row below them whose cells are permanently occupied. The
/// floor makes "can this stone move further down?" a plain collision query:
/// nothing ever needs a separate bottom-bounds branch.
///
/// Each cell stores `0` (empty) or the colour id of the stone that filled it.
/// Boards are plain values; cloning copies the whole grid.
///
/// # Example
///
/// ```
/// use tetrevo_engine::{Board, Stone, StoneKind};
///
/// let board = Board::EMPTY;
/// let stone = Stone::new(StoneKind::O);
///
/// assert!(!board.collision(&stone, 0, 0));
/// assert!(board.collision(&stone, -1, 0));
/// assert!(board.collision(&stone, 0, 21)); // overlaps the floor
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: [Row; TOTAL_ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

fn offset_index(origin: i32, delta: usize, len: usize) -> Option<usize> {
    let delta = i32::try_from(delta).ok()?;
    let index = usize::try_from(origin.checked_add(delta)?).ok()?;
    (index < len).then_some(index)
}

impl Board {
    pub const EMPTY: Self = {
        let mut rows = [EMPTY_ROW; TOTAL_ROWS];
        rows[ROWS] = FLOOR_ROW;
        Self { rows }
    };

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> u8 {
        self.rows[y][x]
    }

    /// Sets a playable cell.
    ///
    /// # Panics
    ///
    /// Panics if `y` addresses the floor row or lies outside the board.
    pub fn set_cell(&mut self, x: usize, y: usize, value: u8) {
        assert!(y < ROWS, "row {y} is not a playable row");
        self.rows[y][x] = value;
    }

    /// Returns the playable rows, top to bottom (the floor is excluded).
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.rows[..ROWS].iter()
    }

    /// Returns `true` if the playable row `y` has no empty cell.
    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        y < ROWS && !self.rows[y].contains(&0)
    }

    /// Returns the height of every column.
    ///
    /// A column's height is [`ROWS`] minus the number of empty cells above its
    /// topmost occupied cell; an empty column has height 0.
    #[must_use]
    pub fn column_heights(&self) -> [usize; COLS] {
        let mut heights = [0; COLS];
        for (x, height) in heights.iter_mut().enumerate() {
            let empty = self.rows[..ROWS]
                .iter()
                .take_while(|row| row[x] == 0)
                .count();
            *height = ROWS - empty;
        }
        heights
    }

    /// Checks whether `stone` anchored at `(x, y)` is blocked.
    ///
    /// A stone is blocked when any of its occupied cells falls outside the grid
    /// (left, right, or below the floor) or lands on a non-empty cell. Both
    /// cases answer the same question, so they share one predicate.
    #[must_use]
    pub fn collision(&self, stone: &Stone, x: i32, y: i32) -> bool {
        stone.occupied_cells().any(|(dx, dy, _)| {
            match (
                offset_index(x, dx, COLS),
                offset_index(y, dy, TOTAL_ROWS),
            ) {
                (Some(cx), Some(cy)) => self.rows[cy][cx] != 0,
                _ => true,
            }
        })
    }

    /// Returns a copy of the board with `stone` merged in at `(x, y)`.
    ///
    /// Cell values are added, not overwritten. Only call this for a placement
    /// that has been confirmed to rest (cannot fall any further).
    #[must_use]
    pub fn commit(&self, stone: &Stone, x: i32, y: i32) -> Self {
        let mut board = self.clone();
        board.fill_stone(stone, x, y);
        board
    }

    /// In-place variant of [`Self::commit`].
    ///
    /// # Panics
    ///
    /// Panics if an occupied stone cell lies outside the playable area.
    pub fn fill_stone(&mut self, stone: &Stone, x: i32, y: i32) {
        for (dx, dy, value) in stone.occupied_cells() {
            let cx = offset_index(x, dx, COLS).expect("committed stone must lie inside the board");
            let cy = offset_index(y, dy, ROWS).expect("committed stone must lie above the floor");
            self.rows[cy][cx] += value;
        }
    }

    /// Removes every full playable row and returns the new board with the count.
    ///
    /// Removed rows are replaced by empty rows prepended at the top; the
    /// remaining rows keep their relative order. The floor is never touched.
    /// When no row is full the board is returned unchanged with a count of 0.
    #[must_use]
    pub fn clear_full_rows(&self) -> (Self, usize) {
        let mut board = self.clone();
        let count = board.clear_full_rows_in_place();
        (board, count)
    }

    /// In-place variant of [`Self::clear_full_rows`].
    pub fn clear_full_rows_in_place(&mut self) -> usize {
        let playable_rows = &mut self.rows[..ROWS];
        let mut count = 0;
        for y in (0..ROWS).rev() {
            if !playable_rows[y].contains(&0) {
                count += 1;
                continue;
            }
            if count > 0 {
                playable_rows[y + count] = playable_rows[y];
            }
        }
        playable_rows[..count].fill(EMPTY_ROW);
        count
    }

    /// Creates a board from ASCII art for tests and fixtures.
    ///
    /// Rows are aligned to the bottom of the playable area: the last line of
    /// `art` becomes the lowest playable row. `.` is empty, `#` is an occupied
    /// cell with colour id 1, and a kind letter (`T`, `S`, `Z`, `J`, `L`, `I`,
    /// `O`) uses that kind's colour id. Whitespace inside a line is ignored.
    ///
    /// # Panics
    ///
    /// Panics on an unknown character, a row that is not [`COLS`] cells wide, or
    /// more than [`ROWS`] rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(
            lines.len() <= ROWS,
            "at most {ROWS} rows are allowed, got {}",
            lines.len()
        );

        let mut board = Self::EMPTY;
        let top = ROWS - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let cells: Vec<u8> = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    '.' => 0,
                    '#' => 1,
                    c => StoneKind::from_char(c)
                        .unwrap_or_else(|| panic!("invalid board cell {c:?}"))
                        .color_id(),
                })
                .collect();
            assert_eq!(
                cells.len(),
                COLS,
                "Each row must have exactly {COLS} cells, got {} at row {i}",
                cells.len()
            );
            board.rows[top + i].copy_from_slice(&cells);
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                let c = match cell {
                    0 => '.',
                    id => StoneKind::from_color_id(id).map_or('#', StoneKind::as_char),
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_has_floor() {
        let board = Board::EMPTY;
        assert!(board.rows().all(|row| row.iter().all(|&c| c == 0)));
        assert!(board.rows[ROWS].iter().all(|&c| c != 0));
        assert_eq!(board.rows().count(), ROWS);
    }

    #[test]
    fn test_collision_inside_bounds_without_overlap() {
        let board = Board::EMPTY;
        for kind in StoneKind::ALL {
            let stone = Stone::new(kind);
            let max_x = i32::try_from(COLS - stone.width()).unwrap();
            let max_y = i32::try_from(ROWS - stone.height()).unwrap();
            for x in 0..=max_x {
                for y in 0..=max_y {
                    assert!(!board.collision(&stone, x, y), "{kind:?} at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_collision_out_of_bounds() {
        let board = Board::EMPTY;
        for kind in StoneKind::ALL {
            let stone = Stone::new(kind);
            let max_x = i32::try_from(COLS - stone.width()).unwrap();
            let max_y = i32::try_from(ROWS - stone.height()).unwrap();
            assert!(board.collision(&stone, -1, 0), "{kind:?} left");
            assert!(board.collision(&stone, max_x + 1, 0), "{kind:?} right");
            assert!(board.collision(&stone, 0, max_y + 1), "{kind:?} floor");
            assert!(board.collision(&stone, 0, max_y + 5), "{kind:?} below");
        }
    }

    #[test]
    fn test_collision_with_settled_cell() {
        let mut board = Board::EMPTY;
        board.set_cell(4, 10, 3);
        let stone = Stone::new(StoneKind::O);
        assert!(board.collision(&stone, 3, 9));
        assert!(board.collision(&stone, 4, 10));
        assert!(!board.collision(&stone, 5, 9));
        assert!(!board.collision(&stone, 3, 7));
    }

    #[test]
    fn test_collision_ignores_empty_stone_cells() {
        // The T-stone's bottom corners are empty and may overlap occupied cells.
        let mut board = Board::EMPTY;
        board.set_cell(0, 21, 1);
        board.set_cell(2, 21, 1);
        let stone = Stone::new(StoneKind::T);
        assert!(!board.collision(&stone, 0, 20));
    }

    #[test]
    fn test_commit_adds_cells() {
        let board = Board::EMPTY;
        let stone = Stone::new(StoneKind::S);
        let committed = board.commit(&stone, 2, 20);
        assert_eq!(board, Board::EMPTY);
        assert_eq!(committed.cell(3, 20), 2);
        assert_eq!(committed.cell(4, 20), 2);
        assert_eq!(committed.cell(2, 21), 2);
        assert_eq!(committed.cell(3, 21), 2);
        assert_eq!(committed.cell(2, 20), 0);
        assert_eq!(committed.rows().flatten().filter(|&&c| c != 0).count(), 4);
    }

    #[test]
    fn test_clear_full_rows_is_idempotent_without_full_rows() {
        let board = Board::from_ascii(
            "
            ..........
            TTT.......
            #########.
            ",
        );
        let (cleared, count) = board.clear_full_rows();
        assert_eq!(count, 0);
        assert_eq!(cleared, board);
    }

    #[test]
    fn test_clear_full_rows_removes_and_preserves_order() {
        let board = Board::from_ascii(
            "
            T.........
            ##########
            .S........
            ##########
            ..Z.......
            ",
        );
        let (cleared, count) = board.clear_full_rows();
        assert_eq!(count, 2);
        let expected = Board::from_ascii(
            "
            T.........
            .S........
            ..Z.......
            ",
        );
        assert_eq!(cleared, expected);
        // Fresh empty rows were prepended at the top.
        assert!(cleared.rows().take(ROWS - 3).flatten().all(|&c| c == 0));
    }

    #[test]
    fn test_clear_full_rows_never_touches_floor() {
        let mut board = Board::EMPTY;
        for y in 0..ROWS {
            for x in 0..COLS {
                board.set_cell(x, y, 1);
            }
        }
        let count = board.clear_full_rows_in_place();
        assert_eq!(count, ROWS);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_is_row_full() {
        let board = Board::from_ascii("##########\n#########.");
        assert!(board.is_row_full(ROWS - 2));
        assert!(!board.is_row_full(ROWS - 1));
        assert!(!board.is_row_full(ROWS));
    }

    #[test]
    fn test_column_heights() {
        let board = Board::from_ascii(
            "
            .#........
            .#.#......
            ##.#.....#
            ",
        );
        assert_eq!(board.column_heights(), [1, 3, 0, 2, 0, 0, 0, 0, 0, 1]);
        assert_eq!(Board::EMPTY.column_heights(), [0; COLS]);
    }

    #[test]
    fn test_display_uses_kind_letters() {
        let board = Board::from_ascii("IIII....O#");
        let text = board.to_string();
        assert_eq!(text.lines().count(), ROWS);
        assert_eq!(text.lines().last(), Some("IIII....OT"));
    }

    #[test]
    #[should_panic(expected = "exactly 10 cells")]
    fn test_from_ascii_rejects_short_rows() {
        let _ = Board::from_ascii("#####");
    }
}
