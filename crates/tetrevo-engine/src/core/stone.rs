use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Serialize};

const MAX_STONE_SIZE: usize = 4;

/// The seven stone kinds.
///
/// The discriminant doubles as the colour id written into board cells when a
/// stone of this kind is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum StoneKind {
    /// T-stone.
    T = 1,
    /// S-stone.
    S = 2,
    /// Z-stone.
    Z = 3,
    /// J-stone.
    J = 4,
    /// L-stone.
    L = 5,
    /// I-stone.
    I = 6,
    /// O-stone.
    O = 7,
}

impl Distribution<StoneKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> StoneKind {
        StoneKind::ALL[rng.random_range(0..StoneKind::LEN)]
    }
}

impl StoneKind {
    /// Number of stone kinds (7).
    pub const LEN: usize = 7;

    /// All kinds, ordered by colour id.
    pub const ALL: [Self; Self::LEN] = [
        StoneKind::T,
        StoneKind::S,
        StoneKind::Z,
        StoneKind::J,
        StoneKind::L,
        StoneKind::I,
        StoneKind::O,
    ];

    /// Returns the colour id (1–7) of this kind.
    #[must_use]
    pub const fn color_id(self) -> u8 {
        self as u8
    }

    /// Looks up the kind owning a colour id.
    ///
    /// # Examples
    ///
    /// ```
    /// use tetrevo_engine::StoneKind;
    ///
    /// assert_eq!(StoneKind::from_color_id(6), Some(StoneKind::I));
    /// assert_eq!(StoneKind::from_color_id(0), None);
    /// ```
    #[must_use]
    pub const fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(StoneKind::T),
            2 => Some(StoneKind::S),
            3 => Some(StoneKind::Z),
            4 => Some(StoneKind::J),
            5 => Some(StoneKind::L),
            6 => Some(StoneKind::I),
            7 => Some(StoneKind::O),
            _ => None,
        }
    }

    /// Returns the single character representation of this kind.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            StoneKind::T => 'T',
            StoneKind::S => 'S',
            StoneKind::Z => 'Z',
            StoneKind::J => 'J',
            StoneKind::L => 'L',
            StoneKind::I => 'I',
            StoneKind::O => 'O',
        }
    }

    /// Parses a kind from its single character representation.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'T' => Some(StoneKind::T),
            'S' => Some(StoneKind::S),
            'Z' => Some(StoneKind::Z),
            'J' => Some(StoneKind::J),
            'L' => Some(StoneKind::L),
            'I' => Some(StoneKind::I),
            'O' => Some(StoneKind::O),
            _ => None,
        }
    }

    const fn spawn_shape(self) -> &'static [&'static [u8]] {
        match self {
            StoneKind::T => &[&[1, 1, 1], &[0, 1, 0]],
            StoneKind::S => &[&[0, 2, 2], &[2, 2, 0]],
            StoneKind::Z => &[&[3, 3, 0], &[0, 3, 3]],
            StoneKind::J => &[&[4, 0, 0], &[4, 4, 4]],
            StoneKind::L => &[&[0, 0, 5], &[5, 5, 5]],
            StoneKind::I => &[&[6, 6, 6, 6]],
            StoneKind::O => &[&[7, 7], &[7, 7]],
        }
    }
}

/// A stone shape in one orientation.
///
/// The shape is a dense matrix (at most 4×4) whose nonzero cells hold the
/// colour id. Only the live orientation is stored: rotating yields a new
/// matrix and no rotation index is kept.
///
/// # Example
///
/// ```
/// use tetrevo_engine::{Stone, StoneKind};
///
/// let stone = Stone::new(StoneKind::I);
/// assert_eq!((stone.width(), stone.height()), (4, 1));
///
/// let vertical = stone.rotated_clockwise();
/// assert_eq!((vertical.width(), vertical.height()), (1, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stone {
    kind: StoneKind,
    width: usize,
    height: usize,
    cells: [[u8; MAX_STONE_SIZE]; MAX_STONE_SIZE],
}

impl Stone {
    /// Creates a stone of the given kind in its spawn orientation.
    #[must_use]
    pub fn new(kind: StoneKind) -> Self {
        Self::from_rows(kind, kind.spawn_shape())
    }

    /// Creates a stone from explicit matrix rows.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4×4.
    #[must_use]
    pub fn from_rows(kind: StoneKind, rows: &[&[u8]]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        assert!(
            (1..=MAX_STONE_SIZE).contains(&height) && (1..=MAX_STONE_SIZE).contains(&width),
            "stone matrix must be between 1x1 and 4x4, got {width}x{height}"
        );
        let mut cells = [[0; MAX_STONE_SIZE]; MAX_STONE_SIZE];
        for (dst, src) in cells.iter_mut().zip(rows) {
            assert_eq!(src.len(), width, "stone rows must have equal length");
            dst[..width].copy_from_slice(src);
        }
        Self {
            kind,
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub fn kind(&self) -> StoneKind {
        self.kind
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the matrix rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let width = self.width;
        self.cells[..self.height].iter().map(move |row| &row[..width])
    }

    /// Returns `(dx, dy, colour id)` for every occupied cell, row-major.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &value)| value != 0)
                .map(move |(dx, &value)| (dx, dy, value))
        })
    }

    /// Returns the matrix rotated by one step: `new[r][c] = old[c][width - 1 - r]`.
    ///
    /// This is a plain geometric transform. There are no wall kicks; callers
    /// decide whether the rotated stone fits.
    #[must_use]
    pub fn rotated_clockwise(&self) -> Self {
        let mut cells = [[0; MAX_STONE_SIZE]; MAX_STONE_SIZE];
        for (r, row) in cells.iter_mut().enumerate().take(self.width) {
            for (c, cell) in row.iter_mut().enumerate().take(self.height) {
                *cell = self.cells[c][self.width - 1 - r];
            }
        }
        Self {
            kind: self.kind,
            width: self.height,
            height: self.width,
            cells,
        }
    }
}
