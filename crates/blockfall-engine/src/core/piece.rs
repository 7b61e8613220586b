use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Side length of the largest shape in the catalog.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Origin offsets tried, in order, after a clockwise rotation.
///
/// The first offset that yields a collision-free placement wins:
/// unchanged, one column left, one column right, one row up.
pub const ROTATION_KICKS: [(i32, i32); 4] = [(0, 0), (-1, 0), (1, 0), (0, -1)];

/// A live piece: catalog kind, current shape, and grid position.
///
/// Pieces are immutable values. Movement and rotation return new `Piece`s,
/// which the owner swaps in after a collision check.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Piece, PieceKind};
///
/// let grid = Grid::new(10, 20);
/// let piece = Piece::spawn(PieceKind::T, grid.width());
/// let moved = piece.left();
/// let rotated = moved.super_rotated_right(&grid).unwrap();
/// assert_eq!(rotated.shape(), PieceKind::T.shape().rotated_right());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    position: PiecePosition,
    shape: PieceShape,
    kind: PieceKind,
}

impl Piece {
    #[must_use]
    pub fn new(kind: PieceKind, position: PiecePosition) -> Self {
        Self {
            position,
            shape: kind.shape(),
            kind,
        }
    }

    /// Creates a piece horizontally centred at the top of a grid of the given width.
    ///
    /// The origin column is `width / 2 - shape_size / 2` and the origin row is 0.
    #[must_use]
    pub fn spawn(kind: PieceKind, grid_width: usize) -> Self {
        let shape = kind.shape();
        let x = to_coord(grid_width / 2) - to_coord(shape.size() / 2);
        Self::new(kind, PiecePosition::new(x, 0))
    }

    #[must_use]
    pub fn position(&self) -> PiecePosition {
        self.position
    }

    #[must_use]
    pub fn shape(&self) -> PieceShape {
        self.shape
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn color_id(&self) -> u8 {
        self.kind.color_id()
    }

    /// Returns the absolute grid coordinates of every occupied cell.
    ///
    /// Rows may be negative while the piece is still above the field.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.occupied_offsets().map(move |(dx, dy)| {
            (
                self.position.x + to_coord(dx),
                self.position.y + to_coord(dy),
            )
        })
    }

    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            ..*self
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.moved(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.moved(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.moved(0, 1)
    }

    /// Rotates the shape 90° clockwise around the same origin, without any checks.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        Self {
            shape: self.shape.rotated_right(),
            ..*self
        }
    }

    /// Rotates clockwise and resolves collisions through [`ROTATION_KICKS`].
    ///
    /// Returns `None` when every candidate placement collides; the caller keeps
    /// the unrotated piece in that case.
    #[must_use]
    pub fn super_rotated_right(&self, grid: &Grid) -> Option<Self> {
        let rotated = self.rotated_right();
        ROTATION_KICKS
            .iter()
            .map(|&(dx, dy)| rotated.moved(dx, dy))
            .find(|candidate| !grid.is_colliding(candidate))
    }
}

fn to_coord(n: usize) -> i32 {
    i32::try_from(n).expect("grid coordinates fit in i32")
}

/// Grid coordinate of a shape's top-left cell.
///
/// - X increases rightward (columns), Y increases downward (rows)
/// - (0, 0) is the top-left cell of the grid
/// - Both axes are signed: kicks and empty shape columns can push the origin
///   past the left edge, and freshly spawned pieces may sit above row 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    x: i32,
    y: i32,
}

impl PiecePosition {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.y
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Square occupancy matrix of a piece.
///
/// Only the top-left `size × size` block of `cells` is meaningful; the rest
/// is always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceShape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl PieceShape {
    #[expect(clippy::cast_possible_truncation)]
    const fn new(size: usize, cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        assert!(size >= 2 && size <= MAX_SHAPE_SIZE);
        Self {
            size: size as u8,
            cells,
        }
    }

    /// Side length of the bounding square (2, 3 or 4).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    /// Returns whether the cell at column `x`, row `y` of the matrix is occupied.
    #[must_use]
    pub const fn is_occupied(&self, x: usize, y: usize) -> bool {
        x < self.size() && y < self.size() && self.cells[y][x]
    }

    /// Returns the rows of the matrix, each `size` cells wide.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells[..self.size()]
            .iter()
            .map(|row| &row[..self.size()])
    }

    /// Returns `(dx, dy)` offsets of occupied cells relative to the top-left corner.
    pub fn occupied_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows().enumerate().flat_map(|(dy, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(dx, &occupied)| occupied.then_some((dx, dy)))
        })
    }

    /// Returns a copy rotated 90° clockwise: `new[x][n - 1 - y] = old[y][x]`.
    #[must_use]
    pub const fn rotated_right(&self) -> Self {
        let size = self.size();
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                cells[x][size - 1 - y] = self.cells[y][x];
                x += 1;
            }
            y += 1;
        }
        Self {
            size: self.size,
            cells,
        }
    }
}

/// The seven catalog pieces.
///
/// The discriminant order defines the color ids: `I` is 1 through `L` at 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns the color id written into the grid when this piece locks (1..=7).
    #[must_use]
    pub const fn color_id(self) -> u8 {
        self as u8 + 1
    }

    /// Inverse of [`Self::color_id`].
    #[must_use]
    pub const fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Returns the spawn orientation of this piece.
    #[must_use]
    pub const fn shape(self) -> PieceShape {
        PIECE_SHAPES[self as usize]
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

const PIECE_SHAPES: [PieceShape; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        PieceShape::new(4, [EEEE, [C, C, C, C], EEEE, EEEE]),
        // O-piece
        PieceShape::new(2, [[C, C, E, E], [C, C, E, E], EEEE, EEEE]),
        // T-piece
        PieceShape::new(3, [[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
        // S-piece
        PieceShape::new(3, [[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // Z-piece
        PieceShape::new(3, [[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
        // J-piece
        PieceShape::new(3, [[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // L-piece
        PieceShape::new(3, [[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
    ]
};
