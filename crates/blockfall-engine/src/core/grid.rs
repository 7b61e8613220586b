use super::piece::{Piece, PieceKind};

/// A single cell of the [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell of a locked piece of a specific type.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Returns 0 for an empty cell and the locked piece's color id (1..=7) otherwise.
    #[must_use]
    pub fn color_id(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Piece(kind) => kind.color_id(),
        }
    }
}

/// Fixed-size playing field holding locked piece cells.
///
/// Rows are stored top to bottom; row 0 is the top of the visible field.
/// The dimensions never change after creation. Only placement
/// ([`Grid::fill_piece`]) and line clearing ([`Grid::clear_lines`]) mutate it
/// during play.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Grid, Piece, PieceKind};
///
/// let mut grid = Grid::new(10, 20);
/// let piece = Piece::spawn(PieceKind::O, grid.width());
/// assert!(!grid.is_colliding(&piece));
/// assert!(grid.collides(&piece, 0, 19));
///
/// grid.fill_piece(&piece.moved(0, 18));
/// assert_eq!(grid.cell(4, 19).color_id(), PieceKind::O.color_id());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Largest supported side length.
    pub const MAX_SIZE: usize = 1 << 15;

    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or larger than [`Self::MAX_SIZE`].
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!((1..=Self::MAX_SIZE).contains(&width), "invalid width {width}");
        assert!(
            (1..=Self::MAX_SIZE).contains(&height),
            "invalid height {height}"
        );
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the cell at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of grid");
        self.cells[y * self.width + x]
    }

    /// Overwrites a single cell.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        assert!(x < self.width && y < self.height, "({x}, {y}) out of grid");
        self.cells[y * self.width + x] = cell;
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    /// Returns whether no cell is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }

    fn contains_column(&self, x: i32) -> bool {
        usize::try_from(x).is_ok_and(|x| x < self.width)
    }

    /// Tests whether `piece`, shifted by `(dx, dy)`, would overlap the grid.
    ///
    /// An occupied cell collides when it lands outside `[0, width)`
    /// horizontally, at or below `height`, or on a non-empty cell. Cells above
    /// the field (negative rows) only check horizontal bounds, so pieces can
    /// spawn partially above the top edge.
    #[must_use]
    pub fn collides(&self, piece: &Piece, dx: i32, dy: i32) -> bool {
        piece.occupied_positions().any(|(x, y)| {
            let (x, y) = (x + dx, y + dy);
            if y < 0 {
                return !self.contains_column(x);
            }
            self.index(x, y)
                .is_none_or(|index| !self.cells[index].is_empty())
        })
    }

    /// Tests whether `piece` overlaps the grid at its current position.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        self.collides(piece, 0, 0)
    }

    /// Writes the piece's color into every occupied cell inside the grid.
    ///
    /// Cells above the top edge are dropped.
    pub fn fill_piece(&mut self, piece: &Piece) {
        for (x, y) in piece.occupied_positions() {
            if let Some(index) = self.index(x, y) {
                self.cells[index] = Cell::Piece(piece.kind());
            }
        }
    }

    fn is_row_filled(&self, y: usize) -> bool {
        self.cells[y * self.width..][..self.width]
            .iter()
            .all(|cell| !cell.is_empty())
    }

    /// Clears filled rows and returns the number of rows cleared.
    ///
    /// Rows above each cleared row shift down, keeping their relative order,
    /// and empty rows are inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let width = self.width;
        let mut count = 0;
        for y in (0..self.height).rev() {
            if self.is_row_filled(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                let start = y * width;
                self.cells
                    .copy_within(start..start + width, start + count * width);
            }
        }
        self.cells[..count * width].fill(Cell::Empty);
        count
    }
}
