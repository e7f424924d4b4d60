use crate::{BoardError, Color, OccupiedSquare, Piece, RuleSet};

/// A square checker board.
///
/// Row 0 is the top edge and column 0 the left edge. Only squares of one
/// checker color are playable: on a regular board those where `row + col`
/// is odd, on a mirrored board those where it is even.
///
/// The board knows nothing about the rules of movement, it only stores
/// pieces. Keeping moves legal is the job of the [`GameState`](crate::GameState).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    size: i8,
    mirrored: bool,
    /// Row-major, `size * size` entries. Unplayable squares are always `None`.
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Creates a board laid out for the start of a game.
    pub fn new(rules: &RuleSet) -> Self {
        let mut board = Self::empty(rules);
        board.setup_standard_layout(rules);
        board
    }

    /// Creates a board without any pieces on it.
    ///
    /// A negative `board_size` gives a board without any squares.
    pub fn empty(rules: &RuleSet) -> Self {
        let size = rules.board_size.max(0);
        Self {
            size,
            mirrored: rules.mirrored_board,
            cells: vec![None; size as usize * size as usize],
        }
    }

    /// Creates a board holding exactly the given pieces.
    ///
    /// Fails if a square is unplayable or listed twice.
    pub fn from_squares(rules: &RuleSet, squares: &[OccupiedSquare]) -> Result<Self, BoardError> {
        let mut board = Self::empty(rules);
        for square in squares {
            board.place_piece(square.row, square.col, square.piece)?;
        }
        Ok(board)
    }

    /// The number of squares along one side.
    pub fn size(&self) -> i8 {
        self.size
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn is_in_bounds(&self, row: i8, col: i8) -> bool {
        (0..self.size).contains(&row) && (0..self.size).contains(&col)
    }

    /// Is this square on the board and of the color that pieces occupy?
    pub fn is_playable_position(&self, row: i8, col: i8) -> bool {
        self.is_in_bounds(row, col) && ((row + col) % 2 == 1) != self.mirrored
    }

    /// All playable squares, in row-major order.
    pub fn playable_positions(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        (0..self.size)
            .flat_map(move |row| (0..self.size).map(move |col| (row, col)))
            .filter(|&(row, col)| self.is_playable_position(row, col))
    }

    fn index(&self, row: i8, col: i8) -> Result<usize, BoardError> {
        if self.is_playable_position(row, col) {
            Ok(row as usize * self.size as usize + col as usize)
        } else {
            Err(BoardError::InvalidPosition { row, col })
        }
    }

    /// The piece on a square, if any. Off-board and unplayable squares are
    /// simply empty here; use [`Self::piece_at()`] to have them rejected.
    pub fn get(&self, row: i8, col: i8) -> Option<Piece> {
        self.index(row, col).ok().and_then(|idx| self.cells[idx])
    }

    pub fn piece_at(&self, row: i8, col: i8) -> Result<Option<Piece>, BoardError> {
        Ok(self.cells[self.index(row, col)?])
    }

    pub fn is_empty(&self, row: i8, col: i8) -> Result<bool, BoardError> {
        Ok(self.piece_at(row, col)?.is_none())
    }

    pub fn color_at(&self, row: i8, col: i8) -> Result<Option<Color>, BoardError> {
        Ok(self.piece_at(row, col)?.map(|piece| piece.color))
    }

    pub fn is_king(&self, row: i8, col: i8) -> Result<bool, BoardError> {
        Ok(self.piece_at(row, col)?.is_some_and(Piece::is_king))
    }

    /// Puts a piece on an empty square.
    pub fn place_piece(&mut self, row: i8, col: i8, piece: Piece) -> Result<(), BoardError> {
        let idx = self.index(row, col)?;
        if self.cells[idx].is_some() {
            return Err(BoardError::OccupiedDestination { row, col });
        }
        self.cells[idx] = Some(piece);
        Ok(())
    }

    /// Takes the piece off a square, returning it if there was one.
    pub fn remove_piece(&mut self, row: i8, col: i8) -> Result<Option<Piece>, BoardError> {
        let idx = self.index(row, col)?;
        Ok(self.cells[idx].take())
    }

    /// Swaps the piece on a square for another one, e.g. when crowning.
    pub(crate) fn replace_piece(
        &mut self,
        row: i8,
        col: i8,
        piece: Piece,
    ) -> Result<(), BoardError> {
        let idx = self.index(row, col)?;
        if self.cells[idx].is_none() {
            return Err(BoardError::EmptySquare { row, col });
        }
        self.cells[idx] = Some(piece);
        Ok(())
    }

    /// Moves a piece without checking any rules.
    ///
    /// The board is left untouched if this fails.
    pub fn relocate_piece(&mut self, from: (i8, i8), to: (i8, i8)) -> Result<Piece, BoardError> {
        let src = self.index(from.0, from.1)?;
        let dst = self.index(to.0, to.1)?;
        let piece = self.cells[src].ok_or(BoardError::EmptySquare {
            row: from.0,
            col: from.1,
        })?;
        if self.cells[dst].is_some() {
            return Err(BoardError::OccupiedDestination {
                row: to.0,
                col: to.1,
            });
        }
        self.cells[src] = None;
        self.cells[dst] = Some(piece);
        Ok(piece)
    }

    /// Removes every piece.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    /// Resets the board to the starting position of the given rules.
    ///
    /// Each side gets `size / 2 - 1` full rows of pawns (3, 4 or 5 rows on
    /// an 8, 10 or 12 board), leaving the two middle rows empty. Dark takes
    /// the top rows, Light the bottom rows.
    pub fn setup_standard_layout(&mut self, rules: &RuleSet) {
        if self.size != rules.board_size || self.mirrored != rules.mirrored_board {
            *self = Self::empty(rules);
        } else {
            self.clear();
        }
        let rows_per_side = self.size / 2 - 1;
        let light_top_row = self.size - rows_per_side;
        for (row, col) in self.playable_positions().collect::<Vec<_>>() {
            let piece = if row < rows_per_side {
                Piece::DARK_PAWN
            } else if row >= light_top_row {
                Piece::LIGHT_PAWN
            } else {
                continue;
            };
            self.cells[row as usize * self.size as usize + col as usize] = Some(piece);
        }
    }

    /// All pieces on the board with their coordinates, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (i8, i8, Piece)> + '_ {
        let size = self.size as usize;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|piece| ((idx / size) as i8, (idx % size) as i8, piece))
        })
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (i8, i8, Piece)> + '_ {
        self.pieces().filter(move |&(_, _, piece)| piece.color == color)
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    pub fn total_pieces(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    pub fn to_squares_vec(&self) -> Vec<OccupiedSquare> {
        self.pieces()
            .map(|(row, col, piece)| OccupiedSquare { row, col, piece })
            .collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::visualize_board(self))
    }
}
