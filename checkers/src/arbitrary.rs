use quickcheck::{Arbitrary, Gen};

use crate::{Board, Color, GameState, OccupiedSquare, Piece, Rank, RuleSet, Variant, ALL_VARIANTS};

impl Arbitrary for Variant {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&ALL_VARIANTS).unwrap()
    }
}

impl Arbitrary for Color {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&[Color::Light, Color::Dark]).unwrap()
    }
}

impl Arbitrary for Rank {
    fn arbitrary(g: &mut Gen) -> Self {
        // Mostly pawns, like in a real game
        *g.choose(&[Rank::Pawn, Rank::Pawn, Rank::Pawn, Rank::King]).unwrap()
    }
}

impl Arbitrary for Piece {
    fn arbitrary(g: &mut Gen) -> Self {
        Self {
            color: Color::arbitrary(g),
            rank: Rank::arbitrary(g),
        }
    }
}

/// A random position of a random variant, with about a quarter of the
/// playable squares occupied.
impl Arbitrary for GameState {
    fn arbitrary(g: &mut Gen) -> Self {
        let rules = Variant::arbitrary(g).rules();
        let board = Board::empty(&rules);
        let mut squares = Vec::new();
        for (row, col) in board.playable_positions() {
            if u8::arbitrary(g) % 4 != 0 {
                continue;
            }
            let mut piece = Piece::arbitrary(g);
            // A pawn never stays on its promotion row
            if row == piece.color.promotion_row(rules.board_size) {
                piece = piece.crowned();
            }
            squares.push(OccupiedSquare { row, col, piece });
        }
        GameState::from_position(rules, &squares, bool::arbitrary(g)).unwrap()
    }
}

/// Builds a position from a picture of the board, one string per row
/// starting at row 0. `.` is an empty square, pieces are `l`, `L`, `d` and
/// `D`. Rows left out are empty.
pub(crate) fn position(rules: &RuleSet, rows: &[&str], light_turn: bool) -> GameState {
    let mut squares = Vec::new();
    for (row, line) in rows.iter().enumerate() {
        for (col, c) in line.chars().enumerate() {
            if c == '.' {
                continue;
            }
            squares.push(OccupiedSquare {
                row: row as i8,
                col: col as i8,
                piece: Piece::try_from(c).unwrap(),
            });
        }
    }
    GameState::from_position(*rules, &squares, light_turn).unwrap()
}
