use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two sides of a game.
///
/// Dark starts on the top rows of the board (low row numbers) and moves
/// down, Light starts on the bottom rows and moves up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Light,
    Dark,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Pawn,
    King,
}

/// A single checker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub rank: Rank,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// The row direction in which pawns of this color advance.
    pub fn forward(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    /// The row on which pawns of this color are crowned.
    pub fn promotion_row(self, board_size: i8) -> i8 {
        match self {
            Color::Light => 0,
            Color::Dark => board_size - 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Light => write!(f, "light"),
            Color::Dark => write!(f, "dark"),
        }
    }
}

impl Piece {
    pub const LIGHT_PAWN: Piece = Piece::pawn(Color::Light);
    pub const LIGHT_KING: Piece = Piece::king(Color::Light);
    pub const DARK_PAWN: Piece = Piece::pawn(Color::Dark);
    pub const DARK_KING: Piece = Piece::king(Color::Dark);

    pub const fn pawn(color: Color) -> Self {
        Piece {
            color,
            rank: Rank::Pawn,
        }
    }

    pub const fn king(color: Color) -> Self {
        Piece {
            color,
            rank: Rank::King,
        }
    }

    pub fn is_king(self) -> bool {
        self.rank == Rank::King
    }

    pub fn crowned(self) -> Self {
        Piece::king(self.color)
    }

    /// `l`/`L` for a light pawn/king, `d`/`D` for a dark pawn/king.
    pub fn ascii_char(self) -> char {
        match (self.color, self.rank) {
            (Color::Light, Rank::Pawn) => 'l',
            (Color::Light, Rank::King) => 'L',
            (Color::Dark, Rank::Pawn) => 'd',
            (Color::Dark, Rank::King) => 'D',
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ascii_char())
    }
}

/// The error type for the [`FromStr`] instance of [`Piece`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceFromStrErr {
    Empty,
    MoreThanOneChar,
    InvalidChar(char),
}

impl std::error::Error for PieceFromStrErr {}

impl std::fmt::Display for PieceFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PieceFromStrErr::Empty => write!(f, "No piece character given"),
            PieceFromStrErr::MoreThanOneChar => write!(f, "A piece is a single character"),
            PieceFromStrErr::InvalidChar(c) => {
                write!(f, "'{}' is not one of the piece characters l, L, d, D", c)
            }
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = PieceFromStrErr;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'l' => Ok(Piece::LIGHT_PAWN),
            'L' => Ok(Piece::LIGHT_KING),
            'd' => Ok(Piece::DARK_PAWN),
            'D' => Ok(Piece::DARK_KING),
            other => Err(PieceFromStrErr::InvalidChar(other)),
        }
    }
}

impl FromStr for Piece {
    type Err = PieceFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let c = chars.next().ok_or(PieceFromStrErr::Empty)?;
        if chars.next().is_some() {
            return Err(PieceFromStrErr::MoreThanOneChar);
        }
        Piece::try_from(c)
    }
}
