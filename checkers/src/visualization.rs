use crate::Board;

/// Draws the board as a box of text, one line per row.
///
/// Unplayable squares are shaded, pieces are drawn as `l`/`L` (light pawn
/// and king) and `d`/`D` (dark pawn and king).
pub fn visualize_board(board: &Board) -> String {
    let size = board.size();
    // Draw the column indices and the top of the box
    let mut result = String::from("    ");
    for col in 0..size {
        result += &format!("{:>2}", col);
    }
    result += "\n    ╭";
    for _ in 0..size {
        result += "──";
    }
    result += "╮\n";

    for row in 0..size {
        result += &format!("{:>3} │", row);
        for col in 0..size {
            if !board.is_playable_position(row, col) {
                result += "░░";
            } else if let Some(piece) = board.get(row, col) {
                result += &format!("{} ", piece);
            } else {
                result += "  ";
            }
        }
        result += "│\n";
    }

    // Draw the bottom of the box
    result += "    ╰";
    for _ in 0..size {
        result += "──";
    }
    result += "╯";
    result
}
