//! Win and draw detection for N×N Tic-Tac-Toe
//!
//! A player wins by filling an entire row, an entire column, or either of
//! the two main diagonals. A board with no empty cell and no winner is a draw.
//! Nothing is tracked incrementally: every query scans the board, since the
//! same checks run on real boards and on speculative boards inside search.

use crate::board::{Board, Cell, GameStatus, Player, Pos};

/// Check if `player` occupies every cell of some row, column or main diagonal
#[inline]
pub fn has_line(board: &Board, player: Player) -> bool {
    let n = board.size();
    let cells = board.cells();
    let mark = Cell::from(player);
    let owns = |row: usize, col: usize| cells[row * n + col] == mark;

    (0..n).any(|i| (0..n).all(|j| owns(i, j)) || (0..n).all(|j| owns(j, i)))
        || (0..n).all(|i| owns(i, i))
        || (0..n).all(|i| owns(i, n - 1 - i))
}

/// Check if no empty cell remains
#[inline]
pub fn is_full(board: &Board) -> bool {
    !board.cells().iter().any(|c| c.is_empty())
}

/// Every winnable line: rows, then columns, then the main diagonal and
/// the anti-diagonal.
pub fn lines(size: usize) -> impl Iterator<Item = Vec<Pos>> {
    let rows = (0..size).map(move |r| (0..size).map(|c| Pos::new(r, c)).collect::<Vec<_>>());
    let cols = (0..size).map(move |c| (0..size).map(|r| Pos::new(r, c)).collect::<Vec<_>>());
    let diag = std::iter::once((0..size).map(|i| Pos::new(i, i)).collect::<Vec<_>>());
    let anti = std::iter::once((0..size).map(|i| Pos::new(i, size - 1 - i)).collect::<Vec<_>>());
    rows.chain(cols).chain(diag).chain(anti)
}

/// Find the first completed line for `player`, if any
pub fn winning_line(board: &Board, player: Player) -> Option<Vec<Pos>> {
    let mark = Cell::from(player);
    lines(board.size()).find(|line| line.iter().all(|&pos| board.get(pos) == Some(mark)))
}

/// Classify the position. X's line is checked before O's, then fullness.
pub fn check_status(board: &Board) -> GameStatus {
    if has_line(board, Player::X) {
        GameStatus::Won(Player::X)
    } else if has_line(board, Player::O) {
        GameStatus::Won(Player::O)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, player: Player, positions: &[(usize, usize)]) -> Board {
        let mut board = Board::new(size);
        for &(row, col) in positions {
            board.mark(Pos::new(row, col), player);
        }
        board
    }

    #[test]
    fn test_empty_board_has_no_line() {
        for size in 1..=5 {
            let board = Board::new(size);
            assert!(!has_line(&board, Player::X));
            assert!(!has_line(&board, Player::O));
        }
    }

    #[test]
    fn test_row_line() {
        let board = board_with(3, Player::X, &[(1, 0), (1, 1), (1, 2)]);
        assert!(has_line(&board, Player::X));
        assert!(!has_line(&board, Player::O));
    }

    #[test]
    fn test_column_line() {
        let board = board_with(4, Player::O, &[(0, 3), (1, 3), (2, 3), (3, 3)]);
        assert!(has_line(&board, Player::O));
    }

    #[test]
    fn test_main_diagonal() {
        let board = board_with(4, Player::X, &[(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert!(has_line(&board, Player::X));
    }

    #[test]
    fn test_anti_diagonal() {
        let board = board_with(3, Player::O, &[(0, 2), (1, 1), (2, 0)]);
        assert!(has_line(&board, Player::O));
    }

    #[test]
    fn test_three_of_four_not_line() {
        let board = board_with(4, Player::X, &[(2, 0), (2, 1), (2, 2)]);
        assert!(!has_line(&board, Player::X));
    }

    #[test]
    fn test_broken_diagonal_not_line() {
        let mut board = board_with(3, Player::X, &[(0, 0), (2, 2)]);
        board.mark(Pos::new(1, 1), Player::O);
        assert!(!has_line(&board, Player::X));
        assert!(!has_line(&board, Player::O));
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::new(2);
        assert!(!is_full(&board));
        board.mark(Pos::new(0, 0), Player::X);
        board.mark(Pos::new(0, 1), Player::O);
        board.mark(Pos::new(1, 0), Player::O);
        assert!(!is_full(&board));
        board.mark(Pos::new(1, 1), Player::X);
        assert!(is_full(&board));
    }

    #[test]
    fn test_lines_count() {
        assert_eq!(lines(3).count(), 8);
        assert_eq!(lines(4).count(), 10);
        assert!(lines(4).all(|line| line.len() == 4));
    }

    #[test]
    fn test_winning_line_positions() {
        let board = board_with(3, Player::O, &[(0, 2), (1, 1), (2, 0)]);
        assert_eq!(
            winning_line(&board, Player::O),
            Some(vec![Pos::new(0, 2), Pos::new(1, 1), Pos::new(2, 0)])
        );
        assert_eq!(winning_line(&board, Player::X), None);
    }

    #[test]
    fn test_check_status_prefers_x() {
        let mut board = board_with(3, Player::X, &[(0, 0), (0, 1), (0, 2)]);
        for col in 0..3 {
            board.mark(Pos::new(2, col), Player::O);
        }
        assert_eq!(check_status(&board), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_check_status_draw_and_ongoing() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(check_status(&board), GameStatus::Draw);

        let board: Board = "XO./.../...".parse().unwrap();
        assert_eq!(check_status(&board), GameStatus::InProgress);
    }
}
