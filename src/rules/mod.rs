//! Game rules for N×N Tic-Tac-Toe
//!
//! - Win: a full row, column or main diagonal of one mark
//! - Draw: every cell occupied with no winner

pub mod win;

// Re-exports for convenient access
pub use win::{check_status, has_line, is_full, lines, winning_line};
