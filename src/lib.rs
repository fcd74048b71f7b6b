//! N×N Tic-Tac-Toe engine with a perfect-play computer opponent
//!
//! Two players alternate placing X and O on a square board; X always moves
//! first. A player wins by filling a full row, column, or diagonal. The
//! computer plays O and searches the whole game tree with minimax and
//! alpha-beta pruning, so on a 3×3 board it never loses.
//!
//! # Architecture
//!
//! - [`board`]: Board state, move validation and turn handling
//! - [`rules`]: Line detection and terminal-state checks
//! - [`search`]: Minimax search with alpha-beta pruning
//! - [`engine`]: The interface a front end drives
//! - [`score`]: Win tally kept across rounds
//! - [`config`]: TOML configuration for the desktop app
//! - [`ui`]: egui/eframe front end
//!
//! # Quick Start
//!
//! ```
//! use tictactoe::{engine, Player};
//!
//! let mut board = engine::new_game(3);
//! assert!(engine::attempt_place(&mut board, 0, 0));
//!
//! // Computer answers as O
//! let reply = engine::computer_move(&mut board);
//! assert!(reply.is_some());
//! assert_eq!(engine::current_turn(&board), Player::X);
//! ```
//!
//! # Performance
//!
//! The search is exhaustive with no depth limit. A 3×3 board is solved in
//! milliseconds; a 4×4 board is feasible once a few marks are down, but
//! larger boards are not practical.

pub mod board;
pub mod config;
pub mod engine;
pub mod rules;
pub mod score;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Cell, GameStatus, ParseBoardError, PlaceError, Player, Pos, STANDARD_SIZES};
pub use config::{AppConfig, ConfigError};
pub use engine::{AIEngine, MoveResult, COMPUTER};
pub use score::Scoreboard;
pub use search::{SearchResult, Searcher};
