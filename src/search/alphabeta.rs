//! Minimax search with alpha-beta pruning
//!
//! The computer plays O and maximizes; X is assumed to answer optimally and
//! minimizes. The tree is searched to the end: no depth limit, no
//! transposition table, no move ordering beyond a row-major scan. Boards up
//! to 4×4 are small enough for that.
//!
//! The search works on one board passed down by `&mut`. Each frame writes a
//! speculative mark, recurses, and clears the mark again before returning,
//! so the caller gets its board back exactly as it was.
//!
//! # Example
//!
//! ```
//! use tictactoe::board::{Board, Pos};
//! use tictactoe::search::Searcher;
//!
//! // O to move, X threatens the top row
//! let mut board: Board = "XX./.O./...".parse().unwrap();
//! let mut searcher = Searcher::new();
//!
//! let result = searcher.best_move(&mut board);
//! assert_eq!(result.best_move, Some(Pos::new(0, 2)));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::board::{Board, Player, Pos};

/// Score of a win found at the root; each ply of delay costs one point
pub const WIN_SCORE: i32 = 100;

/// Bound for the alpha-beta window, outside any reachable score
const INF: i32 = WIN_SCORE * 10;

/// Player the search maximizes for
pub const MAXIMIZER: Player = Player::O;

/// Score a terminal position, `depth` plies below the search root.
///
/// `WIN_SCORE - depth` when O holds a line, `-WIN_SCORE + depth` when X does,
/// `0` otherwise. Faster wins and slower losses score better for O.
#[inline]
pub fn evaluate(board: &Board, depth: i32) -> i32 {
    if board.has_line(Player::O) {
        WIN_SCORE - depth
    } else if board.has_line(Player::X) {
        -WIN_SCORE + depth
    } else {
        0
    }
}

/// Check if the position ends the game: either line, or no empty cell
#[inline]
fn is_terminal(board: &Board) -> bool {
    board.has_line(Player::O) || board.has_line(Player::X) || board.is_full()
}

/// Search statistics for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Terminal positions scored
    pub terminal_nodes: u64,
    /// Sibling loops cut short by `beta <= alpha`
    pub cutoffs: u64,
}

/// Search result containing the best move found and associated statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found; `None` when the position is already decided
    pub best_move: Option<Pos>,
    /// Minimax value of the best move, from O's point of view
    pub score: i32,
    /// Total nodes visited
    pub nodes: u64,
    /// Search diagnostics
    pub stats: SearchStats,
}

impl SearchResult {
    fn no_move() -> Self {
        Self {
            best_move: None,
            score: 0,
            nodes: 0,
            stats: SearchStats::default(),
        }
    }
}

/// Exhaustive game-tree searcher.
///
/// Holds only per-search counters, so one instance can be reused across
/// boards of any size. An optional stop flag lets another thread abandon a
/// long search.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
    stats: SearchStats,
    stop: Option<Arc<AtomicBool>>,
}

impl Searcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Searcher that gives up once `stop` is set. An abandoned search
    /// returns no move.
    #[must_use]
    pub fn with_stop_flag(stop: Arc<AtomicBool>) -> Self {
        Self {
            stop: Some(stop),
            ..Self::default()
        }
    }

    #[inline]
    fn should_stop(&self) -> bool {
        self.stop.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Best move for the computer (O).
    ///
    /// Each empty cell is tried in row-major order: O is placed there and
    /// X's best reply is searched with a fresh `(-INF, INF)` window starting
    /// at depth 1. The first cell with the highest value wins.
    ///
    /// The board must be ongoing with at least one empty cell; otherwise no
    /// move is returned. It is unchanged when this returns.
    #[instrument(skip(self, board), fields(size = board.size()))]
    pub fn best_move(&mut self, board: &mut Board) -> SearchResult {
        self.best_move_for(board, MAXIMIZER)
    }

    /// Best move for either player.
    ///
    /// For X the candidate with the lowest value of O's best reply is chosen,
    /// again keeping the first one in row-major order on ties.
    #[instrument(skip(self, board), fields(size = board.size()))]
    pub fn best_move_for(&mut self, board: &mut Board, player: Player) -> SearchResult {
        if board.is_over() || is_terminal(board) {
            debug!("position already decided, nothing to search");
            return SearchResult::no_move();
        }

        self.nodes = 0;
        self.stats = SearchStats::default();

        let maximizing = player == MAXIMIZER;
        let candidates: Vec<Pos> = board.empty_cells().collect();
        let mut best: Option<(Pos, i32)> = None;

        for pos in candidates {
            board.mark(pos, player);
            let value = self.minimax(board, !maximizing, 1, -INF, INF);
            board.unmark(pos);

            if self.should_stop() {
                debug!(nodes = self.nodes, "search cancelled");
                return SearchResult::no_move();
            }

            let improves = match best {
                None => true,
                Some((_, best_value)) if maximizing => value > best_value,
                Some((_, best_value)) => value < best_value,
            };
            if improves {
                best = Some((pos, value));
            }
        }

        let (best_move, score) = match best {
            Some((pos, value)) => (Some(pos), value),
            None => (None, 0),
        };
        debug!(
            ?best_move,
            score,
            nodes = self.nodes,
            cutoffs = self.stats.cutoffs,
            "search finished"
        );

        SearchResult {
            best_move,
            score,
            nodes: self.nodes,
            stats: self.stats.clone(),
        }
    }

    /// Minimax value of `board` with `maximizing` telling whose turn it is
    /// (O when true, X when false).
    pub fn minimax(
        &mut self,
        board: &mut Board,
        maximizing: bool,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;

        // Value is discarded by the root once stopped
        if self.should_stop() {
            return 0;
        }

        if is_terminal(board) {
            self.stats.terminal_nodes += 1;
            return evaluate(board, depth);
        }

        let player = if maximizing { Player::O } else { Player::X };
        let size = board.size();
        let mut best = if maximizing { -INF } else { INF };

        for idx in 0..size * size {
            let pos = Pos::from_index(idx, size);
            if !board.is_empty(pos) {
                continue;
            }

            board.mark(pos, player);
            let value = self.minimax(board, !maximizing, depth + 1, alpha, beta);
            board.unmark(pos);

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        best
    }

    /// Nodes visited by the last search
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Statistics of the last search
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
