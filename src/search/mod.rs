//! Search module for the Tic-Tac-Toe AI
//!
//! Contains the exhaustive minimax search with alpha-beta pruning and the
//! terminal scoring it uses.

pub mod alphabeta;

pub use alphabeta::{evaluate, SearchResult, SearchStats, Searcher, MAXIMIZER, WIN_SCORE};
