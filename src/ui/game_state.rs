//! Game state management for the Tic-Tac-Toe GUI

use crate::board::{Board, Player, Pos};
use crate::engine::{self, AIEngine, MoveResult, COMPUTER};
use crate::score::Scoreboard;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::theme::ANIM_STEP;

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Player 1 (X) against the computer (O)
    VsComputer,
    /// Two humans on one machine
    TwoPlayer,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::VsComputer => "Player1 VS Computer",
            GameMode::TwoPlayer => "Player1 VS Player2",
        }
    }
}

/// A search running on a worker thread against a copy of the board.
///
/// Dropping it raises the stop flag, so a restart or a return to the menu
/// does not leave the worker searching.
pub struct PendingSearch {
    receiver: Receiver<MoveResult>,
    stop: Arc<AtomicBool>,
}

impl PendingSearch {
    /// Search `board` for `player`'s best move on a new thread
    pub fn spawn(board: Board, player: Player) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = channel();

        let worker_stop = Arc::clone(&stop);
        thread::spawn(move || {
            let mut engine = AIEngine::with_stop_flag(worker_stop);
            let result = if player == COMPUTER {
                engine.get_move_with_stats(&board)
            } else {
                engine.suggest(&board, player)
            };
            let _ = tx.send(result);
        });

        Self { receiver: rx, stop }
    }

    pub fn try_recv(&self) -> Result<MoveResult, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Ask the worker to give up
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for PendingSearch {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Computer move state
pub enum AiState {
    Idle,
    /// Human just moved; the computer answers once the delay has passed
    Waiting { ready_at: Instant },
    Thinking {
        search: PendingSearch,
        start_time: Instant,
    },
}

/// One game on a fixed board size, with its running score
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub score: Scoreboard,
    pub last_move: Option<Pos>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub suggested_move: Option<Pos>,
    pub message: Option<String>,

    /// Pop-in scale per cell, 0.0..=1.0
    anim: Vec<f32>,
    hint: Option<PendingSearch>,
    computer_delay: Duration,
    round_recorded: bool,
}

impl GameState {
    /// New game on a `size`×`size` board; `None` when `size` is zero
    pub fn new(mode: GameMode, size: usize, computer_delay: Duration) -> Option<Self> {
        let board = engine::try_new_game(size)?;
        Some(Self {
            anim: vec![0.0; board.cells().len()],
            board,
            mode,
            score: Scoreboard::new(),
            last_move: None,
            last_ai_result: None,
            ai_state: AiState::Idle,
            suggested_move: None,
            message: None,
            hint: None,
            computer_delay,
            round_recorded: false,
        })
    }

    /// Start a new round on the same board; the score is kept.
    /// Any running search is cancelled when its handle is dropped here.
    pub fn restart(&mut self) {
        engine::reset_board(&mut self.board);
        self.anim.fill(0.0);
        self.last_move = None;
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.suggested_move = None;
        self.hint = None;
        self.message = None;
        self.round_recorded = false;
    }

    /// Check if a human may click right now
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::VsComputer => engine::current_turn(&self.board) != COMPUTER,
            GameMode::TwoPlayer => true,
        }
    }

    /// Check if it's the computer's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::VsComputer => engine::current_turn(&self.board) == COMPUTER,
            GameMode::TwoPlayer => false,
        }
    }

    /// Check if the computer is waiting out its delay or searching
    pub fn is_ai_thinking(&self) -> bool {
        !matches!(self.ai_state, AiState::Idle)
    }

    pub fn is_over(&self) -> bool {
        engine::is_over(&self.board)
    }

    /// Attempt to place the current player's mark
    pub fn try_place(&mut self, pos: Pos) -> Result<(), String> {
        if self.is_over() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("Computer is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }

        engine::try_place(&mut self.board, pos.row, pos.col).map_err(|err| err.to_string())?;
        self.after_move(pos);
        Ok(())
    }

    /// Bookkeeping shared by human and computer moves
    fn after_move(&mut self, pos: Pos) {
        if let Some(idx) = self.board.index(pos) {
            self.anim[idx] = 0.0;
        }
        self.last_move = Some(pos);
        self.suggested_move = None;
        self.hint = None;
        self.message = None;

        if self.is_over() && !self.round_recorded {
            self.score.record(engine::winner(&self.board));
            self.round_recorded = true;
        }
    }

    /// Drive the computer: arm the delay, then search on a worker thread.
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_over() {
            return;
        }

        match &self.ai_state {
            AiState::Idle => {
                self.ai_state = AiState::Waiting {
                    ready_at: Instant::now() + self.computer_delay,
                };
            }
            AiState::Waiting { ready_at } if Instant::now() >= *ready_at => {
                self.ai_state = AiState::Thinking {
                    search: PendingSearch::spawn(self.board.clone(), COMPUTER),
                    start_time: Instant::now(),
                };
            }
            AiState::Waiting { .. } | AiState::Thinking { .. } => {}
        }
    }

    /// Apply the computer's move once the worker has answered
    pub fn check_ai_result(&mut self) {
        let result = match &self.ai_state {
            AiState::Thinking { search, .. } => match search.try_recv() {
                Ok(result) => Some(result),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    self.ai_state = AiState::Idle;
                    self.message = Some("Computer error".to_string());
                    return;
                }
            },
            AiState::Idle | AiState::Waiting { .. } => None,
        };

        let Some(move_result) = result else {
            return;
        };
        self.ai_state = AiState::Idle;
        self.last_ai_result = Some(move_result.clone());

        let Some(pos) = move_result.best_move else {
            self.message = Some("Computer could not find a move".to_string());
            return;
        };
        match engine::try_place(&mut self.board, pos.row, pos.col) {
            Ok(_) => {
                debug!(%pos, time_ms = move_result.time_ms, "computer move applied");
                self.after_move(pos);
            }
            Err(err) => {
                warn!(%pos, %err, "computer move rejected");
                self.message = Some(err.to_string());
            }
        }
    }

    /// Time spent since the computer started searching
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle | AiState::Waiting { .. } => None,
        }
    }

    /// Ask for the best move for whoever is to play (two-player mode)
    pub fn request_suggestion(&mut self) {
        if self.mode != GameMode::TwoPlayer || self.is_over() || self.hint.is_some() {
            return;
        }

        let player = engine::current_turn(&self.board);
        self.hint = Some(PendingSearch::spawn(self.board.clone(), player));
    }

    pub fn is_hint_pending(&self) -> bool {
        self.hint.is_some()
    }

    /// Pick up a finished hint search
    pub fn check_hint(&mut self) {
        let Some(search) = &self.hint else {
            return;
        };
        match search.try_recv() {
            Ok(result) => {
                self.suggested_move = result.best_move;
                self.last_ai_result = Some(result);
                self.hint = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.hint = None,
        }
    }

    /// Advance the pop-in animation by one frame. Returns true while any
    /// mark is still growing.
    pub fn tick_animation(&mut self) -> bool {
        let mut changed = false;
        for (scale, cell) in self.anim.iter_mut().zip(self.board.cells()) {
            if !cell.is_empty() && *scale < 1.0 {
                *scale = (*scale + ANIM_STEP).min(1.0);
                changed = true;
            }
        }
        changed
    }

    /// Current pop-in scale per cell, row-major
    pub fn mark_scales(&self) -> &[f32] {
        &self.anim
    }

    pub fn current_player(&self) -> Player {
        engine::current_turn(&self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_for_computer(state: &mut GameState) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while state.is_ai_turn() && !state.is_over() && Instant::now() < deadline {
            state.start_ai_thinking();
            state.check_ai_result();
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_human_turns_vs_computer() {
        let mut state = GameState::new(GameMode::VsComputer, 3, Duration::ZERO).unwrap();
        assert!(state.is_human_turn());
        state.try_place(Pos::new(1, 1)).unwrap();

        assert!(state.is_ai_turn());
        assert_eq!(state.try_place(Pos::new(0, 0)), Err("Not your turn".to_string()));
    }

    #[test]
    fn test_computer_answers() {
        let mut state = GameState::new(GameMode::VsComputer, 3, Duration::ZERO).unwrap();
        state.try_place(Pos::new(0, 0)).unwrap();
        wait_for_computer(&mut state);

        assert_eq!(state.current_player(), Player::X);
        assert_eq!(state.last_move, Some(Pos::new(1, 1)));
        assert!(state.last_ai_result.is_some());
    }

    #[test]
    fn test_computer_waits_for_delay() {
        let mut state = GameState::new(GameMode::VsComputer, 3, Duration::from_secs(60)).unwrap();
        state.try_place(Pos::new(0, 0)).unwrap();
        state.start_ai_thinking();
        state.start_ai_thinking();

        assert!(matches!(state.ai_state, AiState::Waiting { .. }));
        assert!(state.is_ai_thinking());
        assert_eq!(state.board.count(Player::O), 0);
    }

    #[test]
    fn test_two_player_both_click() {
        let mut state = GameState::new(GameMode::TwoPlayer, 3, Duration::ZERO).unwrap();
        state.try_place(Pos::new(0, 0)).unwrap();
        assert!(state.is_human_turn());
        state.try_place(Pos::new(2, 2)).unwrap();
        assert_eq!(state.board.count(Player::O), 1);
        assert!(!state.is_ai_turn());
    }

    #[test]
    fn test_score_recorded_once_and_kept_on_restart() {
        let mut state = GameState::new(GameMode::TwoPlayer, 3, Duration::ZERO).unwrap();
        for pos in [Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1), Pos::new(0, 2)] {
            state.try_place(pos).unwrap();
        }
        assert!(state.is_over());
        assert_eq!(state.score.wins(Player::X), 1);

        assert!(state.try_place(Pos::new(2, 2)).is_err());
        assert_eq!(state.score.wins(Player::X), 1);

        state.restart();
        assert!(!state.is_over());
        assert_eq!(state.last_move, None);
        assert_eq!(state.score.wins(Player::X), 1);
    }

    #[test]
    fn test_occupied_cell_message() {
        let mut state = GameState::new(GameMode::TwoPlayer, 3, Duration::ZERO).unwrap();
        state.try_place(Pos::new(0, 0)).unwrap();
        let err = state.try_place(Pos::new(0, 0)).unwrap_err();
        assert!(err.contains("occupied"));
    }

    #[test]
    fn test_animation_grows_to_full() {
        let mut state = GameState::new(GameMode::TwoPlayer, 3, Duration::ZERO).unwrap();
        assert!(!state.tick_animation());

        state.try_place(Pos::new(0, 0)).unwrap();
        let mut frames = 0;
        while state.tick_animation() {
            frames += 1;
        }
        assert_eq!(state.mark_scales()[0], 1.0);
        assert_eq!(state.mark_scales()[1], 0.0);
        assert!(frames >= 30);
    }

    #[test]
    fn test_zero_size_game_is_refused() {
        assert!(GameState::new(GameMode::TwoPlayer, 0, Duration::ZERO).is_none());
    }

    #[test]
    fn test_cancelled_search_stops_worker() {
        // A full 4x4 search would run for a long time
        let search = PendingSearch::spawn(Board::new(4), COMPUTER);
        search.cancel();

        let result = search.receiver.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_restart_cancels_computer_search() {
        let mut state = GameState::new(GameMode::VsComputer, 4, Duration::ZERO).unwrap();
        state.try_place(Pos::new(0, 0)).unwrap();
        state.start_ai_thinking();
        state.start_ai_thinking();

        let stop = match &state.ai_state {
            AiState::Thinking { search, .. } => Arc::clone(&search.stop),
            AiState::Idle | AiState::Waiting { .. } => panic!("computer should be searching"),
        };
        state.restart();

        assert!(stop.load(Ordering::Relaxed));
        assert!(!state.is_ai_thinking());
        assert_eq!(state.board, Board::new(4));
    }

    #[test]
    fn test_hint_in_two_player_mode() {
        let mut state = GameState::new(GameMode::TwoPlayer, 3, Duration::ZERO).unwrap();
        for pos in [Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)] {
            state.try_place(pos).unwrap();
        }
        state.request_suggestion();
        let deadline = Instant::now() + Duration::from_secs(10);
        while state.is_hint_pending() && Instant::now() < deadline {
            state.check_hint();
            thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(state.suggested_move, Some(Pos::new(0, 2)));
    }
}
