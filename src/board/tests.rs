use super::*;

#[test]
fn test_player_opponent() {
    assert_eq!(Player::X.opponent(), Player::O);
    assert_eq!(Player::O.opponent(), Player::X);
}

#[test]
fn test_cell_player() {
    assert_eq!(Cell::Empty.player(), None);
    assert_eq!(Cell::X.player(), Some(Player::X));
    assert_eq!(Cell::from(Player::O), Cell::O);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(1, 2);
    assert_eq!(pos.to_index(3), 5);
    assert_eq!(pos.to_index(4), 6);
    assert_eq!(Pos::from_index(5, 3), pos);
    assert_eq!(Pos::from_index(15, 4), Pos::new(3, 3));
}

#[test]
fn test_pos_ordering() {
    let pos1 = Pos::new(0, 0);
    let pos2 = Pos::new(0, 2);
    let pos3 = Pos::new(1, 0);

    assert!(pos1 < pos2);
    assert!(pos2 < pos3);
}

#[test]
fn test_new_board() {
    for size in 1..=5 {
        let board = Board::new(size);
        assert_eq!(board.size(), size);
        assert_eq!(board.cells().len(), size * size);
        assert!(board.cells().iter().all(|c| c.is_empty()));
        assert_eq!(board.current_player(), Player::X);
        assert!(!board.is_over());
        assert_eq!(board.winner(), None);
        assert_eq!(board.status(), GameStatus::InProgress);
    }
}

#[test]
#[should_panic]
fn test_zero_size_board_panics() {
    let _ = Board::new(0);
}

#[test]
fn test_turns_alternate() {
    let mut board = Board::new(3);
    let moves = [Pos::new(0, 0), Pos::new(1, 1), Pos::new(0, 1), Pos::new(0, 2)];
    for (k, pos) in moves.into_iter().enumerate() {
        let expected = if k % 2 == 0 { Player::X } else { Player::O };
        assert_eq!(board.current_player(), expected);
        board.place(pos, expected).unwrap();
    }
    assert_eq!(board.current_player(), Player::X);
    assert_eq!(board.count(Player::X), 2);
    assert_eq!(board.count(Player::O), 2);
}

#[test]
fn test_place_rejections_leave_board_unchanged() {
    let mut board = Board::new(3);
    board.place(Pos::new(1, 1), Player::X).unwrap();
    let snapshot = board.clone();

    assert_eq!(
        board.place(Pos::new(1, 1), Player::O),
        Err(PlaceError::Occupied { row: 1, col: 1 })
    );
    assert_eq!(
        board.place(Pos::new(3, 0), Player::O),
        Err(PlaceError::OutOfBounds { row: 3, col: 0, size: 3 })
    );
    assert_eq!(
        board.place(Pos::new(0, 0), Player::X),
        Err(PlaceError::WrongTurn { expected: Player::O, got: Player::X })
    );
    assert_eq!(board, snapshot);
}

#[test]
fn test_place_after_game_over() {
    let mut board: Board = "XXX/OO./...".parse().unwrap();
    assert!(board.is_over());
    let snapshot = board.clone();

    assert_eq!(board.place(Pos::new(2, 2), Player::O), Err(PlaceError::GameOver));
    assert_eq!(board, snapshot);
}

#[test]
fn test_win_ends_game_without_passing_turn() {
    let mut board = Board::new(3);
    for pos in [Pos::new(0, 0), Pos::new(1, 0), Pos::new(0, 1), Pos::new(1, 1)] {
        let player = board.current_player();
        board.place(pos, player).unwrap();
    }
    let status = board.place(Pos::new(0, 2), Player::X).unwrap();

    assert_eq!(status, GameStatus::Won(Player::X));
    assert!(board.is_over());
    assert_eq!(board.winner(), Some(Player::X));
    assert_eq!(board.current_player(), Player::X);
}

#[test]
fn test_full_board_is_draw() {
    let mut board: Board = "XOX/XOO/OX.".parse().unwrap();
    assert!(!board.is_over());
    assert_eq!(board.current_player(), Player::X);

    let status = board.place(Pos::new(2, 2), Player::X).unwrap();
    assert_eq!(status, GameStatus::Draw);
    assert!(board.is_over());
    assert_eq!(board.winner(), None);
}

#[test]
fn test_single_cell_board() {
    let mut board = Board::new(1);
    let status = board.place(Pos::new(0, 0), Player::X).unwrap();
    assert_eq!(status, GameStatus::Won(Player::X));
}

#[test]
fn test_reset() {
    let mut board: Board = "XXX/OO./...".parse().unwrap();
    board.reset();
    assert_eq!(board, Board::new(3));
}

#[test]
fn test_is_empty() {
    let board: Board = "X../.../...".parse().unwrap();
    assert!(!board.is_empty(Pos::new(0, 0)));
    assert!(board.is_empty(Pos::new(0, 1)));
    assert!(!board.is_empty(Pos::new(0, 3)));
}

#[test]
fn test_empty_cells_row_major() {
    let board: Board = "X.O/.X./O..".parse().unwrap();
    let empty: Vec<Pos> = board.empty_cells().collect();
    assert_eq!(
        empty,
        vec![
            Pos::new(0, 1),
            Pos::new(1, 0),
            Pos::new(1, 2),
            Pos::new(2, 1),
            Pos::new(2, 2),
        ]
    );
}

#[test]
fn test_mark_unmark_restores_board() {
    let mut board: Board = "X../.O./...".parse().unwrap();
    let snapshot = board.clone();
    board.mark(Pos::new(2, 2), Player::X);
    assert_eq!(board.get(Pos::new(2, 2)), Some(Cell::X));
    assert_eq!(board.current_player(), Player::X);
    board.unmark(Pos::new(2, 2));
    assert_eq!(board, snapshot);
}

#[test]
fn test_display_round_trip() {
    let board: Board = "XO../.X../..O./....".parse().unwrap();
    assert_eq!(board.to_string(), "XO..\n.X..\n..O.\n....");
    assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
}

#[test]
fn test_parse_errors() {
    assert_eq!("".parse::<Board>(), Err(ParseBoardError::Empty));
    assert_eq!(
        "XO/.".parse::<Board>(),
        Err(ParseBoardError::Ragged { row: 1, len: 1, size: 2 })
    );
    assert_eq!(
        "X?/..".parse::<Board>(),
        Err(ParseBoardError::InvalidChar { ch: '?' })
    );
    assert_eq!(
        "OO./.../...".parse::<Board>(),
        Err(ParseBoardError::ImpossibleCounts { x: 0, o: 2 })
    );
    assert_eq!(
        "XXX/.../...".parse::<Board>(),
        Err(ParseBoardError::ImpossibleCounts { x: 3, o: 0 })
    );
}

#[test]
fn test_parse_rejects_unreachable_wins() {
    assert_eq!("XXX/OOO/...".parse::<Board>(), Err(ParseBoardError::BothWon));
    assert_eq!(
        "OOO/XX./XX.".parse::<Board>(),
        Err(ParseBoardError::ImpossibleWin { winner: Player::O, x: 4, o: 3 })
    );
    assert_eq!(
        "XXX/OO./O..".parse::<Board>(),
        Err(ParseBoardError::ImpossibleWin { winner: Player::X, x: 3, o: 3 })
    );
    // A finishing move may complete two lines at once
    let board: Board = "XXX/XOO/XOO".parse().unwrap();
    assert_eq!(board.winner(), Some(Player::X));
}

#[test]
fn test_try_new() {
    assert_eq!(Board::try_new(0), None);
    assert_eq!(Board::try_new(3), Some(Board::new(3)));
}

#[test]
fn test_parse_derives_turn() {
    let board: Board = "X../.../...".parse().unwrap();
    assert_eq!(board.current_player(), Player::O);

    let board: Board = "XO./.../...".parse().unwrap();
    assert_eq!(board.current_player(), Player::X);
}

#[test]
fn test_place_error_messages() {
    assert_eq!(
        PlaceError::Occupied { row: 0, col: 2 }.to_string(),
        "cell (0, 2) is already occupied"
    );
    assert_eq!(PlaceError::GameOver.to_string(), "game is already over");
}
