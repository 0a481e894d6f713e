//! Optimality of the search engine against an independent reference.

use std::collections::{HashMap, HashSet};

use noughts_core::{choose_move, search, Board, GameState, GameStatus, Player, Square};

/// Memoized negamax over a compact encoding, written without the engine's
/// evaluation code. Returns the value for the side to move.
struct Reference {
    cache: HashMap<[u8; 9], i8>,
}

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

impl Reference {
    fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    fn encode(board: &Board) -> [u8; 9] {
        let mut cells = [0u8; 9];
        for (i, sq) in board.squares().iter().enumerate() {
            cells[i] = match sq {
                Square::Empty => 0,
                Square::Occupied(Player::X) => 1,
                Square::Occupied(Player::O) => 2,
            };
        }
        cells
    }

    fn won(cells: &[u8; 9], mark: u8) -> bool {
        LINES.iter().any(|l| l.iter().all(|&i| cells[i] == mark))
    }

    /// Value for `to_move` (1 or 2) with perfect play.
    fn value(&mut self, cells: [u8; 9], to_move: u8) -> i8 {
        let other = 3 - to_move;
        if Self::won(&cells, other) {
            return -1;
        }
        if cells.iter().all(|&c| c != 0) {
            return 0;
        }
        let mut key = cells;
        // Fold the side to move into the key so both perspectives coexist.
        key[0] |= to_move << 4;
        if let Some(&v) = self.cache.get(&key) {
            return v;
        }
        let mut best = -1;
        for i in 0..9 {
            if cells[i] == 0 {
                let mut next = cells;
                next[i] = to_move;
                best = best.max(-self.value(next, other));
            }
        }
        self.cache.insert(key, best);
        best
    }
}

fn mark(player: Player) -> u8 {
    match player {
        Player::X => 1,
        Player::O => 2,
    }
}

/// Collects every reachable in-progress state, from both starting players.
fn reachable_states() -> Vec<GameState> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut stack = vec![GameState::new(Player::X), GameState::new(Player::O)];
    while let Some(game) = stack.pop() {
        if game.is_over() || !seen.insert((Reference::encode(game.board()), *game.turn())) {
            continue;
        }
        for index in game.board().empty_cells().collect::<Vec<_>>() {
            let mut next = game.clone();
            next.apply_move(index).unwrap();
            stack.push(next);
        }
        out.push(game);
    }
    out
}

#[test]
fn test_engine_move_preserves_game_value_everywhere() {
    let mut reference = Reference::new();

    for game in reachable_states() {
        let ai = *game.turn();
        let cells = Reference::encode(game.board());
        let best = reference.value(cells, mark(ai));

        let chosen = choose_move(game.board(), ai).unwrap();
        let mut after = cells;
        after[chosen] = mark(ai);
        let achieved = -reference.value(after, mark(ai.opponent()));

        assert_eq!(
            achieved,
            best,
            "engine move {} on {} for {} is suboptimal",
            chosen,
            game.board().compact(),
            ai
        );
    }
}

/// Plays the engine against every possible opponent line.
fn engine_never_loses(game: GameState, engine: Player, finished: &mut usize) {
    match game.status() {
        GameStatus::Won(winner) => {
            assert_eq!(*winner, engine, "engine lost: {}", game.board().compact());
            *finished += 1;
            return;
        }
        GameStatus::Draw => {
            *finished += 1;
            return;
        }
        GameStatus::InProgress => {}
    }

    if *game.turn() == engine {
        let mut next = game.clone();
        let index = choose_move(game.board(), engine).unwrap();
        next.apply_move(index).unwrap();
        engine_never_loses(next, engine, finished);
    } else {
        for index in game.board().empty_cells().collect::<Vec<_>>() {
            let mut next = game.clone();
            next.apply_move(index).unwrap();
            engine_never_loses(next, engine, finished);
        }
    }
}

#[test]
fn test_engine_moving_second_never_loses() {
    let mut finished = 0;
    engine_never_loses(GameState::new(Player::X), Player::O, &mut finished);
    assert!(finished > 0);
}

#[test]
fn test_engine_moving_first_never_loses() {
    let mut finished = 0;
    engine_never_loses(GameState::new(Player::X), Player::X, &mut finished);
    assert!(finished > 0);
}

#[test]
fn test_engine_punishes_blunder() {
    // X opens in a corner, O answers on an edge: X can force a win.
    let game = GameState::replay(Player::X, &[0, 1]).unwrap();
    let scores = search::score_moves(game.board(), Player::X).unwrap();
    assert!(scores.iter().any(|m| m.score == 1));

    let mut game = game;
    while !game.is_over() {
        let index = choose_move(game.board(), *game.turn()).unwrap();
        game.apply_move(index).unwrap();
    }
    assert_eq!(*game.status(), GameStatus::Won(Player::X));
}

#[test]
fn test_empty_board_choice_is_deterministic() {
    let empty = Board::new();
    let first = choose_move(&empty, Player::O).unwrap();
    for _ in 0..3 {
        assert_eq!(choose_move(&empty, Player::O).unwrap(), first);
    }
    assert_eq!(first, 0);
}
