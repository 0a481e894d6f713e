//! Exhaustive minimax move selection.
//!
//! The engine searches the whole remaining game tree without pruning or
//! caching. The computer is always the maximizer of its own search; the
//! other mark minimizes. Every hypothetical placement is undone before the
//! next sibling is tried, so the caller's board is never changed.

use crate::rules::{check_winner, detect_outcome};
use crate::{Board, GameState, GameStatus, MoveError, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Score of a position for the maximizer: +1 win, 0 draw or undecided, -1 loss.
pub type Score = i8;

/// Error returned when the engine is asked to move in a finished position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SearchError {
    /// The board is already won or full. Callers must not search here.
    #[display("Search invoked on a finished board ({})", _0)]
    TerminalBoard(GameStatus),

    /// The game rejected the move the engine chose.
    #[display("Engine move rejected: {}", _0)]
    Rejected(MoveError),
}

impl std::error::Error for SearchError {}

impl From<MoveError> for SearchError {
    fn from(err: MoveError) -> Self {
        Self::Rejected(err)
    }
}

/// Root score of one candidate cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveScore {
    /// Board index of the candidate.
    pub index: usize,
    /// Minimax value after playing it.
    pub score: Score,
}

/// Static evaluation: +1 if `maximizer` owns a line, -1 if the opponent does.
pub fn evaluate(board: &Board, maximizer: Player) -> Score {
    match check_winner(board) {
        Some(player) if player == maximizer => 1,
        Some(_) => -1,
        None => 0,
    }
}

/// Minimax value of `board` with `maximizing` choosing the side to move.
///
/// Won and full boards are leaves. The board is restored before return.
pub fn minimax(board: &mut Board, maximizer: Player, maximizing: bool) -> Score {
    let score = evaluate(board, maximizer);
    if score != 0 || board.is_full() {
        return score;
    }

    let mover = if maximizing {
        maximizer
    } else {
        maximizer.opponent()
    };

    let mut best = if maximizing { Score::MIN } else { Score::MAX };
    for index in 0..board.squares().len() {
        if !board.is_empty(index) {
            continue;
        }

        board.place(index, mover);
        let child = minimax(board, maximizer, !maximizing);
        board.clear(index);

        best = if maximizing {
            best.max(child)
        } else {
            best.min(child)
        };
    }
    best
}

/// Scores every empty cell for `ai`, in ascending index order.
#[instrument(skip(board), fields(board = %board.compact()))]
pub fn score_moves(board: &Board, ai: Player) -> Result<Vec<MoveScore>, SearchError> {
    let status = detect_outcome(board);
    if status.is_terminal() {
        return Err(SearchError::TerminalBoard(status));
    }

    let mut scratch = *board;
    let candidates: Vec<usize> = board.empty_cells().collect();
    let scores = candidates
        .into_iter()
        .map(|index| {
            scratch.place(index, ai);
            let score = minimax(&mut scratch, ai, false);
            scratch.clear(index);
            MoveScore { index, score }
        })
        .collect();

    Ok(scores)
}

/// Picks the optimal cell for `ai`.
///
/// Ties go to the lowest index: a later cell only replaces the current
/// choice with a strictly greater score.
#[instrument(skip(board), fields(board = %board.compact()))]
pub fn choose_move(board: &Board, ai: Player) -> Result<usize, SearchError> {
    let scores = score_moves(board, ai)?;

    let mut best: Option<MoveScore> = None;
    for candidate in scores {
        if best.is_none_or(|b| candidate.score > b.score) {
            best = Some(candidate);
        }
    }

    // A non-terminal board always has an empty cell.
    let best = best.ok_or(SearchError::TerminalBoard(GameStatus::Draw))?;
    debug!(index = best.index, score = best.score, "Engine chose move");
    Ok(best.index)
}

/// Lets the engine play both sides until the round ends.
#[instrument]
pub fn self_play(starting_player: Player) -> Result<GameState, SearchError> {
    let mut game = GameState::new(starting_player);
    while !game.is_over() {
        let index = choose_move(game.board(), *game.turn())?;
        game.apply_move(index)?;
    }
    info!(status = %game.status(), moves = game.history().len(), "Self-play finished");
    Ok(game)
}
