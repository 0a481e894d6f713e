//! Session lifecycle tests: scoring, resets, starter rotation and engine turns.

use noughts::session::{OpponentMode, Session, SessionError, SessionSettings};
use noughts_core::{GameStatus, MoveError, Player};

fn human_session() -> Session {
    Session::new(SessionSettings {
        opponent: OpponentMode::Human,
        ..SessionSettings::default()
    })
}

fn play(session: &mut Session, cells: &[usize]) -> GameStatus {
    let mut status = GameStatus::InProgress;
    for &cell in cells {
        status = session.select_cell(cell).unwrap();
    }
    status
}

#[test]
fn test_win_is_scored_once() {
    let mut session = human_session();
    let status = play(&mut session, &[0, 3, 1, 4, 2]);
    assert_eq!(status, GameStatus::Won(Player::X));
    assert_eq!(*session.scores().x_wins(), 1);

    assert_eq!(
        session.select_cell(8),
        Err(SessionError::Move(MoveError::GameAlreadyTerminal))
    );
    assert_eq!(session.scores().total(), 1);
}

#[test]
fn test_draw_is_scored() {
    let mut session = human_session();
    let status = play(&mut session, &[0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(status, GameStatus::Draw);
    assert_eq!(*session.scores().draws(), 1);
}

#[test]
fn test_reset_round_keeps_scores() {
    let mut session = human_session();
    play(&mut session, &[0, 3, 1, 4, 2]);
    session.reset_round();

    assert_eq!(*session.game().status(), GameStatus::InProgress);
    assert!(session.game().history().is_empty());
    assert_eq!(*session.scores().x_wins(), 1);
}

#[test]
fn test_reset_scores_clears_tally() {
    let mut session = human_session();
    play(&mut session, &[0, 3, 1, 4, 2]);
    session.reset_scores();

    assert_eq!(session.scores().total(), 0);
    assert!(session.game().history().is_empty());
}

#[test]
fn test_human_mode_keeps_starter() {
    let mut session = human_session();
    session.reset_round();
    assert_eq!(*session.game().turn(), Player::X);
    session.reset_round();
    assert_eq!(*session.game().turn(), Player::X);
}

#[test]
fn test_computer_mode_alternates_starter() {
    let mut session = Session::new(SessionSettings::default());
    assert_eq!(*session.game().turn(), Player::X);
    assert!(!session.needs_engine_move());

    session.reset_round();
    assert_eq!(*session.starting_player(), Player::O);
    assert!(session.needs_engine_move());

    session.reset_round();
    assert_eq!(*session.game().turn(), Player::X);
}

#[test]
fn test_mode_switch_resets_round_not_scores() {
    let mut session = human_session();
    play(&mut session, &[0, 3, 1, 4, 2]);
    session.set_opponent_mode(OpponentMode::Computer);

    assert_eq!(*session.mode(), OpponentMode::Computer);
    assert!(session.game().history().is_empty());
    assert_eq!(*session.scores().x_wins(), 1);
}

#[test]
fn test_input_locked_while_engine_thinks() {
    let mut session = Session::new(SessionSettings::default());
    session.select_cell(4).unwrap();

    let ticket = session.begin_engine_turn().unwrap();
    assert!(*session.engine_busy());
    assert!(!session.needs_engine_move());
    assert_eq!(session.select_cell(0), Err(SessionError::EngineBusy));
    assert_eq!(session.begin_engine_turn(), Err(SessionError::EngineBusy));

    let engine_move = session.finish_engine_turn(ticket).unwrap().unwrap();
    assert_eq!(engine_move.player, Player::O);
    assert_eq!(engine_move.status, GameStatus::InProgress);
    assert!(!*session.engine_busy());
    assert_eq!(*session.game().turn(), Player::X);
}

#[test]
fn test_stale_ticket_is_ignored() {
    let mut session = Session::new(SessionSettings::default());
    session.select_cell(0).unwrap();
    let ticket = session.begin_engine_turn().unwrap();

    session.reset_round();
    assert!(!*session.engine_busy());
    assert_eq!(session.finish_engine_turn(ticket), Ok(None));
    assert!(session.game().history().is_empty());
}

#[test]
fn test_engine_refuses_human_turn() {
    let mut session = Session::new(SessionSettings::default());
    assert_eq!(session.play_engine_turn(), Err(SessionError::NotEngineTurn));

    let mut humans = human_session();
    assert_eq!(humans.begin_engine_turn(), Err(SessionError::NotEngineTurn));
}

#[test]
fn test_engine_replies_to_opening() {
    let mut session = Session::new(SessionSettings::default());
    session.select_cell(0).unwrap();
    let reply = session.play_engine_turn().unwrap().unwrap();
    // Center is the only non-losing reply to a corner.
    assert_eq!(reply.index, 4);
}

fn play_out(starter: Player, pick: fn(&Session) -> usize) -> GameStatus {
    let mut session = Session::new(SessionSettings {
        first_player: starter,
        ..SessionSettings::default()
    });
    while !session.game().is_over() {
        if session.needs_engine_move() {
            session.play_engine_turn().unwrap();
        } else {
            session.select_cell(pick(&session)).unwrap();
        }
    }
    *session.game().status()
}

fn lowest_empty(session: &Session) -> usize {
    session.game().board().empty_cells().next().unwrap()
}

fn highest_empty(session: &Session) -> usize {
    session.game().board().empty_cells().last().unwrap()
}

#[test]
fn test_computer_never_loses_a_session_round() {
    for starter in [Player::X, Player::O] {
        for pick in [lowest_empty as fn(&Session) -> usize, highest_empty] {
            let status = play_out(starter, pick);
            assert_ne!(status, GameStatus::Won(Player::X), "starter {starter}");
        }
    }
}
