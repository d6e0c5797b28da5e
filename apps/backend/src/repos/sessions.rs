//! Session repository: domain-typed access to the game_sessions table.
//!
//! Adapters speak in entity models and DbErr; this layer converts both
//! directions and surfaces DomainError.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::sessions_sea::{self, SessionCreate, SessionUpdate};
use crate::domain::{Board, Outcome, Seat, SessionState};
use crate::entities::game_sessions::{Model, OutcomeState, TurnMark};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;

/// A stored session together with its persistence metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: i64,
    pub room_no: i64,
    pub state: SessionState,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub lock_version: i32,
}

impl From<Seat> for TurnMark {
    fn from(seat: Seat) -> Self {
        match seat {
            Seat::A => TurnMark::X,
            Seat::B => TurnMark::O,
        }
    }
}

impl From<TurnMark> for Seat {
    fn from(mark: TurnMark) -> Self {
        match mark {
            TurnMark::X => Seat::A,
            TurnMark::O => Seat::B,
        }
    }
}

fn outcome_to_stored(outcome: Outcome) -> OutcomeState {
    match outcome {
        Outcome::Undecided => OutcomeState::InProgress,
        Outcome::Win(Seat::A) => OutcomeState::XWon,
        Outcome::Win(Seat::B) => OutcomeState::OWon,
        Outcome::Draw => OutcomeState::Draw,
    }
}

fn outcome_from_stored(stored: OutcomeState) -> Outcome {
    match stored {
        OutcomeState::InProgress => Outcome::Undecided,
        OutcomeState::XWon => Outcome::Win(Seat::A),
        OutcomeState::OWon => Outcome::Win(Seat::B),
        OutcomeState::Draw => Outcome::Draw,
    }
}

impl TryFrom<Model> for Session {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let board = Board::from_stored(&model.board).ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("session {} has a malformed board", model.id),
            )
        })?;

        Ok(Session {
            id: model.id,
            room_no: model.room_no,
            state: SessionState {
                board,
                current_turn: model.current_turn.map(Seat::from),
                outcome: outcome_from_stored(model.outcome),
                player_a: model.player_x,
                player_b: model.player_o,
            },
            created_at: model.created_at,
            updated_at: model.updated_at,
            lock_version: model.lock_version,
        })
    }
}

pub async fn find_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Option<Session>, DomainError> {
    sessions_sea::find_by_id(conn, session_id)
        .await
        .map_err(map_db_err)?
        .map(Session::try_from)
        .transpose()
}

pub async fn require_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
) -> Result<Session, DomainError> {
    sessions_sea::require_session(conn, session_id)
        .await
        .map_err(map_db_err)?
        .try_into()
}

/// All sessions, newest first.
pub async fn list_sessions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Session>, DomainError> {
    sessions_sea::list_all(conn)
        .await
        .map_err(map_db_err)?
        .into_iter()
        .map(Session::try_from)
        .collect()
}

pub async fn create_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    room_no: i64,
    state: &SessionState,
) -> Result<Session, DomainError> {
    let dto = SessionCreate {
        room_no,
        board: state.board.to_stored(),
        current_turn: state.current_turn.map(TurnMark::from),
        outcome: outcome_to_stored(state.outcome),
    };

    sessions_sea::create_session(conn, dto)
        .await
        .map_err(map_db_err)?
        .try_into()
}

/// Persist the full state of an existing session. Fails with an optimistic
/// lock conflict when `lock_version` is stale.
pub async fn update_session<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    session_id: i64,
    lock_version: i32,
    state: &SessionState,
) -> Result<Session, DomainError> {
    let dto = SessionUpdate {
        id: session_id,
        current_lock_version: lock_version,
        board: state.board.to_stored(),
        current_turn: state.current_turn.map(TurnMark::from),
        outcome: outcome_to_stored(state.outcome),
        player_x: state.player_a.clone(),
        player_o: state.player_b.clone(),
    };

    sessions_sea::update_session(conn, dto)
        .await
        .map_err(map_db_err)?
        .try_into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(board: &str) -> Model {
        let now = OffsetDateTime::now_utc();
        Model {
            id: 1,
            room_no: 10,
            board: board.to_string(),
            current_turn: Some(TurnMark::O),
            outcome: OutcomeState::InProgress,
            player_x: Some("alice".to_string()),
            player_o: None,
            created_at: now,
            updated_at: now,
            lock_version: 3,
        }
    }

    #[test]
    fn model_converts_to_session() {
        let session = Session::try_from(model("X---O---X")).unwrap();
        assert_eq!(session.state.board.to_stored(), "X---O---X");
        assert_eq!(session.state.current_turn, Some(Seat::B));
        assert_eq!(session.state.outcome, Outcome::Undecided);
        assert_eq!(session.state.player_a.as_deref(), Some("alice"));
        assert_eq!(session.lock_version, 3);
    }

    #[test]
    fn malformed_board_is_reported_as_corruption() {
        let err = Session::try_from(model("not-a-board")).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Infra(InfraErrorKind::DataCorruption, _)
        ));
    }

    #[test]
    fn outcome_mapping_round_trips() {
        for outcome in [
            Outcome::Undecided,
            Outcome::Win(Seat::A),
            Outcome::Win(Seat::B),
            Outcome::Draw,
        ] {
            assert_eq!(outcome_from_stored(outcome_to_stored(outcome)), outcome);
        }
    }
}
