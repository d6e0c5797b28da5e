//! Session orchestration: loads state, applies domain transitions, writes
//! back under optimistic locking.
//!
//! Every write goes through a read-modify-write cycle guarded by the row's
//! lock version. When the guarded write loses the race the operation is
//! retried once from a fresh read; the domain checks run again, so a retry
//! can still fail with a rule violation instead.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::{JoinOutcome, Seat, SessionState};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::repos::counters;
use crate::repos::sessions::{self, Session};

/// Game session domain service.
pub struct SessionService;

impl SessionService {
    pub fn new() -> Self {
        Self
    }

    /// Create a fresh session under a newly allocated room number.
    pub async fn create<C>(&self, conn: &C) -> Result<Session, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let room_no = counters::next_room_no(conn).await?;
        let state = SessionState::new();
        let session = sessions::create_session(conn, room_no, &state).await?;

        info!(session_id = session.id, room_no, "session created");
        Ok(session)
    }

    /// Seat a player by name. Rejoining a held seat is a no-op that skips
    /// the write entirely.
    pub async fn join<C>(
        &self,
        conn: &C,
        session_id: i64,
        username: &str,
    ) -> Result<(Session, JoinOutcome), DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::Other("Username".into()),
                "Username is required",
            ));
        }

        match self.try_join(conn, session_id, username).await {
            Err(DomainError::Conflict(ConflictKind::OptimisticLock, _)) => {
                self.try_join(conn, session_id, username).await
            }
            other => other,
        }
    }

    async fn try_join<C>(
        &self,
        conn: &C,
        session_id: i64,
        username: &str,
    ) -> Result<(Session, JoinOutcome), DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let session = sessions::require_session(conn, session_id).await?;
        let mut state = session.state.clone();
        let outcome = state.join(username)?;

        if outcome.rejoined {
            return Ok((session, outcome));
        }

        let updated =
            sessions::update_session(conn, session.id, session.lock_version, &state).await?;
        info!(
            session_id,
            seat = %outcome.seat,
            "player seated"
        );
        Ok((updated, outcome))
    }

    /// Apply one move for `seat` at `cell`.
    pub async fn apply_move<C>(
        &self,
        conn: &C,
        session_id: i64,
        seat: Seat,
        cell: i64,
    ) -> Result<Session, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        match self.try_move(conn, session_id, seat, cell).await {
            Err(DomainError::Conflict(ConflictKind::OptimisticLock, _)) => {
                self.try_move(conn, session_id, seat, cell).await
            }
            other => other,
        }
    }

    async fn try_move<C>(
        &self,
        conn: &C,
        session_id: i64,
        seat: Seat,
        cell: i64,
    ) -> Result<Session, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        let session = sessions::require_session(conn, session_id).await?;
        let mut state = session.state.clone();
        state.apply_move(seat, cell)?;

        let updated =
            sessions::update_session(conn, session.id, session.lock_version, &state).await?;
        if updated.state.outcome.is_terminal() {
            info!(
                session_id,
                outcome = ?updated.state.outcome,
                "session finished"
            );
        }
        Ok(updated)
    }

    /// Load one session.
    pub async fn get<C>(&self, conn: &C, session_id: i64) -> Result<Session, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        sessions::require_session(conn, session_id).await
    }

    /// All sessions, newest first.
    pub async fn list<C>(&self, conn: &C) -> Result<Vec<Session>, DomainError>
    where
        C: ConnectionTrait + Send + Sync,
    {
        sessions::list_sessions(conn).await
    }
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}
