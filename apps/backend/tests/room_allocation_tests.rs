//! Room number allocation and optimistic locking at the repository level.

mod support;

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::http::StatusCode;
use actix_web::test;
use backend::domain::{Seat, SessionState};
use backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use backend::repos::{counters, sessions};
use backend::services::sessions::SessionService;
use futures_util::future::join_all;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, ExecResult, QueryResult, Statement,
};
use serde_json::{json, Value};

use support::{test_service, test_state};

/// Connection wrapper that simulates a concurrent writer: right before the
/// first guarded session update it bumps the row's lock version out of band,
/// so that update matches zero rows and surfaces an optimistic lock conflict.
struct ContendedConn<'a> {
    inner: &'a DatabaseConnection,
    session_id: i64,
    interfered: AtomicBool,
}

impl<'a> ContendedConn<'a> {
    fn new(inner: &'a DatabaseConnection, session_id: i64) -> Self {
        Self {
            inner,
            session_id,
            interfered: AtomicBool::new(false),
        }
    }
}

#[async_trait::async_trait]
impl ConnectionTrait for ContendedConn<'_> {
    fn get_database_backend(&self) -> DbBackend {
        self.inner.get_database_backend()
    }

    async fn execute(&self, stmt: Statement) -> Result<ExecResult, DbErr> {
        if stmt.sql.starts_with("UPDATE")
            && stmt.sql.contains("game_sessions")
            && !self.interfered.swap(true, Ordering::SeqCst)
        {
            self.inner
                .execute(Statement::from_sql_and_values(
                    self.inner.get_database_backend(),
                    "UPDATE game_sessions SET lock_version = lock_version + 1 WHERE id = ?",
                    [self.session_id.into()],
                ))
                .await?;
        }
        self.inner.execute(stmt).await
    }

    async fn execute_unprepared(&self, sql: &str) -> Result<ExecResult, DbErr> {
        self.inner.execute_unprepared(sql).await
    }

    async fn query_one(&self, stmt: Statement) -> Result<Option<QueryResult>, DbErr> {
        self.inner.query_one(stmt).await
    }

    async fn query_all(&self, stmt: Statement) -> Result<Vec<QueryResult>, DbErr> {
        self.inner.query_all(stmt).await
    }
}

#[actix_web::test]
async fn room_numbers_increase_from_one() {
    let app = test_service(test_state().await).await;

    for expected in 1..=4 {
        let resp =
            test::call_service(&app, test::TestRequest::post().uri("/api/games").to_request())
                .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["roomNo"], json!(expected));
    }
}

#[actix_web::test]
async fn concurrent_creations_allocate_distinct_room_numbers() {
    let app = test_service(test_state().await).await;

    let creations = (0..8).map(|_| {
        test::call_service(
            &app,
            test::TestRequest::post().uri("/api/games").to_request(),
        )
    });
    let responses = join_all(creations).await;

    let mut room_nos = Vec::new();
    for resp in responses {
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        room_nos.push(body["roomNo"].as_i64().expect("roomNo is a number"));
    }

    room_nos.sort_unstable();
    room_nos.dedup();
    assert_eq!(room_nos.len(), 8);
}

#[actix_web::test]
async fn counter_allocates_strictly_increasing_values() {
    let state = test_state().await;
    let db = state.db().expect("test state has a db");

    let first = counters::next_room_no(db).await.unwrap();
    let second = counters::next_room_no(db).await.unwrap();
    let third = counters::next_room_no(db).await.unwrap();

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(third, 3);
}

#[actix_web::test]
async fn stale_lock_version_is_an_optimistic_lock_conflict() {
    let state = test_state().await;
    let db = state.db().expect("test state has a db");

    let room_no = counters::next_room_no(db).await.unwrap();
    let created = sessions::create_session(db, room_no, &SessionState::new())
        .await
        .unwrap();
    assert_eq!(created.lock_version, 1);

    let mut new_state = created.state.clone();
    new_state.join("alice").unwrap();

    // First guarded write succeeds and bumps the version
    let updated = sessions::update_session(db, created.id, created.lock_version, &new_state)
        .await
        .unwrap();
    assert_eq!(updated.lock_version, created.lock_version + 1);
    assert_eq!(updated.state.player_a.as_deref(), Some("alice"));

    // Re-using the old version must fail with a conflict naming both versions
    let err = sessions::update_session(db, created.id, created.lock_version, &new_state)
        .await
        .unwrap_err();
    match err {
        DomainError::Conflict(ConflictKind::OptimisticLock, detail) => {
            assert!(detail.contains("expected version 1"));
            assert!(detail.contains("actual version 2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[actix_web::test]
async fn join_recovers_from_a_lost_lock_race() {
    let state = test_state().await;
    let db = state.db().expect("test state has a db");
    let service = SessionService::new();

    let created = service.create(db).await.unwrap();

    let conn = ContendedConn::new(db, created.id);
    let (session, joined) = service.join(&conn, created.id, "alice").await.unwrap();

    assert!(conn.interfered.load(Ordering::SeqCst));
    assert_eq!(joined.seat, Seat::A);
    assert!(!joined.rejoined);
    assert_eq!(session.state.player_a.as_deref(), Some("alice"));
    // One interfering bump plus the retried guarded write
    assert_eq!(session.lock_version, created.lock_version + 2);
}

#[actix_web::test]
async fn move_recovers_from_a_lost_lock_race() {
    let state = test_state().await;
    let db = state.db().expect("test state has a db");
    let service = SessionService::new();

    let created = service.create(db).await.unwrap();
    service.join(db, created.id, "alice").await.unwrap();
    let (seated, _) = service.join(db, created.id, "bob").await.unwrap();

    let conn = ContendedConn::new(db, created.id);
    let session = service
        .apply_move(&conn, created.id, Seat::A, 4)
        .await
        .unwrap();

    assert!(conn.interfered.load(Ordering::SeqCst));
    assert_eq!(session.state.board.cell(4), Some(Seat::A));
    assert_eq!(session.state.current_turn, Some(Seat::B));
    assert_eq!(session.lock_version, seated.lock_version + 2);
}

#[actix_web::test]
async fn updating_a_missing_session_is_not_found() {
    let state = test_state().await;
    let db = state.db().expect("test state has a db");

    let err = sessions::update_session(db, 12345, 1, &SessionState::new())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::Session, _)
    ));
}

#[actix_web::test]
async fn sessions_keep_distinct_room_numbers() {
    let state = test_state().await;
    let db = state.db().expect("test state has a db");

    let mut room_nos = Vec::new();
    for _ in 0..3 {
        let room_no = counters::next_room_no(db).await.unwrap();
        let session = sessions::create_session(db, room_no, &SessionState::new())
            .await
            .unwrap();
        room_nos.push(session.room_no);
    }

    room_nos.sort_unstable();
    room_nos.dedup();
    assert_eq!(room_nos.len(), 3);
}
