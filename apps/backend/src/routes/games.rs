//! Game session HTTP routes.

use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::db::txn::with_txn;
use crate::domain::{Board, Seat};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::game_id::GameId;
use crate::repos::sessions::Session;
use crate::services::sessions::SessionService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct JoinRequest {
    username: String,
}

#[derive(Debug, Deserialize)]
struct MoveRequest {
    player: String,
    position: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateGameResponse {
    game_id: i64,
    room_no: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JoinGameResponse {
    message: String,
    board: Board,
    current_player: Option<Seat>,
    player_x: Option<String>,
    player_o: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MoveResponse {
    board: Board,
    next_player: Option<Seat>,
    winner: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GameResponse {
    game_id: i64,
    room_no: i64,
    board: Board,
    current_player: Option<Seat>,
    winner: Option<&'static str>,
    player_x: Option<String>,
    player_o: Option<String>,
    created_at: String,
    updated_at: String,
}

impl From<&Session> for GameResponse {
    fn from(session: &Session) -> Self {
        GameResponse {
            game_id: session.id,
            room_no: session.room_no,
            board: session.state.board,
            current_player: session.state.current_turn,
            winner: session.state.outcome.wire(),
            player_x: session.state.player_a.clone(),
            player_o: session.state.player_b.clone(),
            created_at: session
                .created_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
            updated_at: session
                .updated_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| "unknown".to_string()),
        }
    }
}

fn parse_seat(raw: &str) -> Result<Seat, AppError> {
    match raw {
        "X" => Ok(Seat::A),
        "O" => Ok(Seat::B),
        other => Err(AppError::invalid(
            ErrorCode::InvalidSeat,
            format!("Invalid player: {other} (expected \"X\" or \"O\")"),
        )),
    }
}

/// POST /api/games
async fn create_game(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let session = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = SessionService::new();
            Ok(service.create(txn).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(CreateGameResponse {
        game_id: session.id,
        room_no: session.room_no,
    }))
}

/// POST /api/games/{game_id}/join
async fn join_game(
    http_req: HttpRequest,
    game_id: GameId,
    body: web::Json<JoinRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.into_inner();
    let username = body.into_inner().username;

    let (session, joined) = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = SessionService::new();
            Ok(service.join(txn, id, &username).await?)
        })
    })
    .await?;

    let message = if joined.rejoined {
        format!("Already seated as {}.", joined.seat.mark())
    } else {
        match joined.seat {
            Seat::A => "Joined as X. Waiting for an opponent.".to_string(),
            Seat::B => "Joined as O. Game on!".to_string(),
        }
    };

    Ok(HttpResponse::Ok().json(JoinGameResponse {
        message,
        board: session.state.board,
        current_player: session.state.current_turn,
        player_x: session.state.player_a.clone(),
        player_o: session.state.player_b.clone(),
    }))
}

/// POST /api/games/{game_id}/move
async fn make_move(
    http_req: HttpRequest,
    game_id: GameId,
    body: web::Json<MoveRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.into_inner();
    let request = body.into_inner();
    let seat = parse_seat(&request.player)?;
    let position = request.position;

    let session = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = SessionService::new();
            Ok(service.apply_move(txn, id, seat, position).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(MoveResponse {
        board: session.state.board,
        next_player: session.state.current_turn,
        winner: session.state.outcome.wire(),
    }))
}

/// GET /api/games/{game_id}
async fn get_game(
    http_req: HttpRequest,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.into_inner();

    let session = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = SessionService::new();
            Ok(service.get(txn, id).await?)
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameResponse::from(&session)))
}

/// GET /api/games
async fn list_games(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let sessions = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            let service = SessionService::new();
            Ok(service.list(txn).await?)
        })
    })
    .await?;

    let response: Vec<GameResponse> = sessions.iter().map(GameResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(create_game))
            .route(web::get().to(list_games)),
    )
    .service(web::resource("/{game_id}").route(web::get().to(get_game)))
    .service(web::resource("/{game_id}/join").route(web::post().to(join_game)))
    .service(web::resource("/{game_id}/move").route(web::post().to(make_move)));
}
