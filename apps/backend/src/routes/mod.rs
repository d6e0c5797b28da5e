use actix_web::web;

pub mod games;
pub mod health;

/// Configure application routes, shared by `main.rs` and the test suites.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Root greeting and health check
    cfg.route("/", web::get().to(health::root));
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Game routes: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));
}
