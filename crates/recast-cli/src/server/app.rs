//! Axum application setup.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Session and navigation
        .route("/session", get(handlers::get_session))
        .route("/rows", get(handlers::list_rows))
        .route("/navigate", post(handlers::navigate))
        .route("/next", post(handlers::next_row))
        .route("/previous", post(handlers::previous_row))
        // Generation and review
        .route("/generate", post(handlers::generate))
        .route("/candidates/:k/use", post(handlers::use_candidate))
        .route("/candidates/:k/edit", post(handlers::edit_candidate))
        // Editing
        .route("/edit", put(handlers::update_edit))
        .route("/edit/save", post(handlers::save_edit))
        .route("/edit/cancel", post(handlers::cancel_edit))
        // Export
        .route("/export", post(handlers::export_dataset));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    println!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
