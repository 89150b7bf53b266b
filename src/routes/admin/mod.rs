use axum::Router;

use crate::state::AppState;

pub mod catalogue;
pub mod commandes;
pub mod content;
pub mod dashboard;
pub mod suppliers;
pub mod users;

/// Back-office endpoints. Every handler requires a bearer token; role checks
/// happen in the services.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(catalogue::router())
        .merge(suppliers::router())
        .merge(content::router())
        .merge(commandes::router())
        .merge(dashboard::router())
        .merge(users::router())
}
