pub mod handlers;
mod middleware;
pub mod openapi;
pub mod response;
mod routes;
mod state;
pub mod upload;

pub use routes::create_router;
pub use state::AppState;
