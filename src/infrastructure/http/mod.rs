//! HTTP Infrastructure - RESTful API

mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod routes;
mod server;
mod state;

pub use auth::CurrentUser;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig, UPLOADS_PUBLIC_PATH};
pub use state::AppState;
