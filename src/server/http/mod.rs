//! HTTP 服务

pub mod handlers;
pub mod routes;
pub mod server;

pub use routes::{create_router, AppState};
pub use server::serve;
