//! EduPass HTTP API: accounts, timed content access, the lecture catalog,
//! realtime notifications and the study assistant relay.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod relay;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod ws;
