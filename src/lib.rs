//! HTTP backend for a trivia game: categories, paginated questions, search,
//! and a quiz mode that never repeats a question within one session.

pub mod config;
pub mod db;
pub mod server;
pub mod telemetry;
