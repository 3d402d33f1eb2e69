//! SQLite storage for the `TaskForge` server.
//!
//! Provides persistence for users and tasks, plus the minimal task-fact
//! projection consumed by the authorization gate.

mod db;
mod models;
mod queries;


pub use db::Database;
pub use models::*;
