//! `TaskForge` Server Library
//!
//! Core functionality for the `TaskForge` backend:
//! - Cookie-carried JWT authentication with silent refresh
//! - Role and ownership authorization gates
//! - SQLite storage for users and tasks
//! - HTTP API

pub mod api;
pub mod auth;
pub mod authz;
pub mod storage;
