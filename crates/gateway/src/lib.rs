//! Task gateway: HTTP CRUD surface over a hosted Supabase table.
//!
//! This crate provides:
//! - Typed PostgREST client for the `tasks` table
//! - HTTP handlers for task CRUD (create, read, update, toggle, delete)
//! - Env-driven configuration
//! - Boundary error mapping to JSON `{"detail": ...}` responses

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Most async API methods can fail

pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod store;

pub use config::Config;
pub use error::ApiError;
pub use models::{Task, TaskDraft};
pub use server::{build_router, AppState};
pub use store::SupabaseStore;
