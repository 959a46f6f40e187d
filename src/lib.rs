//! docmine - configuration backend for document extraction pipelines.
//!
//! Stores per-source extraction settings (profiles, field definitions,
//! normalization rules, prompt templates) in SQLite and exposes them
//! through a versioned REST API.

pub mod cli;
pub mod config;
pub mod migrations;
pub mod models;
pub mod repository;
pub mod schema;
pub mod server;
