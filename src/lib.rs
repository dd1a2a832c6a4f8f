//! Bibliotek Library Loan Management System
//!
//! A Rust REST API server tracking a library's catalog, its customers, and
//! the loan/return lifecycle of every book, with due dates derived from each
//! book's category.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
