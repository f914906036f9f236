//! # repo-favorites
//!
//! A small web service over the public GitHub API: search repositories by
//! name, keep an in-memory set of favorites, and rank either list by a
//! relevance score derived from stars, forks and watchers.
//!
//! ## Architecture
//!
//! ```text
//!        ┌──────────────┐
//!        │  HTTP (axum) │  deadline + cancellation per request
//!        └──────┬───────┘
//!               ▼
//!     ┌───────────────────┐
//!     │ RepositoryService │──────────────┐
//!     └──┬──────────┬─────┘              │
//!        │          │                    ▼
//!        ▼          ▼           ┌─────────────────┐
//! ┌────────────┐ ┌───────────┐  │ RepositoryClient│
//! │ Favorites  │ │ Relevance │  │ (GitHub REST)   │
//! │ (mutex set)│ │ (log10)   │  │ ≤8 concurrent   │
//! └────────────┘ └───────────┘  └─────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server and GitHub settings
//! - [`models`] - GitHub records, ranked views, request/response types
//! - [`favorites`] - Thread-safe in-memory favorites set
//! - [`relevance`] - Log-weighted popularity score in `0..=100`
//! - [`github`] - `RepositoryClient` trait and the reqwest-backed GitHub client
//! - [`service`] - Search, toggle, favorites fan-out and relevance ordering
//! - [`api`] - Axum handlers and router
//! - [`state`] - Shared application state

pub mod api;
pub mod config;
pub mod favorites;
pub mod github;
pub mod models;
pub mod relevance;
pub mod service;
pub mod state;
