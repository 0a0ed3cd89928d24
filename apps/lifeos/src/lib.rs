//! # LifeOS
//!
//! HTTP server and command-line front end for `lifeos-core`.
//!
//! - [`api`]: axum router, bearer-token auth, rate limiting
//! - [`cli`]: clap commands (server, init, register, status, ...)
//! - [`config`]: `lifeos.toml`, environment and flag layering

pub mod api;
pub mod cli;
pub mod config;
