//! Backend for a prebuilt single-page application.
//!
//! Serves two fixed API endpoints (`/api/hello`, `/api/hello-image`) and a
//! catch-all route that resolves request paths against the built frontend
//! bundle, falling back to the index document for client-side routing.

pub mod api;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
