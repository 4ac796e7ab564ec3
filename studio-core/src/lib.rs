//! studio-core: Shared infrastructure for the Gemini Studio services.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
