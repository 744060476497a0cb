//! Movie Intelligence Providers
//!
//! HTTP collaborators behind the core seams:
//! - [`GeminiAgent`] — generation backend per agent profile
//! - [`OmdbClient`] — descriptive metadata source
//! - [`TmdbClient`] — best-effort financial source
//! - [`TextFileSink`] — report artifact writer
//!
//! All constructors take an explicit [`ProviderConfig`]; nothing here
//! reads ambient environment state.

pub mod config;
pub mod gemini;
pub mod omdb;
pub mod sink;
pub mod tmdb;

// Re-export key types
pub use config::ProviderConfig;
pub use gemini::GeminiAgent;
pub use omdb::OmdbClient;
pub use sink::TextFileSink;
pub use tmdb::TmdbClient;
