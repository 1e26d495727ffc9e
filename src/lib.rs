pub mod backend;
pub mod commands;
pub mod error;
pub mod http;
pub mod orchestrator;
pub mod portfolio;
pub mod render;
pub mod runtime;

pub use error::{ErrorCategory, PortfolioError};
pub use orchestrator::{FetchOptions, FetchState, Orchestrator};
pub use portfolio::{Portfolio, Profile, Repository};
