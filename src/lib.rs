pub mod config;
pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod host;
pub mod math;
pub mod network;
pub mod operations;

pub use config::SplitConfig;
pub use diagnostics::Diagnostic;
pub use error::{Result, WallSplitError};
