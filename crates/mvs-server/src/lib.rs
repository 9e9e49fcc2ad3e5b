pub mod config;
pub mod cors;
pub mod error;
pub mod run;

pub use error::{Error, Result};
pub use run::{build_state, run, run_graceful_with_state, run_with_state};
