pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod wallet;

pub use config::KeygenConfig;
pub use error::{KeygenError, KeygenResult};
pub use pipeline::{run_pipeline, run_with_config, KeyInfo};
