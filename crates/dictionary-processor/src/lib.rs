pub mod config;
pub mod output;
pub mod pipeline;

pub use config::{Cli, ConfigError, PipelineConfig};
pub use pipeline::{PipelineError, PipelineOutcome, Products, process, run};
