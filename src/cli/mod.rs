pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, InputArgs, PreviewArgs, RenderArgs};
pub use output::{OutputFormat, OutputFormatter};
