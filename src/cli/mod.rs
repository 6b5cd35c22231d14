mod args;
mod commands;
mod interpreter;

pub use args::Cli;
#[allow(unused_imports)]
pub use interpreter::{ParsedArgs, RequestDescriptor, parse};
