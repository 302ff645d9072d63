mod commands;
mod dispatch;

pub use commands::{Cli, Commands};
pub use dispatch::{dispatch, render_plan};
