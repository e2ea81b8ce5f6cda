mod commands;
mod handlers;

pub use commands::{Cli, Commands, ServeArgs};
pub use handlers::{handle_list, handle_serve, handle_stats};
