use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ServerConfig, DEFAULT_PORT};
use crate::storage::DEFAULT_DATA_FILE;

#[derive(Parser, Debug)]
#[command(name = "tasklist")]
#[command(version, about = "A single-user task list with a JSON REST API")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub serve: ServeArgs,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Print all todos
    List {
        /// JSON file holding the todo list
        #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
        data_file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print completion statistics
    Stats {
        /// JSON file holding the todo list
        #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
        data_file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// JSON file holding the todo list
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,
}

impl ServeArgs {
    pub fn config(&self) -> ServerConfig {
        ServerConfig::new(self.port, self.data_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_flags() {
        let cli = Cli::try_parse_from(["tasklist", "list", "--data-file", "/tmp/t.json", "--json"])
            .unwrap();
        match cli.command {
            Some(Commands::List { data_file, json }) => {
                assert_eq!(data_file, PathBuf::from("/tmp/t.json"));
                assert!(json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from(["tasklist", "serve", "--port", "8080"]).unwrap();
        match cli.command {
            Some(Commands::Serve(args)) => {
                let config = args.config();
                assert_eq!(config.port, 8080);
                assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_top_level_flags_apply_to_default_serve() {
        let cli = Cli::try_parse_from(["tasklist", "--port", "4000", "--data-file", "x.json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.serve.port, 4000);
        assert_eq!(cli.serve.data_file, PathBuf::from("x.json"));
    }
}
