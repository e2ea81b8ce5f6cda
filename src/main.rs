use clap::Parser;
use tasklist::cli::{handle_list, handle_serve, handle_stats, Cli, Commands};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Logs go to stderr so `list --json` output stays clean.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => handle_serve(cli.serve).await,
        Some(Commands::Serve(args)) => handle_serve(args).await,
        Some(Commands::List { data_file, json }) => handle_list(data_file, json).await,
        Some(Commands::Stats { data_file, json }) => handle_stats(data_file, json).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
