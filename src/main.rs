use clap::Parser;
use ideabox::cli::commands::Cli;
use ideabox::cli::handlers::{self, Context};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let ctx = match Context::load(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&ctx.config.log.level);

    if let Err(e) = handlers::dispatch(&ctx, cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// IDEABOX_LOG wins over the configured level.
fn init_logging(configured: &str) {
    let filter = EnvFilter::try_from_env("IDEABOX_LOG")
        .or_else(|_| EnvFilter::try_new(configured))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
