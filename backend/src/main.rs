//! # genweb
//!
//! Thin entry point: `serve` delegates to lib-web, `migrate` drives the
//! migration binding of a freshly built application.
//!
//! ```bash
//! genweb                          # serve with FLASK_ENV (default: development)
//! genweb --config production serve --bind 0.0.0.0:8000
//! genweb migrate upgrade
//! genweb migrate status
//! ```

use clap::{Args, Parser, Subcommand};
use lib_core::Config;
use lib_web::{create_app_with_config, start_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "genweb", about = "Web application skeleton", version)]
struct Cli {
    /// Configuration name: development, production or default (falls back to FLASK_ENV, then APP_ENV)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Serve options used when no subcommand is given
    #[command(flatten)]
    serve: ServeArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Args, Debug, PartialEq)]
struct ServeArgs {
    /// Address to listen on
    #[arg(
        long,
        env = "BIND_ADDRESS",
        default_value = "127.0.0.1:5000",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    bind: String,

    /// Do not apply pending migrations at startup.
    #[arg(long)]
    no_migrate: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Start the HTTP server (the default).
    Serve(ServeArgs),
    /// Manage database migrations.
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
enum MigrateAction {
    /// Apply all pending migrations.
    Upgrade,
    /// List migrations and whether each is applied.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve(cli.serve));

    match command {
        Command::Serve(args) => {
            start_server(ServerConfig {
                bind_address: args.bind,
                config_name: cli.config,
                run_migrations: !args.no_migrate,
            })
            .await
        }
        Command::Migrate { action } => run_migrate(cli.config.as_deref(), action).await,
    }
}

async fn run_migrate(config_name: Option<&str>, action: MigrateAction) -> anyhow::Result<()> {
    let config = match config_name {
        Some(name) => Config::from_name(name)?,
        None => Config::from_env()?,
    };
    lib_web::log::init_tracing(config.debug)?;

    let app = create_app_with_config(config).await?;
    let db = &app.state.db;
    let migrate = &app.state.migrate;

    match action {
        MigrateAction::Upgrade => {
            let applied = migrate.upgrade(db).await?;
            println!(
                "Applied {} migration(s) from {}",
                applied,
                migrate.directory().display()
            );
        }
        MigrateAction::Status => {
            let statuses = migrate.status(db).await?;
            if statuses.is_empty() {
                println!("No migrations found in {}", migrate.directory().display());
            }
            for status in statuses {
                println!(
                    "{:>14}  {:<7}  {}",
                    status.version,
                    if status.applied { "applied" } else { "pending" },
                    status.description
                );
            }
        }
    }

    db.close().await;
    Ok(())
}
