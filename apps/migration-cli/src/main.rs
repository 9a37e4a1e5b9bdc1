use clap::{Parser, ValueEnum};
use db_infra::config::db::{DbKind, RuntimeEnv};
use db_infra::infra::db::orchestrate_migration;
use migration::MigrationCommand;
use tracing::error;

#[derive(Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

impl From<Env> for RuntimeEnv {
    fn from(env: Env) -> Self {
        match env {
            Env::Prod => RuntimeEnv::Prod,
            Env::Test => RuntimeEnv::Test,
        }
    }
}

// In-memory SQLite is deliberately absent: the database would vanish when
// the command exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

impl From<Db> for DbKind {
    fn from(db: Db) -> Self {
        match db {
            Db::Postgres => DbKind::Postgres,
            Db::SqliteFile => DbKind::SqliteFile,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Social engine database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type
    #[arg(
        short,
        long,
        value_enum,
        default_value = "postgres",
        help = "Database type: postgres, sqlite-file"
    )]
    db: Db,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_line_number(false)
        .with_file(false)
        .with_env_filter("migration=info,db_infra=info,sqlx=warn")
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let rendered = e.to_string();
            if rendered.contains("invalid value") && rendered.contains("--db") {
                eprintln!("Unsupported database type provided.");
                eprintln!();
                eprintln!("In-memory SQLite is not available from the CLI: every invocation");
                eprintln!("would migrate a fresh database that disappears on exit.");
                eprintln!();
                eprintln!("Supported database types:");
                eprintln!("  postgres    - PostgreSQL database");
                eprintln!("  sqlite-file - SQLite file database");
                eprintln!();
                eprintln!("Example: cargo run -p migration-cli -- --db sqlite-file status");
                std::process::exit(1);
            }
            e.exit();
        }
    };

    let env = RuntimeEnv::from(args.env);
    let db_kind = DbKind::from(args.db);

    if let Err(e) = orchestrate_migration(env, db_kind, args.command.into()).await {
        error!(error = %e, "migration failed");
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
