//! Operator CLI for a Swiss-system tournament.
//!
//! Every command except `demo` runs against PostgreSQL; `demo` simulates a
//! tournament in memory.

use anyhow::{Context, Error, Result, anyhow, bail};
use log::{error, info};
use pico_args::Arguments;
use rand::SeedableRng;
use rand::rngs::StdRng;
use st_cli::{
    commands::{Command, CommandFlags, parse_command},
    config::CliConfig,
    demo::{DemoReport, run_demo},
    render,
};
use swiss_tournament::{TournamentError, TournamentManager, db::Database};

const HELP: &str = "\
Run a Swiss-system tournament

USAGE:
  st_cli [OPTIONS] COMMAND

COMMANDS:
  init                     Create the players and matches tables
  register NAME            Register a player
  report WINNER LOSER      Record that player WINNER beat player LOSER
  count                    Print the number of registered players
  standings                Print players ranked by wins
  pairings                 Print pairings for the next round
  reset                    Delete all players and matches
  demo                     Simulate a tournament in memory (no database)

OPTIONS:
  --db-url     URL         Database connection string  [default: env DATABASE_URL or postgres://postgres@localhost/tournament]
  --players    N           Demo field size  [default: 8]
  --rounds     N           Demo rounds  [default: 3]
  --seed       N           Demo random seed

FLAGS:
  --matches-only           With reset: delete matches but keep players
  --json                   Print results as JSON
  -h, --help               Print help information

ENVIRONMENT:
  DATABASE_URL             PostgreSQL connection string
  DB_MAX_CONNECTIONS       Maximum pool size
  RUST_LOG                 Log level (e.g., info, debug)
";

struct Args {
    database_url: Option<String>,
    json: bool,
    command: Command,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let database_url = pargs.opt_value_from_str("--db-url")?;
    let json = pargs.contains("--json");
    let flags = CommandFlags {
        matches_only: pargs.contains("--matches-only"),
        players: pargs.opt_value_from_str("--players")?,
        rounds: pargs.opt_value_from_str("--rounds")?,
        seed: pargs.opt_value_from_str("--seed")?,
    };

    let words = pargs
        .finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| anyhow!("Argument is not valid UTF-8: {:?}", arg))
        })
        .collect::<Result<Vec<_>>>()?;

    let args = Args {
        database_url,
        json,
        command: parse_command(&words, &flags)?,
    };

    env_logger::builder().format_target(false).init();

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let config = CliConfig::from_env(args.database_url, args.json)?;

    if !args.command.needs_database() {
        return run_offline(&config, args.command).await;
    }

    config.validate()?;

    info!("Connecting to database");
    let db = Database::new(&config.database)
        .await
        .context("Failed to connect to database")?;
    db.health_check().await.map_err(operator_error)?;
    let mgr = TournamentManager::with_pool(db.pool().clone());

    let result = execute(&config, &db, &mgr, args.command).await;
    db.close().await;
    result
}

async fn execute(
    config: &CliConfig,
    db: &Database,
    mgr: &TournamentManager,
    command: Command,
) -> Result<()> {
    match command {
        Command::Init => {
            db.init_schema().await.map_err(operator_error)?;
            let out = render::confirmation(
                config.json,
                "Schema ready",
                serde_json::json!({ "schema": "ready" }),
            )?;
            println!("{out}");
        }
        Command::Register(name) => {
            let id = mgr.register_player(&name).await.map_err(operator_error)?;
            let name = name.trim();
            let out = render::confirmation(
                config.json,
                format!("Registered {} with ID {}", name, id),
                serde_json::json!({ "id": id, "name": name }),
            )?;
            println!("{out}");
        }
        Command::Report { winner, loser } => {
            mgr.report_match(winner, loser).await.map_err(operator_error)?;
            let out = render::confirmation(
                config.json,
                format!("Recorded: {} beat {}", winner, loser),
                serde_json::json!({ "winner": winner, "loser": loser }),
            )?;
            println!("{out}");
        }
        Command::Count => {
            let count = mgr.count_players().await.map_err(operator_error)?;
            let out = render::confirmation(
                config.json,
                count.to_string(),
                serde_json::json!({ "players": count }),
            )?;
            println!("{out}");
        }
        Command::Standings => {
            let standings = mgr.player_standings().await.map_err(operator_error)?;
            if config.json {
                println!("{}", render::json(&standings)?);
            } else {
                print!("{}", render::standings_table(&standings));
            }
        }
        Command::Pairings => {
            let pairings = mgr.swiss_pairings().await.map_err(operator_error)?;
            if config.json {
                println!("{}", render::json(&pairings)?);
            } else {
                print!("{}", render::pairings_table(&pairings));
            }
        }
        Command::Reset { matches_only } => {
            let (text, deleted) = if matches_only {
                mgr.delete_matches().await.map_err(operator_error)?;
                ("Deleted all matches", "matches")
            } else {
                mgr.delete_players().await.map_err(operator_error)?;
                ("Deleted all players and matches", "players_and_matches")
            };
            let out = render::confirmation(
                config.json,
                text,
                serde_json::json!({ "deleted": deleted }),
            )?;
            println!("{out}");
        }
        Command::Demo { .. } => bail!("demo does not use the database"),
    }

    Ok(())
}

async fn run_offline(config: &CliConfig, command: Command) -> Result<()> {
    let Command::Demo {
        players,
        rounds,
        seed,
    } = command
    else {
        bail!("command requires a database");
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let report = run_demo(players, rounds, &mut rng)
        .await
        .map_err(operator_error)?;
    print_demo(config, &report)
}

fn print_demo(config: &CliConfig, report: &DemoReport) -> Result<()> {
    if config.json {
        println!("{}", render::json(report)?);
        return Ok(());
    }

    for (round, summary) in report.rounds.iter().enumerate() {
        println!("=== Round {} ===", round + 1);
        print!("{}", render::standings_table(&summary.standings));
        println!();
        print!("{}", render::pairings_table(&summary.pairings));
        println!();
    }

    println!("=== Final standings ===");
    print!("{}", render::standings_table(&report.final_standings));
    Ok(())
}

/// Log the full error and hand the operator the sanitized message
fn operator_error(err: TournamentError) -> Error {
    error!("{err:?}");
    anyhow!(err.client_message())
}
