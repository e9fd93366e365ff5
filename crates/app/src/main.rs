use std::fmt;

use course_core::french_course;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::CourseSeeder;
use storage::Storage;
use tracing::info;

mod telemetry;

const DEFAULT_DB_URL: &str = "sqlite:dev.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    db_url: String,
    rng_seed: Option<u64>,
}

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw:?}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    /// Defaults taken from `DATABASE_URL` and `SEED_RNG_SEED`.
    fn from_env() -> Result<Self, ArgsError> {
        let db_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_URL.into());
        let rng_seed = std::env::var("SEED_RNG_SEED")
            .ok()
            .map(|raw| parse_seed(&raw))
            .transpose()?;
        Ok(Self { db_url, rng_seed })
    }

    /// Apply command-line flags on top of `self`.
    fn parse_flags(mut self, mut args: impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    self.db_url = value;
                }
                "--seed" => {
                    let value = require_value(&mut args, "--seed")?;
                    self.rng_seed = Some(parse_seed(&value)?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(self)
    }
}

fn parse_seed(raw: &str) -> Result<u64, ArgsError> {
    raw.trim().parse().map_err(|_| ArgsError::InvalidSeed {
        raw: raw.to_owned(),
    })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  seed-french [--db <sqlite_url>] [--seed <u64>]");
    eprintln!();
    eprintln!("Wipes all course content and learner progress, then writes the French course.");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --seed (random)");
    eprintln!();
    eprintln!("Environment (.env is read if present):");
    eprintln!("  DATABASE_URL, SEED_RNG_SEED, LOG_LEVEL, LOG_FORMAT=json");
}

async fn run() -> Result<String, Box<dyn std::error::Error>> {
    let args = Args::from_env()?
        .parse_flags(std::env::args().skip(1))
        .inspect_err(|_| print_usage())?;

    let mut rng = match args.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(db = %args.db_url, rng_seed = ?args.rng_seed, "seeding French course");
    let storage = Storage::sqlite(&args.db_url).await?;
    let seeder = CourseSeeder::new(storage.content);
    let report = seeder.seed(&french_course(), &mut rng).await?;

    Ok(format!(
        "{} units, {} lessons, {} challenges, {} options",
        report.units, report.lessons, report.challenges, report.options
    ))
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    match run().await {
        Ok(summary) => {
            println!("French course seeded successfully: {summary}");
        }
        Err(err) => {
            eprintln!("Failed to seed French database: {err}");
            std::process::exit(1);
        }
    }
}
