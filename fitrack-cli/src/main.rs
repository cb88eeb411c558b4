use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dotenvy::dotenv;
use log::info;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use fitrack::db::models::NewUser;
use fitrack::db::operations::{create_user, load_route, load_workout};
use fitrack::logging::set_log_level;
use fitrack::reports::{
    get_cardio_activities_localized, get_exercises_localized, get_foods_localized,
    get_hiit_workouts_localized, get_recipes_localized, get_user_cardio_history,
    get_user_daily_summary, get_user_hiit_history, get_user_nutrition_history,
    get_user_workout_history, simplified_data_stats,
};
use fitrack::seed::CatalogSeed;
use fitrack::{Database, DatabaseConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Fitrack - fitness tracking store", long_about = None)]
struct Args {
    /// SQLite database path
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(long, env = "FITRACK_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CatalogKind {
    Exercises,
    Foods,
    #[value(name = "cardio-activities")]
    CardioActivities,
    #[value(name = "hiit-workouts")]
    HiitWorkouts,
    Recipes,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogKind::Exercises => write!(f, "exercises"),
            CatalogKind::Foods => write!(f, "foods"),
            CatalogKind::CardioActivities => write!(f, "cardio-activities"),
            CatalogKind::HiitWorkouts => write!(f, "hiit-workouts"),
            CatalogKind::Recipes => write!(f, "recipes"),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HistoryKind {
    Workout,
    Cardio,
    Hiit,
    Nutrition,
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryKind::Workout => write!(f, "workout"),
            HistoryKind::Cardio => write!(f, "cardio"),
            HistoryKind::Hiit => write!(f, "hiit"),
            HistoryKind::Nutrition => write!(f, "nutrition"),
        }
    }
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Register a user; the id defaults to a fresh UUID
    Create {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Import catalog rows from a JSON file
    Seed { file: PathBuf },
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// List a catalog in one language
    Catalog {
        kind: CatalogKind,
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// A user's activity history, most recent first
    History {
        kind: HistoryKind,
        #[arg(short, long)]
        user: String,
        /// First day included (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Last day included (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// One day of a user's activity
    Summary {
        #[arg(short, long)]
        user: String,
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Catalog row counts
    Stats,
    /// GPS points of a cardio session in recorded order
    Route { session: String },
    /// A workout session with its exercises and sets
    Workout { session: String },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();
    if !set_log_level(&args.log_level) {
        anyhow::bail!("unknown log level {:?}", args.log_level);
    }

    let config = DatabaseConfig::new(&args.database_url).with_env_overrides()?;
    let db = Database::connect(&config)
        .with_context(|| format!("opening {}", args.database_url))?;

    if let Commands::Migrate = args.command {
        let applied = db.migrate()?;
        info!("{} migrations applied", applied.len());
        return print_json(&applied);
    }
    db.migrate()?;
    let mut conn = db.conn()?;

    match args.command {
        Commands::Migrate => Ok(()),
        Commands::Seed { file } => {
            let seed = CatalogSeed::from_path(&file)
                .with_context(|| format!("loading {}", file.display()))?;
            print_json(&seed.import(&mut conn)?)
        }
        Commands::User {
            command: UserCommand::Create { id, email, name },
        } => {
            let new = NewUser {
                email,
                name,
                ..NewUser::new(id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string()))
            };
            print_json(&create_user(&mut conn, &new)?)
        }
        Commands::Catalog { kind, lang } => {
            let lang = lang.as_deref();
            info!("Listing {kind}");
            match kind {
                CatalogKind::Exercises => print_json(&get_exercises_localized(&mut conn, lang)?),
                CatalogKind::Foods => print_json(&get_foods_localized(&mut conn, lang)?),
                CatalogKind::CardioActivities => {
                    print_json(&get_cardio_activities_localized(&mut conn, lang)?)
                }
                CatalogKind::HiitWorkouts => {
                    print_json(&get_hiit_workouts_localized(&mut conn, lang)?)
                }
                CatalogKind::Recipes => print_json(&get_recipes_localized(&mut conn, lang)?),
            }
        }
        Commands::History {
            kind,
            user,
            from,
            to,
        } => {
            let (from, to) = (from.as_deref(), to.as_deref());
            info!("Loading {kind} history of {user}");
            match kind {
                HistoryKind::Workout => {
                    print_json(&get_user_workout_history(&mut conn, &user, from, to)?)
                }
                HistoryKind::Cardio => {
                    print_json(&get_user_cardio_history(&mut conn, &user, from, to)?)
                }
                HistoryKind::Hiit => {
                    print_json(&get_user_hiit_history(&mut conn, &user, from, to)?)
                }
                HistoryKind::Nutrition => {
                    print_json(&get_user_nutrition_history(&mut conn, &user, from, to)?)
                }
            }
        }
        Commands::Summary { user, date } => {
            print_json(&get_user_daily_summary(&mut conn, &user, date.as_deref())?)
        }
        Commands::Stats => print_json(&simplified_data_stats(&mut conn)?),
        Commands::Route { session } => print_json(&load_route(&mut conn, &session)?),
        Commands::Workout { session } => print_json(&load_workout(&mut conn, &session)?),
    }
}
