//! CLI probe for `vitesse_core`.
//!
//! Opens a candidate store and prints the displayed list for one tab and
//! search text, the same derivation the directory screen uses.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use vitesse_core::{
    core_version, derive_displayed, init_logging_from_config, CandidateRepository,
    CandidateStore, CoreConfig, DisplayQuery, DisplayTab,
};

#[derive(Debug, Parser)]
#[command(name = "vitesse", version, about = "Inspect a Vitesse candidate database")]
struct Cli {
    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// SQLite database file; overrides `db_path` from the config.
    #[arg(long)]
    db: Option<PathBuf>,

    /// Show the favorites tab instead of all candidates.
    #[arg(long)]
    favorites: bool,

    /// Case-insensitive first/last name filter.
    #[arg(long, default_value = "")]
    search: String,

    /// Do not seed demonstration candidates into a new database.
    #[arg(long)]
    no_seed: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CoreConfig::from_json_file(path)?,
        None => CoreConfig::default(),
    };
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }
    if cli.no_seed {
        config.seed_demo_data = false;
    }
    init_logging_from_config(&config)?;

    let store = CandidateStore::open(&config)?;
    let query = DisplayQuery {
        active_tab: if cli.favorites {
            DisplayTab::Favorites
        } else {
            DisplayTab::All
        },
        search_text: cli.search,
    };
    let displayed = derive_displayed(&store.list_all()?, &store.list_favorites()?, &query);

    println!("vitesse_core version={}", core_version());
    println!(
        "tab={:?} search={:?} count={}",
        query.active_tab,
        query.search_text,
        displayed.len()
    );
    for record in displayed {
        println!(
            "{:>4} {} {:<16} {:<16} {:<28} {:>10.2}",
            record.id,
            if record.is_favorite { '*' } else { ' ' },
            record.first_name,
            record.last_name,
            record.email,
            record.expected_salary
        );
    }

    Ok(())
}
