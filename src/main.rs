use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::io;

use wellkit::catalog::Catalog;
use wellkit::config::State;
use wellkit::diet::{self, SortField};
use wellkit::exercise;
use wellkit::meditation::{self, MeditationResponse};
use wellkit::render;

#[derive(Parser)]
#[command(name = "wellkit")]
#[command(version = "0.1")]
#[command(about = "Wellness lookup and ranking over pre-computed artifacts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Exact-match exercise lookup by name
    Exercise {
        /// Exercise name, matched case-sensitively against the catalog
        name: String,
        /// Emit a JSON envelope instead of text cards
        #[arg(long)]
        json: bool,
    },
    /// Rank one cuisine's recipes by a macro-nutrient, ties broken by
    /// aggregate similarity
    Diet {
        cuisine: String,
        #[arg(long, value_enum, default_value = "protein")]
        sort_by: SortField,
        #[arg(long)]
        json: bool,
    },
    /// Semantic meditation search over free text (argument, or stdin when
    /// omitted)
    Meditation {
        query: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the distinct selector values for one dataset
    List {
        #[arg(value_enum)]
        dataset: ListDataset,
    },
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum ListDataset {
    Exercises,
    Cuisines,
}

fn exercise_command(state: &State, name: &str, json: bool) -> Result<()> {
    let catalog = Catalog::open(state)?;
    let results = exercise::filter_by_name(&catalog.exercise, name);

    if json {
        let output = serde_json::json!({
            "query": { "name": name },
            "results": &results,
            "actual_results_count": results.len(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else if results.is_empty() {
        render::warn("No exercises found for the selected type.");
    } else {
        print!("{}", render::exercise_cards(&results));
    }
    Ok(())
}

fn diet_command(state: &State, cuisine: &str, sort_by: SortField, json: bool) -> Result<()> {
    let catalog = Catalog::open(state)?;
    let ranked = diet::rank_cuisine(&catalog.diet, cuisine, sort_by, state.diet_limit);

    match ranked {
        None => {
            if json {
                let output = serde_json::json!({
                    "query": { "cuisine": cuisine, "sort_by": sort_by },
                    "results": [],
                    "actual_results_count": 0,
                    "requested_results_count": state.diet_limit,
                });
                println!("{}", serde_json::to_string(&output)?);
            }
            render::warn("No recipes found for this cuisine type.");
        }
        Some(ranked) => {
            if json {
                let output = serde_json::json!({
                    "query": { "cuisine": cuisine, "sort_by": sort_by },
                    "results": &ranked,
                    "actual_results_count": ranked.len(),
                    "requested_results_count": state.diet_limit,
                });
                println!("{}", serde_json::to_string(&output)?);
            } else {
                print!("{}", render::diet_table(cuisine, sort_by, &ranked));
            }
        }
    }
    Ok(())
}

fn meditation_command(state: &State, query: Option<String>, json: bool) -> Result<()> {
    let input = match query {
        Some(text) => text,
        None => {
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            line
        }
    };

    let catalog = Catalog::open(state)?;
    let response = meditation::recommend(
        &catalog.meditation,
        catalog.encoder(),
        &input,
        state.meditation_top_k,
    )?;

    match response {
        MeditationResponse::InvalidInput => {
            if json {
                println!("{}", serde_json::json!({ "results": [], "invalid_input": true }));
            }
            render::warn("Please enter a meditation description.");
        }
        MeditationResponse::NoMatches => {
            if json {
                println!("{}", serde_json::json!({ "results": [] }));
            }
            render::warn("No matching meditations found.");
        }
        MeditationResponse::Matches(matches) => {
            if json {
                let output = serde_json::json!({
                    "results": &matches,
                    "actual_results_count": matches.len(),
                    "requested_results_count": state.meditation_top_k,
                });
                println!("{}", serde_json::to_string(&output)?);
            } else {
                print!("{}", render::meditation_list(&matches));
            }
        }
    }
    Ok(())
}

fn list_command(state: &State, dataset: ListDataset) -> Result<()> {
    let catalog = Catalog::open(state)?;
    let values = match dataset {
        ListDataset::Exercises => catalog.exercise_names(),
        ListDataset::Cuisines => catalog.cuisines(),
    };
    for value in values {
        println!("{}", value);
    }
    Ok(())
}

fn config_command(state: &State) -> Result<()> {
    state.print_config();
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let state = State::new()?;

    match args.command {
        Commands::Exercise { name, json } => exercise_command(&state, &name, json)?,
        Commands::Diet {
            cuisine,
            sort_by,
            json,
        } => diet_command(&state, &cuisine, sort_by, json)?,
        Commands::Meditation { query, json } => meditation_command(&state, query, json)?,
        Commands::List { dataset } => list_command(&state, dataset)?,
        Commands::Config => config_command(&state)?,
    }
    Ok(())
}
