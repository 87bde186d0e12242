use std::{error::Error, fs::File, path::PathBuf};

use clap::{Parser, Subcommand};
use strum::IntoEnumIterator;

use trainhook::{
    executor::ExecutorState,
    hook_options::HookOptions,
    priority::{get_priority, Priority, PrioritySpec},
};

/// Inspect hook priorities and hook configuration files.
#[derive(Parser, Debug, Clone)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Resolve one or more priority designators to their values.
    /// Integers are checked to be within 0..=100; anything else is looked up as a level name, ignoring case
    Priority {
        #[arg(required = true, allow_negative_numbers = true)]
        designators: Vec<String>,
    },
    /// List the named priority levels and their values
    Levels,
    /// Print the hooks declared in a configuration file in the order they would be called
    Order {
        /// path to a JSON hook configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Priority { designators } => {
            for designator in designators {
                let value = get_priority(parse_designator(&designator))?;
                println!("{} -> {}", designator, value);
            }
            Ok(())
        }
        Commands::Levels => {
            for level in Priority::iter() {
                println!("{:<10} {:>3}", level.name(), level.value());
            }
            Ok(())
        }
        Commands::Order { config } => {
            let file = File::open(&config)?;
            let hooks = HookOptions::from_reader(file)?.build::<ExecutorState>()?;
            for (position, (name, priority)) in hooks.priorities().into_iter().enumerate() {
                let level = Priority::from_value(priority)
                    .map_or(String::new(), |level| format!(" ({})", level));
                println!("{}. {} {}{}", position + 1, name, priority, level);
            }
            Ok(())
        }
    }
}

/// command line designators are text, so anything that parses as an integer is taken as a value, and everything else as a name
fn parse_designator(designator: &str) -> PrioritySpec {
    let designator = designator.trim();
    match designator.parse::<i64>() {
        Ok(value) => PrioritySpec::Value(value),
        Err(_) => PrioritySpec::Name(designator.to_string()),
    }
}
