//! Permtree CLI
//!
//! Loads a rule schema from a JSON file and answers questions about it: the
//! hierarchy order, whether rules are declared, and which rules a principal
//! effectively holds for a list of granted names.
//!
//! # Usage
//!
//! ```bash
//! permtree --schema rules.json list
//! permtree --schema rules.json grant users users.remove --then users
//! ```

mod error;
mod schema;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use permtree::Registry;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "permtree")]
#[command(about = "Inspect hierarchical permission rule schemas")]
#[command(version)]
struct Args {
    /// JSON file holding the rule schema
    #[arg(short, long, env = "PERMTREE_SCHEMA")]
    schema: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rules in hierarchy order
    List {
        /// Print every declared rule in declaration order instead
        #[arg(long)]
        raw: bool,
    },

    /// Check that rules are declared; exits with 1 otherwise
    Check {
        /// Succeed when at least one rule is declared
        #[arg(long)]
        any: bool,

        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Print the rules effectively granted by a list of names
    Grant {
        names: Vec<String>,

        /// Narrow the granted rules again, e.g. for a sub-user
        #[arg(long, num_args = 1..)]
        then: Option<Vec<String>>,
    },

    /// Print the direct children of a rule
    Children { name: String },
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose {
        "permtree=trace,permtree_cli=trace"
    } else {
        "permtree=warn,permtree_cli=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<ExitCode, CliError> {
    let registry = schema::load(&args.schema)?;

    match args.command {
        Command::List { raw } => {
            let rules = if raw {
                registry.rules().to_vec()
            } else {
                registry.all()
            };
            for rule in &rules {
                let indent = "  ".repeat(rule.depth());
                match rule.title() {
                    Some(title) => println!("{indent}{}  {title}", rule.name()),
                    None => println!("{indent}{}", rule.name()),
                }
            }
            Ok(ExitCode::SUCCESS)
        }

        Command::Check { any, names } => {
            for name in &names {
                let state = if registry.has(name) {
                    "declared"
                } else {
                    "undeclared"
                };
                println!("{name}: {state}");
            }

            let ok = if any {
                registry.has_one(&names)
            } else {
                registry.has_all(&names)
            };
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }

        Command::Grant { names, then } => {
            let mut granted = registry.only(&names);
            info!(requested = names.len(), granted = granted.len(), "resolved grant");

            if let Some(narrowed) = then {
                granted = granted.only(&narrowed);
                info!(requested = narrowed.len(), granted = granted.len(), "narrowed grant");
            }

            print_names(&granted);
            Ok(ExitCode::SUCCESS)
        }

        Command::Children { name } => {
            debug!(rule = %name, has_children = registry.has_children(&name), "listing children");
            for child in registry.children(&name) {
                println!("{}", child.name());
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_names(registry: &Registry) {
    for name in registry.names() {
        println!("{name}");
    }
}
