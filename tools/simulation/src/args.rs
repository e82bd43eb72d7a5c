use std::path::PathBuf;

use clap::Parser;
use matching_engine::{EngineConfig, SelectionOrder};
use simulation::scenario::ScenarioConfig;
use types::ids::Side;

/// Stable marriage simulator - generate preferences, match, verify
#[derive(Parser, Debug)]
#[command(name = "stable-marriage")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Number of proposers, and of receivers
    #[arg(required_unless_present = "input")]
    pub couples: Option<usize>,

    /// Seed for preference generation and the shuffled order
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Order in which free proposers are picked
    #[arg(long, value_enum, default_value = "lowest-index")]
    pub order: OrderArg,
    /// Let receivers propose instead
    #[arg(long, default_value_t = false)]
    pub receivers_propose: bool,
    /// Abort after this many proposals
    #[arg(long)]
    pub step_budget: Option<usize>,

    /// Load preferences from a JSON file instead of generating them
    #[arg(short, long, conflicts_with_all = ["couples", "trials"])]
    pub input: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,
    /// Also write the JSON export to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Run this many seeded instances and print aggregate metrics
    #[arg(long)]
    pub trials: Option<u64>,
    /// Re-solve under every selection order and compare
    #[arg(long, default_value_t = false)]
    pub check_orders: bool,
}

impl Args {
    /// Convert command-line arguments into a scenario configuration
    pub fn to_config(&self, seed: u64) -> ScenarioConfig {
        let engine = EngineConfig {
            proposing: if self.receivers_propose {
                Side::Receiver
            } else {
                Side::Proposer
            },
            selection: self.order.with_seed(seed),
            step_budget: self.step_budget,
            ..EngineConfig::default()
        };

        ScenarioConfig {
            couples: self.couples.unwrap_or_default(),
            seed,
            engine,
        }
    }
}

/// Command-line argument wrapper for SelectionOrder
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OrderArg {
    /// Always the free proposer with the lowest index
    #[value(name = "lowest-index")]
    LowestIndex,
    /// Free proposers in queue order
    #[value(name = "fifo")]
    Fifo,
    /// Most recently freed proposer first
    #[value(name = "lifo")]
    Lifo,
    /// Uniformly random free proposer, seeded
    #[value(name = "shuffled")]
    Shuffled,
}

impl OrderArg {
    pub fn with_seed(self, seed: u64) -> SelectionOrder {
        match self {
            OrderArg::LowestIndex => SelectionOrder::LowestIndex,
            OrderArg::Fifo => SelectionOrder::Fifo,
            OrderArg::Lifo => SelectionOrder::Lifo,
            OrderArg::Shuffled => SelectionOrder::Shuffled { seed },
        }
    }
}
