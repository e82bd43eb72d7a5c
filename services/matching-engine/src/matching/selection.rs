//! Free-proposer selection
//!
//! Decides which FREE proposer moves next. Deferred acceptance reaches the
//! same matching under every order, so this only changes the proposal
//! sequence, never the result.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

/// Rule for picking the next free proposer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionOrder {
    /// Always the lowest-numbered free proposer
    #[default]
    LowestIndex,
    /// Longest-free first; rejected and displaced proposers rejoin at the back
    Fifo,
    /// Most recently freed first
    Lifo,
    /// Uniformly random among the free proposers, from a seeded RNG
    Shuffled { seed: u64 },
}

impl SelectionOrder {
    /// One of each order, the shuffled one using `seed`
    pub fn all(seed: u64) -> [SelectionOrder; 4] {
        [
            SelectionOrder::LowestIndex,
            SelectionOrder::Fifo,
            SelectionOrder::Lifo,
            SelectionOrder::Shuffled { seed },
        ]
    }
}

impl fmt::Display for SelectionOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionOrder::LowestIndex => write!(f, "lowest-index"),
            SelectionOrder::Fifo => write!(f, "fifo"),
            SelectionOrder::Lifo => write!(f, "lifo"),
            SelectionOrder::Shuffled { seed } => write!(f, "shuffled({})", seed),
        }
    }
}

/// Pool of FREE proposers, drained in the configured order
pub struct FreeProposers {
    pool: Pool,
}

enum Pool {
    Lowest(BTreeSet<usize>),
    Fifo(VecDeque<usize>),
    Lifo(Vec<usize>),
    Shuffled { pending: Vec<usize>, rng: ChaCha8Rng },
}

impl FreeProposers {
    /// Pool holding proposers `0..count`, all initially free
    pub fn new(order: SelectionOrder, count: usize) -> Self {
        let pool = match order {
            SelectionOrder::LowestIndex => Pool::Lowest((0..count).collect()),
            SelectionOrder::Fifo => Pool::Fifo((0..count).collect()),
            // Reversed so the stack pops proposer 0 first
            SelectionOrder::Lifo => Pool::Lifo((0..count).rev().collect()),
            SelectionOrder::Shuffled { seed } => Pool::Shuffled {
                pending: (0..count).collect(),
                rng: ChaCha8Rng::seed_from_u64(seed),
            },
        };
        Self { pool }
    }

    /// Take the next free proposer
    pub fn pop(&mut self) -> Option<usize> {
        match &mut self.pool {
            Pool::Lowest(set) => set.pop_first(),
            Pool::Fifo(queue) => queue.pop_front(),
            Pool::Lifo(stack) => stack.pop(),
            Pool::Shuffled { pending, rng } => {
                if pending.is_empty() {
                    return None;
                }
                let pick = rng.gen_range(0..pending.len());
                Some(pending.swap_remove(pick))
            }
        }
    }

    /// Return a proposer to the pool
    pub fn push(&mut self, proposer: usize) {
        match &mut self.pool {
            Pool::Lowest(set) => {
                set.insert(proposer);
            }
            Pool::Fifo(queue) => queue.push_back(proposer),
            Pool::Lifo(stack) => stack.push(proposer),
            Pool::Shuffled { pending, .. } => pending.push(proposer),
        }
    }

    pub fn len(&self) -> usize {
        match &self.pool {
            Pool::Lowest(set) => set.len(),
            Pool::Fifo(queue) => queue.len(),
            Pool::Lifo(stack) => stack.len(),
            Pool::Shuffled { pending, .. } => pending.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
