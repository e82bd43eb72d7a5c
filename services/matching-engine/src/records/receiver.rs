//! Receiving-side partner record

/// State of one receiving agent: the proposer it currently holds and that
/// proposer's rank in the receiver's own ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiverRecord {
    holder: Option<(usize, usize)>,
}

impl ReceiverRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holder(&self) -> Option<usize> {
        self.holder.map(|(proposer, _)| proposer)
    }

    /// Best rank seen so far
    pub fn holder_rank(&self) -> Option<usize> {
        self.holder.map(|(_, rank)| rank)
    }

    /// True if a proposer at `rank` beats the current holder.
    ///
    /// Strictly lower rank wins; an unheld receiver accepts anyone.
    pub fn would_accept(&self, rank: usize) -> bool {
        self.holder_rank().map_or(true, |held| rank < held)
    }

    /// Hold `proposer` at `rank`, returning the displaced holder
    pub fn hold(&mut self, proposer: usize, rank: usize) -> Option<usize> {
        self.holder.replace((proposer, rank)).map(|(previous, _)| previous)
    }
}
