//! Proposing-side partner record

/// State of one proposing agent during a run.
///
/// The cursor is the rank (in the agent's own ranking) of the last
/// candidate proposed to. It only ever moves forward; being displaced does
/// not rewind it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposerRecord {
    partner: Option<usize>,
    cursor: Option<usize>,
}

impl ProposerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// FREE when not currently held by any receiver
    pub fn is_free(&self) -> bool {
        self.partner.is_none()
    }

    pub fn partner(&self) -> Option<usize> {
        self.partner
    }

    /// Rank of the current partner in this agent's own ranking.
    ///
    /// An engaged proposer's partner is always the last candidate it
    /// proposed to, so this is the cursor.
    pub fn partner_rank(&self) -> Option<usize> {
        self.partner.and(self.cursor)
    }

    /// Rank of the last candidate proposed to, if any
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Advance to the next untried rank.
    ///
    /// Returns None once all `candidates` have been tried.
    pub fn advance(&mut self, candidates: usize) -> Option<usize> {
        let next = self.cursor.map_or(0, |c| c + 1);
        if next >= candidates {
            return None;
        }
        self.cursor = Some(next);
        Some(next)
    }

    pub fn engage(&mut self, receiver: usize) {
        self.partner = Some(receiver);
    }

    /// Back to FREE; the cursor stays where it was
    pub fn release(&mut self) {
        self.partner = None;
    }
}
