use serde::{Deserialize, Serialize};

/// Kind of election a historical record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElectionKind {
    /// Ordinary local (council) election.
    Local,
    /// Parliamentary general election.
    General,
    /// Mid-term by-election for a casual vacancy.
    ByElection,
}

/// One candidate's result within a historical election.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateResult {
    pub party: String,
    /// Fractional vote share in [0, 1].
    pub share: f64,
    pub elected: bool,
}

/// A single past election in a ward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionRecord {
    pub year: i32,
    pub kind: ElectionKind,
    pub electorate: u32,
    /// Fractional turnout in [0, 1].
    pub turnout: f64,
    pub candidates: Vec<CandidateResult>,
}

/// Ordered sequence of a ward's past election results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WardElectionHistory {
    pub elections: Vec<ElectionRecord>,
}

impl WardElectionHistory {
    pub fn new(elections: Vec<ElectionRecord>) -> Self {
        Self { elections }
    }

    /// Whether the ward has any past results at all.
    #[inline] pub fn is_empty(&self) -> bool { self.elections.is_empty() }

    /// The most recent election of the given kind, if any.
    pub fn most_recent_of_kind(&self, kind: ElectionKind) -> Option<&ElectionRecord> {
        self.elections.iter()
            .filter(|e| e.kind == kind)
            .max_by_key(|e| e.year)
    }

    /// The most recent election of any kind, if any.
    pub fn most_recent(&self) -> Option<&ElectionRecord> {
        self.elections.iter().max_by_key(|e| e.year)
    }
}
