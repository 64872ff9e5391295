use serde::{Deserialize, Serialize};

use crate::council::SeatTotals;

/// Minimum seats for outright control of a council.
#[inline]
pub fn majority_threshold(total_seats: u32) -> u32 {
    total_seats / 2 + 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoalitionKind {
    SingleParty,
    Coalition,
}

/// A party combination that reaches the majority threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coalition {
    pub parties: Vec<String>,
    pub seats: u32,
    /// Seats beyond the majority threshold.
    pub margin: u32,
    pub kind: CoalitionKind,
}

/// Enumerate viable governing combinations from predicted seat totals.
///
/// Single parties at or above the threshold are flagged as outright
/// majorities; every qualifying two-party sum is listed alongside them.
/// Three-party combinations are searched only when nothing smaller
/// qualifies. Plain enumeration: party cardinality is small. Results are
/// sorted by total seats descending, then party names for determinism.
pub fn find_coalitions(totals: &SeatTotals, total_seats: u32) -> Vec<Coalition> {
    let threshold = majority_threshold(total_seats);
    let parties = totals.standings();
    let mut coalitions = Vec::new();

    for &(party, seats) in &parties {
        if seats >= threshold {
            coalitions.push(Coalition {
                parties: vec![party.to_string()],
                seats,
                margin: seats - threshold,
                kind: CoalitionKind::SingleParty,
            });
        }
    }

    for i in 0..parties.len() {
        for j in i + 1..parties.len() {
            let seats = parties[i].1 + parties[j].1;
            if seats >= threshold {
                coalitions.push(partnership(&[parties[i].0, parties[j].0], seats, threshold));
            }
        }
    }

    if coalitions.is_empty() {
        for i in 0..parties.len() {
            for j in i + 1..parties.len() {
                for k in j + 1..parties.len() {
                    let seats = parties[i].1 + parties[j].1 + parties[k].1;
                    if seats >= threshold {
                        coalitions.push(partnership(
                            &[parties[i].0, parties[j].0, parties[k].0],
                            seats,
                            threshold,
                        ));
                    }
                }
            }
        }
    }

    coalitions.sort_by(|a, b| b.seats.cmp(&a.seats).then_with(|| a.parties.cmp(&b.parties)));
    coalitions
}

fn partnership(parties: &[&str], seats: u32, threshold: u32) -> Coalition {
    let mut names = parties.iter().map(|p| p.to_string()).collect::<Vec<_>>();
    names.sort();
    Coalition { parties: names, seats, margin: seats - threshold, kind: CoalitionKind::Coalition }
}
