use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Predicted seats per party across one council.
///
/// Seat counts are conserved: exactly one seat is credited per predictable
/// contested ward, plus every retained (not-up-for-contest) seat.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatTotals(BTreeMap<String, u32>);

impl SeatTotals {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Seats credited to a party (0 for unknown parties).
    #[inline] pub fn get(&self, party: &str) -> u32 { self.0.get(party).copied().unwrap_or(0) }

    /// Credit seats to a party.
    #[inline] pub fn credit(&mut self, party: &str, seats: u32) { *self.0.entry(party.to_string()).or_insert(0) += seats; }

    /// Remove one seat from a party, deleting the entry if it drops to zero.
    pub fn remove_seat(&mut self, party: &str) {
        if let Some(seats) = self.0.get_mut(party) {
            *seats = seats.saturating_sub(1);
            if *seats == 0 {
                self.0.remove(party);
            }
        }
    }

    /// Total seats credited so far.
    #[inline] pub fn total(&self) -> u32 { self.0.values().sum() }

    /// Iterate (party, seats) in deterministic (alphabetical) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(p, &s)| (p.as_str(), s))
    }

    /// Parties ordered by seats descending, name ascending on ties.
    pub fn standings(&self) -> Vec<(&str, u32)> {
        let mut standings = self.iter().collect::<Vec<_>>();
        standings.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        standings
    }
}
