use std::collections::HashMap;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::council::SeatTotals;
use crate::model::{Ward, WardPrediction};
use crate::predict::WardPredictor;

/// Council-level roll-up of per-ward forecasts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilForecast {
    pub seat_totals: SeatTotals,
    /// One entry per input ward, in input order. `None` for wards with no
    /// seat up for contest this cycle; contested wards that could not be
    /// forecast carry an absent prediction rather than being dropped.
    pub predictions: Vec<Option<WardPrediction>>,
    /// Physical size of the council: retained seats plus one per contested
    /// ward, whether or not that ward could be forecast.
    pub total_seats: u32,
}

/// Run the ward predictor over every contested ward and roll the results
/// into seat totals.
///
/// Retained seats (uncontested wards, and the off-cycle seats of wards that
/// elect by thirds) are credited to their holders directly. A contested ward
/// without history yields an absent prediction and credits nobody; the rest
/// of the batch is unaffected.
pub fn forecast_council(wards: &[Ward], predictor: &WardPredictor) -> CouncilForecast {
    let mut seat_totals = SeatTotals::new();
    let mut predictions = Vec::with_capacity(wards.len());
    let mut total_seats = 0u32;

    for ward in wards {
        for (party, &seats) in &ward.retained_seats {
            seat_totals.credit(party, seats);
            total_seats += seats;
        }

        if !ward.contested {
            predictions.push(None);
            continue;
        }
        total_seats += 1;

        let prediction = predictor.predict(ward);
        if let Some(winner) = &prediction.winner {
            seat_totals.credit(winner, 1);
        }
        predictions.push(Some(prediction));
    }

    CouncilForecast { seat_totals, predictions, total_seats }
}

impl CouncilForecast {
    /// Look up the forecast for a named contested ward.
    ///
    /// This is the one hard failure in the core: asking for a ward identity
    /// that is not in the forecast is a caller bug, not a data-quality
    /// problem, and is surfaced as an error rather than a silent skip.
    pub fn prediction_for(&self, ward: &str) -> Result<&WardPrediction> {
        match self.predictions.iter().flatten().find(|p| p.ward == ward) {
            Some(prediction) => Ok(prediction),
            None => bail!("[council::aggregate] no contested-ward forecast for '{ward}'"),
        }
    }

    /// Apply manual per-ward winner overrides to the seat totals.
    ///
    /// Each override removes the originally predicted winner's seat
    /// (deleting the entry if it drops to zero) and credits the forced
    /// party instead. Predictions themselves are left untouched so the
    /// methodology trail still shows what the model thought.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) {
        for prediction in self.predictions.iter().flatten() {
            let Some(forced) = overrides.get(&prediction.ward) else { continue };
            if prediction.winner.as_deref() == Some(forced.as_str()) {
                continue;
            }
            if let Some(original) = &prediction.winner {
                self.seat_totals.remove_seat(original);
            }
            self.seat_totals.credit(forced, 1);
        }
    }
}
