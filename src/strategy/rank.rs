use serde::{Deserialize, Serialize};

use crate::council::CouncilForecast;
use crate::model::{Ward, WardPrediction};
use crate::strategy::{Classification, classify_ward, swing_required};

/// A campaign message suggestion generated from ward characteristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TalkingPoint {
    pub category: String,
    /// Icon tag for the presentation layer.
    pub icon: String,
    /// 1 = lead message, larger = supporting.
    pub priority: u8,
    pub text: String,
}

/// A contested ward scored and classified for the chosen party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedWard {
    pub prediction: WardPrediction,
    pub classification: Classification,
    pub swing_required: f64,
    pub win_probability: f64,
    /// Composite priority score in [0, 100].
    pub score: i32,
    /// Whether the seat is currently held by the chosen party.
    pub defending: bool,
    pub talking_points: Vec<TalkingPoint>,
}

impl RankedWard {
    #[inline] pub fn ward(&self) -> &str { &self.prediction.ward }
}

/// Win probability from the swing a ward still requires. The steep logistic
/// means a couple of points of extra required swing sharply lowers the
/// probability.
pub(crate) fn win_probability(swing_required: f64) -> f64 {
    1.0 / (1.0 + (swing_required * 15.0).exp())
}

/// Score and rank every predictable contested ward for the chosen party.
///
/// `wards` and `forecast.predictions` are parallel (the forecast was built
/// from the same slice). Wards without a forecast are excluded rather than
/// scored with sentinels.
///
/// Composite score: 40 x win probability + 25 x efficiency (smaller
/// electorates are cheaper to canvass) + 20 x turnout opportunity + 15 if
/// defending, rounded and clamped to [0, 100].
pub fn rank_battlegrounds(
    wards: &[Ward],
    forecast: &CouncilForecast,
    our_party: &str,
) -> Vec<RankedWard> {
    assert_eq!(wards.len(), forecast.predictions.len(),
        "forecast must come from the same ward slice");

    let mut ranked = wards.iter()
        .zip(&forecast.predictions)
        .filter_map(|(ward, prediction)| {
            let prediction = prediction.as_ref()?;
            if prediction.is_absent() { return None }

            let classification = classify_ward(prediction, our_party, ward.defender.as_deref());
            let swing = swing_required(prediction, our_party);
            let probability = win_probability(swing);
            let efficiency = (1.0 - prediction.electorate as f64 / 15_000.0).max(0.0);
            let turnout_opportunity = (1.0 - prediction.turnout).max(0.0);
            let defending = ward.defender.as_deref() == Some(our_party);

            let score = 40.0 * probability
                + 25.0 * efficiency
                + 20.0 * turnout_opportunity
                + 15.0 * if defending { 1.0 } else { 0.0 };

            Some(RankedWard {
                talking_points: talking_points(ward, prediction),
                prediction: prediction.clone(),
                classification,
                swing_required: swing,
                win_probability: probability,
                score: (score.round() as i32).clamp(0, 100),
                defending,
            })
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| {
        b.score.cmp(&a.score)
            .then_with(|| b.win_probability.partial_cmp(&a.win_probability).unwrap_or(std::cmp::Ordering::Equal))
            .then_with(|| a.ward().cmp(b.ward()))
    });
    ranked
}

/// Rule-generated campaign messages from demographic, deprivation, turnout
/// and competition thresholds.
fn talking_points(ward: &Ward, prediction: &WardPrediction) -> Vec<TalkingPoint> {
    let mut points = Vec::new();

    if prediction.majority_fraction < 0.05 {
        points.push(TalkingPoint {
            category: "competition".to_string(),
            icon: "target".to_string(),
            priority: 1,
            text: format!(
                "Forecast majority of just {} votes; every doorstep conversation counts.",
                prediction.majority_votes,
            ),
        });
    }
    if prediction.turnout < 0.30 {
        points.push(TalkingPoint {
            category: "turnout".to_string(),
            icon: "ballot".to_string(),
            priority: 1,
            text: format!(
                "Turnout around {:.0}%; a strong get-out-the-vote operation can move this ward.",
                prediction.turnout * 100.0,
            ),
        });
    }
    if let Some(demographics) = &ward.demographics {
        if demographics.over_65_fraction() > 0.25 {
            points.push(TalkingPoint {
                category: "demographics".to_string(),
                icon: "pensioners".to_string(),
                priority: 2,
                text: "More than a quarter of residents are over 65; lead with social care, buses and pensions.".to_string(),
            });
        }
        if demographics.minority_ethnic_fraction() > 0.30 {
            points.push(TalkingPoint {
                category: "community".to_string(),
                icon: "community".to_string(),
                priority: 2,
                text: "Diverse ward; invest in community-group outreach and translated literature.".to_string(),
            });
        }
    }
    if let Some(deprivation) = &ward.deprivation {
        if deprivation.decile <= 3 {
            points.push(TalkingPoint {
                category: "deprivation".to_string(),
                icon: "cost-of-living".to_string(),
                priority: 2,
                text: format!(
                    "Deprivation decile {}; cost-of-living and housing messages resonate strongest.",
                    deprivation.decile,
                ),
            });
        }
    }

    points.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.category.cmp(&b.category)));
    points
}
