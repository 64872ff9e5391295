use serde::{Deserialize, Serialize};

/// Blend weights for the two reference scopes used by the new-entrant proxy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProxyWeights {
    /// Weight on the recent comparable local election result.
    pub primary: f64,
    /// Weight on current national polling.
    pub secondary: f64,
}

/// User-tunable model assumptions, threaded explicitly through every call.
///
/// Values outside their documented bounds are clamped at point of use via
/// the accessor methods rather than rejected at construction, so a strategist
/// typing an out-of-range number degrades gracefully instead of erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assumptions {
    /// How much of the national polling swing transfers to local contests, in [0, 1].
    pub national_to_local_dampening: f64,
    /// Additive share bonus for a defending incumbent who is standing again.
    pub incumbency_bonus_pct: f64,
    /// Additive share penalty applied instead when the incumbent stands down.
    pub retirement_penalty_pct: f64,
    /// Reference-scope blend weights for parties with no ward baseline.
    pub reform_proxy_weights: ProxyWeights,
    /// Flat adjustment to baseline turnout, bounded to [-0.05, 0.05].
    pub turnout_adjustment: f64,
    /// Scales the national swing, bounded to [0.5, 1.5].
    pub swing_multiplier: f64,
    /// When false, the new-entrant proxy stage is skipped entirely.
    pub reform_stands_in_all_wards: bool,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            national_to_local_dampening: 0.6,
            incumbency_bonus_pct: 0.03,
            retirement_penalty_pct: 0.02,
            reform_proxy_weights: ProxyWeights { primary: 0.6, secondary: 0.4 },
            turnout_adjustment: 0.0,
            swing_multiplier: 1.0,
            reform_stands_in_all_wards: true,
        }
    }
}

impl Assumptions {
    /// Dampening factor clamped to [0, 1].
    #[inline] pub fn dampening(&self) -> f64 { self.national_to_local_dampening.clamp(0.0, 1.0) }

    /// Turnout adjustment clamped to [-0.05, 0.05].
    #[inline] pub fn turnout_adjustment(&self) -> f64 { self.turnout_adjustment.clamp(-0.05, 0.05) }

    /// Swing multiplier clamped to [0.5, 1.5].
    #[inline] pub fn swing_multiplier(&self) -> f64 { self.swing_multiplier.clamp(0.5, 1.5) }
}

#[cfg(test)]
mod tests {
    use super::Assumptions;

    #[test]
    fn out_of_range_values_are_clamped_at_point_of_use() {
        let assumptions = Assumptions {
            national_to_local_dampening: 1.8,
            turnout_adjustment: -0.2,
            swing_multiplier: 9.0,
            ..Default::default()
        };
        assert_eq!(assumptions.dampening(), 1.0);
        assert_eq!(assumptions.turnout_adjustment(), -0.05);
        assert_eq!(assumptions.swing_multiplier(), 1.5);
    }
}
