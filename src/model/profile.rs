use serde::{Deserialize, Serialize};

/// Census-derived demographic counts for a ward. Read-only input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemographicProfile {
    pub population: u32,
    pub over_65: u32,
    pub under_30: u32,
    pub minority_ethnic: u32,
    pub economically_inactive: u32,
}

impl DemographicProfile {
    fn fraction(&self, count: u32) -> f64 {
        if self.population == 0 { 0.0 } else { count as f64 / self.population as f64 }
    }

    /// Fraction of residents aged 65 or over (0 when population is 0).
    #[inline] pub fn over_65_fraction(&self) -> f64 { self.fraction(self.over_65) }

    /// Fraction of residents aged under 30 (0 when population is 0).
    #[inline] pub fn under_30_fraction(&self) -> f64 { self.fraction(self.under_30) }

    /// Fraction of residents from minority ethnic groups (0 when population is 0).
    #[inline] pub fn minority_ethnic_fraction(&self) -> f64 { self.fraction(self.minority_ethnic) }

    /// Fraction of residents who are economically inactive (0 when population is 0).
    #[inline] pub fn economically_inactive_fraction(&self) -> f64 { self.fraction(self.economically_inactive) }
}

/// Index of Multiple Deprivation summary for a ward. Read-only input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeprivationProfile {
    /// Raw IMD score (higher = more deprived).
    pub index: f64,
    /// National decile, 1 (most deprived) to 10 (least deprived).
    pub decile: u8,
}

#[cfg(test)]
mod tests {
    use super::DemographicProfile;

    #[test]
    fn fractions_are_zero_for_empty_population() {
        let profile = DemographicProfile::default();
        assert_eq!(profile.over_65_fraction(), 0.0);
        assert_eq!(profile.minority_ethnic_fraction(), 0.0);
    }

    #[test]
    fn fractions_divide_by_population() {
        let profile = DemographicProfile { population: 1000, over_65: 300, ..Default::default() };
        assert!((profile.over_65_fraction() - 0.3).abs() < 1e-12);
    }
}
