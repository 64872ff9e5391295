//! CSV rendering for strategy outputs.

use crate::canvass::CanvassPlan;
use crate::strategy::ResourceAllocation;

/// Fixed column order of the resource-allocation export.
const ALLOCATION_HEADER: [&str; 9] = [
    "Ward",
    "Classification",
    "Score",
    "Win Probability",
    "Allocated Hours",
    "Percent of Budget",
    "Estimated Votes",
    "Cost Per Vote",
    "ROI Tier",
];

/// Fixed column order of the canvassing export.
const CANVASSING_HEADER: [&str; 8] = [
    "Session",
    "Visit Order",
    "Ward",
    "Latitude",
    "Longitude",
    "Hours",
    "ROI",
    "Estimated 4hr Blocks",
];

/// Render a resource-allocation plan as CSV.
pub fn allocation_csv(allocations: &[ResourceAllocation]) -> String {
    let mut out = String::new();
    push_row(&mut out, ALLOCATION_HEADER.iter().map(|s| s.to_string()));
    for a in allocations {
        push_row(&mut out, [
            a.ward.clone(),
            a.classification.label().to_string(),
            a.score.to_string(),
            format!("{:.3}", a.win_probability),
            format!("{:.1}", a.hours),
            format!("{:.1}", a.percent_of_budget),
            format!("{:.0}", a.estimated_votes),
            format!("{:.2}", a.cost_per_vote),
            a.roi.label().to_string(),
        ].into_iter());
    }
    out
}

/// Render a canvassing plan as CSV, one row per ward visit.
pub fn canvassing_csv(plan: &CanvassPlan) -> String {
    let mut out = String::new();
    push_row(&mut out, CANVASSING_HEADER.iter().map(|s| s.to_string()));
    for session in &plan.sessions {
        for visit in &session.visits {
            push_row(&mut out, [
                session.session.to_string(),
                visit.order.to_string(),
                visit.ward.clone(),
                format!("{:.5}", visit.centroid.y()),
                format!("{:.5}", visit.centroid.x()),
                format!("{:.1}", visit.hours),
                visit.roi.label().to_string(),
                session.blocks.to_string(),
            ].into_iter());
        }
    }
    out
}

/// Standard delimited-text quoting: quote a field containing the separator,
/// a quote or a newline, doubling embedded quotes.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn push_row(out: &mut String, fields: impl Iterator<Item = String>) {
    let row = fields.map(|f| escape(&f)).collect::<Vec<_>>().join(",");
    out.push_str(&row);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use geo::Point;

    use crate::canvass::plan_canvassing;
    use crate::strategy::{ResourceAllocation, RoiTier, WardClass};

    use super::{allocation_csv, canvassing_csv, escape};

    fn allocation(ward: &str) -> ResourceAllocation {
        ResourceAllocation {
            ward: ward.to_string(),
            classification: WardClass::Battleground,
            score: 62,
            win_probability: 0.512,
            hours: 120.5,
            percent_of_budget: 12.1,
            estimated_votes: 57.8,
            cost_per_vote: 2.08,
            roi: RoiTier::High,
        }
    }

    #[test]
    fn allocation_header_is_the_fixed_contract() {
        let csv = allocation_csv(&[allocation("Abbey")]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Ward,Classification,Score,Win Probability,Allocated Hours,Percent of Budget,Estimated Votes,Cost Per Vote,ROI Tier",
        );
        assert_eq!(lines.next().unwrap(), "Abbey,Battleground,62,0.512,120.5,12.1,58,2.08,High");
    }

    #[test]
    fn canvassing_header_is_the_fixed_contract() {
        let centroids = HashMap::from([("Abbey".to_string(), Point::new(-0.12765, 51.50722))]);
        let plan = plan_canvassing(&[allocation("Abbey")], &centroids, 8);
        let csv = canvassing_csv(&plan);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Session,Visit Order,Ward,Latitude,Longitude,Hours,ROI,Estimated 4hr Blocks",
        );
        // Latitude before longitude, per the contract.
        assert_eq!(lines.next().unwrap(), "1,1,Abbey,51.50722,-0.12765,120.5,High,31");
    }

    #[test]
    fn fields_with_separators_and_quotes_are_escaped() {
        assert_eq!(escape("Abbey"), "Abbey");
        assert_eq!(escape("Abbey, North"), "\"Abbey, North\"");
        assert_eq!(escape("St \"Mary\" Ward"), "\"St \"\"Mary\"\" Ward\"");

        let csv = allocation_csv(&[allocation("Abbey, North")]);
        assert!(csv.contains("\"Abbey, North\""));
    }
}
