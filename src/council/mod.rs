mod aggregate;
mod coalition;
mod seats;

pub use aggregate::{CouncilForecast, forecast_council};
pub use coalition::{Coalition, CoalitionKind, find_coalitions, majority_threshold};
pub use seats::SeatTotals;
