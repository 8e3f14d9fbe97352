pub mod calculator;
pub mod schedule;

pub use calculator::compute_monthly_payment;
pub use schedule::{compute_schedule, AmortizationResult, PeriodRecord};
