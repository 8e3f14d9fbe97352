pub mod config;
pub mod decimal;
pub mod errors;
pub mod origination;
pub mod payments;
pub mod serialization;
pub mod types;

// re-export key types
pub use config::UnderwritingConfig;
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use origination::{
    DeclineReason, LoanParameterSource, LoanQuote, ParameterTable, QuoteOutcome, QuoteRequest,
    ScoreBand, TermRate, Underwriter,
};
pub use payments::{compute_monthly_payment, compute_schedule, AmortizationResult, PeriodRecord};
pub use serialization::ScheduleStatement;
pub use types::{LoanTerms, QuoteId, DEFAULT_PERIODS_PER_YEAR};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
