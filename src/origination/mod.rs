pub mod parameters;
pub mod quote;

pub use parameters::{LoanParameterSource, ParameterTable, ScoreBand, TermRate};
pub use quote::{DeclineReason, LoanQuote, QuoteOutcome, QuoteRequest, Underwriter};
