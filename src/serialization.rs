//! printable statement views
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::origination::LoanQuote;
use crate::payments::PeriodRecord;
use crate::types::QuoteId;

/// payment schedule statement for an approved quote
#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleStatement {
    pub title: String,
    /// mm-dd-yyyy
    pub printed_date: String,
    pub quote_id: QuoteId,
    pub loan: LoanSummaryView,
    pub schedule: Vec<PeriodRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoanSummaryView {
    pub amount: Money,
    pub interest_rate: Rate,
    pub origination_fee: Money,
    pub financed_amount: Money,
    pub term: i32,
    pub payment: Money,
    pub total_interest: Money,
}

impl ScheduleStatement {
    pub const TITLE: &'static str = "Loan Payment Schedule";

    pub fn from_quote(quote: &LoanQuote, time_provider: &SafeTimeProvider) -> Self {
        ScheduleStatement {
            title: Self::TITLE.to_string(),
            printed_date: time_provider.now().format("%m-%d-%Y").to_string(),
            quote_id: quote.id,
            loan: LoanSummaryView {
                amount: quote.amount,
                interest_rate: quote.interest_rate,
                origination_fee: quote.origination_fee,
                financed_amount: quote.financed_amount,
                term: quote.term,
                payment: quote.payment,
                total_interest: quote.total_interest.round_cents(),
            },
            schedule: quote.schedule.clone(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
