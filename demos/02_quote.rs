/// quote - underwriting rules driven by a json configuration
use installment_loan_rs::{
    Money, ParameterTable, QuoteOutcome, QuoteRequest, SafeTimeProvider, ScheduleStatement,
    TimeSource, Underwriter, UnderwritingConfig,
};

const CONFIG: &str = r#"{
    "max_payment_income_ratio": "0.15",
    "min_income": "1000",
    "parameter_table": {
        "bands": [
            { "min_score": 580, "max_amount": "2000", "annual_rate": "0.30" },
            { "min_score": 660, "max_amount": "10000", "annual_rate": "0.18" },
            {
                "min_score": 740,
                "max_amount": "25000",
                "annual_rate": "0.12",
                "term_rates": [ { "max_term": 36, "annual_rate": "0.09" } ]
            }
        ],
        "origination_fee_percent": "1.5",
        "minimum_origination_fee": "25"
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== loan quote example ===\n");

    let underwriter = Underwriter::<ParameterTable>::from_config(UnderwritingConfig::from_json(CONFIG)?)?;
    let time = SafeTimeProvider::new(TimeSource::System);

    let requests = [
        QuoteRequest { amount: Money::from_major(12_000), credit_score: 700, term: 36, income: Money::from_major(6_000) },
        QuoteRequest { amount: Money::from_major(1_500), credit_score: 600, term: 12, income: Money::from_major(800) },
        QuoteRequest { amount: Money::from_major(9_000), credit_score: 680, term: 24, income: Money::from_major(2_500) },
        QuoteRequest { amount: Money::from_major(8_000), credit_score: 760, term: 36, income: Money::from_major(4_000) },
    ];

    for request in &requests {
        match underwriter.evaluate(request, &time)? {
            QuoteOutcome::Declined(reason) => println!("declined: {}", reason),
            QuoteOutcome::Approved(quote) => {
                println!("approved: payment ${} for {} months", quote.payment, quote.term);
                println!("{}", ScheduleStatement::from_quote(&quote, &time).to_json_pretty()?);
            }
        }
    }

    Ok(())
}
