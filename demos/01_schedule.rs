/// amortization schedule - period by period table and json export
use installment_loan_rs::{LoanTerms, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== amortization schedule ===\n");

    let terms = LoanTerms::new(Money::from_major(5_000), Rate::from_percentage(15), 12);
    let result = terms.schedule()?;

    println!("{:>6} {:>10} {:>10} {:>10} {:>10}", "period", "payment", "interest", "principal", "balance");
    for record in &result.schedule {
        println!(
            "{:>6} {:>10} {:>10} {:>10} {:>10}",
            record.period, record.payment, record.interest, record.principal, record.balance
        );
    }
    println!("\ntotal interest: ${}", result.total_interest.round_cents());

    // same loan paid quarterly
    let quarterly = LoanTerms::new(Money::from_major(5_000), Rate::from_percentage(15), 4)
        .with_periods_per_year(4)
        .schedule()?;
    println!("\nquarterly:");
    println!("{}", quarterly.to_json_pretty()?);

    Ok(())
}
