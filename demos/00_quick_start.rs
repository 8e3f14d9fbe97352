/// quick start - monthly payment for a personal loan
use installment_loan_rs::{compute_monthly_payment, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // $10,000 at 10% over five years
    let payment = compute_monthly_payment(Money::from_major(10_000), Rate::from_percentage(10), 60)?;

    println!("monthly payment: ${}", payment);

    Ok(())
}
