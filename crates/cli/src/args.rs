use clap::Parser;

use cashpoint_core::Money;

/// Withdraw cash from a simulated cash machine.
///
/// Example: `cashpoint --withdrawal 185 --deposit 1893.28`
#[derive(Debug, Parser)]
#[command(name = "cashpoint", version)]
pub struct Args {
    /// Amount to deposit into the account first (e.g. 12356.84, 123458, 1234567.8).
    #[arg(long, required_unless_present = "sweep")]
    pub deposit: Option<Money>,

    /// Amount to withdraw, in whole units.
    #[arg(long, required_unless_present = "sweep")]
    pub withdrawal: Option<u32>,

    /// Deposit 1009838.59 and withdraw every allowed amount from the minimum
    /// to the maximum, checking each disbursement.
    #[arg(long, conflicts_with_all = ["deposit", "withdrawal"])]
    pub sweep: bool,

    /// Print disbursements as JSON.
    #[arg(long)]
    pub json: bool,

    /// Human-readable log lines instead of JSON.
    #[arg(long)]
    pub pretty_logs: bool,
}
