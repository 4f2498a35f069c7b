use std::io::Write;

use anyhow::{Context, bail};

use cashpoint_account::Account;
use cashpoint_cash::{CashMachine, Disbursement, MachineConfig};
use cashpoint_core::{AccountId, MachineId, Money};

pub const MACHINE_ID: &str = "cashmachine-001";
pub const ACCOUNT_ID: &str = "01001";

/// Balance deposited before a sweep.
pub const SWEEP_DEPOSIT: &str = "1009838.59";

/// Opening stock of every machine the CLI builds.
pub const OPENING_STOCK: [(u32, u32); 4] = [(5, 3000), (10, 1000), (20, 2000), (50, 1000)];

/// Build the stocked machine and an empty account.
pub fn setup(config: MachineConfig) -> anyhow::Result<(CashMachine, Account)> {
    let machine = CashMachine::with_config(MachineId::new(MACHINE_ID)?, config);
    for (denomination, count) in OPENING_STOCK {
        if !machine.config().accepts(denomination) {
            tracing::warn!(denomination, "opening stock skipped; denomination not configured");
            continue;
        }
        machine.add_notes(denomination, count)?;
    }
    let account = Account::new(AccountId::new(ACCOUNT_ID)?);
    Ok((machine, account))
}

/// Deposit, withdraw once, and report the state before and after.
pub fn withdraw_once(
    out: &mut impl Write,
    machine: &CashMachine,
    account: &Account,
    deposit: Money,
    amount: u32,
    json: bool,
) -> anyhow::Result<()> {
    account.deposit(deposit)?;

    writeln!(out, "{machine}")?;
    writeln!(out, "Withdraw {amount}")?;

    let plan = machine
        .withdraw(account, amount)
        .with_context(|| format!("withdrawal of {amount} failed"))?;

    writeln!(out, "Disburse: {}", render(&plan, json)?)?;
    writeln!(out, "After withdraw")?;
    writeln!(out, "{account}")?;
    writeln!(out, "{machine}")?;
    writeln!(out, "Balance: {}", machine.format_balance(account))?;
    Ok(())
}

/// Withdraw every allowed amount in turn, failing on the first plan whose
/// value does not match its amount.
pub fn sweep(
    out: &mut impl Write,
    machine: &CashMachine,
    account: &Account,
    json: bool,
) -> anyhow::Result<()> {
    account.deposit(SWEEP_DEPOSIT.parse()?)?;

    let config = machine.config();
    let smallest = config.smallest_denomination();
    // First multiple of the smallest note at or above the minimum.
    let amounts = config
        .min_withdrawal()
        .div_ceil(smallest)
        .checked_mul(smallest)
        .into_iter()
        .flat_map(|start| (start..=config.max_withdrawal()).step_by(smallest as usize));
    for amount in amounts {
        let plan = machine
            .withdraw(account, amount)
            .with_context(|| format!("sweep stopped at {amount}"))?;
        writeln!(out, "withdrawal {amount} -- disburse {}", render(&plan, json)?)?;
        if plan.total() != u64::from(amount) {
            bail!("{amount} is wrong: disbursed {}", plan.total());
        }
    }

    writeln!(out, "Balance: {}", machine.format_balance(account))?;
    Ok(())
}

fn render(plan: &Disbursement, json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string(plan)?)
    } else {
        Ok(plan.to_string())
    }
}
