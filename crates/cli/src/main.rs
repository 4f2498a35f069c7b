use clap::Parser;

use cashpoint_cash::MachineConfig;
use cashpoint_observability::LogFormat;

mod args;
mod commands;

use args::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let format = if args.pretty_logs {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    };
    cashpoint_observability::init(format);

    let config = MachineConfig::from_env();
    tracing::debug!(?config, "machine configuration loaded");
    let (machine, account) = commands::setup(config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.sweep {
        return commands::sweep(&mut out, &machine, &account, args.json);
    }

    match (args.deposit, args.withdrawal) {
        (Some(deposit), Some(withdrawal)) => {
            commands::withdraw_once(&mut out, &machine, &account, deposit, withdrawal, args.json)
        }
        _ => anyhow::bail!("both --deposit and --withdrawal are required"),
    }
}
