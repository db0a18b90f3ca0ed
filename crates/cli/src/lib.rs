pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "signoff",
    about = "Work-order sign-off CLI",
    long_about = "Run hierarchical approval queries against an org chart: who may sign off \
                  which phase, along which management paths.",
    after_help = "Examples:\n  signoff demo\n  signoff approve --work-order \"Work order 1\" --phase \"Phase 2\" --approver nAgholor@company.com\n  signoff paths --employee jAbram@company.com"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Seed the demo org chart and replay the scripted approval sequence")]
    Demo,
    #[command(about = "Run one approval attempt against the org chart")]
    Approve {
        #[arg(long, help = "Work order name")]
        work_order: String,
        #[arg(long, help = "Phase name within the work order")]
        phase: String,
        #[arg(long, help = "Approver email")]
        approver: String,
        #[arg(long, help = "Org chart TOML file (demo fixtures when omitted)")]
        chart: Option<PathBuf>,
    },
    #[command(about = "Show all approval paths from an employee to the hierarchy root")]
    Paths {
        #[arg(long, help = "Employee email")]
        employee: String,
        #[arg(long, help = "Org chart TOML file (demo fixtures when omitted)")]
        chart: Option<PathBuf>,
    },
    #[command(about = "Validate an org chart: root discovery and employee reachability")]
    Check {
        #[arg(long, help = "Org chart TOML file (demo fixtures when omitted)")]
        chart: Option<PathBuf>,
    },
}

pub fn run() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Demo => commands::demo::run(),
        Command::Approve { work_order, phase, approver, chart } => {
            commands::approve::run(&work_order, &phase, &approver, chart.as_deref())
        }
        Command::Paths { employee, chart } => commands::paths::run(&employee, chart.as_deref()),
        Command::Check { chart } => commands::check::run(chart.as_deref()),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("SIGNOFF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_target(false).with_env_filter(filter).compact().try_init();
}
