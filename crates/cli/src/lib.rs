pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::commands::equipment::EquipmentAction;

#[derive(Debug, Parser)]
#[command(
    name = "rigquote",
    about = "Rigquote operator CLI",
    long_about = "Create, edit, and render heavy-equipment quote snapshots.",
    after_help = "Examples:\n  rigquote new --output quote.json\n  rigquote equipment quote.json add --category forklifts \"Versalift 60/80\"\n  rigquote render quote.json --template scope"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Create an empty quote snapshot seeded from configured defaults")]
    New {
        #[arg(long, help = "Write the snapshot to this path instead of stdout")]
        output: Option<PathBuf>,
    },
    #[command(about = "Render quote documents from a snapshot")]
    Render {
        snapshot: PathBuf,
        #[arg(
            long,
            default_value = "all",
            help = "scope | customer-email | logistics-email | all"
        )]
        template: String,
    },
    #[command(about = "Edit equipment requirements through the rule engine")]
    Equipment {
        snapshot: PathBuf,
        #[command(subcommand)]
        action: EquipmentAction,
    },
    #[command(about = "Apply an extraction patch file over a snapshot")]
    Merge { snapshot: PathBuf, patch: PathBuf },
    #[command(about = "Report derived equipment, totals, and unfilled fields for a snapshot")]
    Inspect {
        snapshot: PathBuf,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Inspect effective configuration values")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::New { output } => commands::new::run(output.as_deref()),
        Command::Render { snapshot, template } => commands::render::run(&snapshot, &template),
        Command::Equipment { snapshot, action } => commands::equipment::run(&snapshot, action),
        Command::Merge { snapshot, patch } => commands::merge::run(&snapshot, &patch),
        Command::Inspect { snapshot, json } => commands::inspect::run(&snapshot, json),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
