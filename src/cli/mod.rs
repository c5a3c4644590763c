use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slot {
    #[value(alias = "system")]
    SystemInstruction,
    #[value(alias = "user")]
    UserInput,
    Feedback,
}

#[derive(Parser, Debug)]
#[command(name="eventcraft", version, about="Generates and refines Instagram event plans through an LLM, with editable prompt templates")]
pub struct Args {
    /// Directory holding templates, history and transaction artifacts
    /// [default: .eventcraft]
    #[arg(long)]
    pub store_dir: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Save the rendered request under the transaction directory [default: true]
    #[arg(long)]
    pub save_request: Option<bool>,

    /// Save the raw model response under the transaction directory [default: true]
    #[arg(long)]
    pub save_response: Option<bool>,

    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Optional TOML config overriding the built-in defaults
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate an event plan from a campaign brief (TOML or JSON)
    Generate {
        brief: PathBuf,

        /// Write the recovered plan as pretty JSON
        #[arg(long)]
        out: Option<PathBuf>,

        /// Write the plan as a self-contained HTML document
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Refine a previously generated plan with free-text feedback
    Refine {
        /// Plan JSON produced by an earlier `generate`
        plan: PathBuf,

        #[arg(long)]
        feedback: String,

        /// Original brief; placeholders render as "(not provided)" without it
        #[arg(long)]
        brief: Option<PathBuf>,

        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Export a saved plan as a self-contained HTML document
    Export {
        plan: PathBuf,

        #[arg(long)]
        html: PathBuf,
    },

    /// Inspect and edit the prompt templates
    Template {
        #[command(subcommand)]
        cmd: TemplateCmd,
    },
}

#[derive(Subcommand, Debug)]
pub enum TemplateCmd {
    /// Print the active template for a slot
    Show { slot: Slot },

    /// Overwrite a slot with the contents of a file
    Save { slot: Slot, file: PathBuf },

    /// Restore a slot to its built-in default
    Reset {
        slot: Slot,

        #[arg(long, default_value_t = false)]
        yes: bool,
    },

    /// List the system-instruction history, most recent first
    History,

    /// Delete one history entry by id
    Forget { id: String },

    /// Push customized slots to history and restore all built-in defaults
    Upgrade {
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}
