use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use uuid::Uuid;

mod brief;
mod cli;
mod config;
mod errors;
mod export;
mod log;
mod pipeline;
mod plan;
mod prompt;
mod provider;
mod recover;
mod store;
mod template;
mod ux;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let args = cli::Args::parse();

    let mut cfg = match &args.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::default(),
    };
    cfg.overlay(&args);

    let store = store::TemplateStore::open(&cfg.store_dir);
    store.init()?;

    match args.command {
        cli::Command::Generate { brief, out, html } => {
            let brief = brief::Brief::load(&brief)?;
            let planner = planner(store, &cfg);
            if planner.offline() {
                ux::notice("OPENAI_API_KEY is not set; using the built-in example plan");
            }

            let sp = ux::spinner("Generating event plan...");
            let outcome = planner.generate(&brief, args.debug).await;
            sp.finish_and_clear();

            present("generate", outcome?, &cfg, args.debug, out, html)?;
        }

        cli::Command::Refine { plan, feedback, brief, out, html } => {
            let previous = load_plan(&plan)?;
            let brief = match brief {
                Some(path) => Some(brief::Brief::load(&path)?),
                None => None,
            };
            if brief.is_none() {
                ux::notice("no brief supplied; original input conditions render as \"(not provided)\"");
            }
            let planner = planner(store, &cfg);
            if planner.offline() {
                ux::notice("OPENAI_API_KEY is not set; using the built-in example refinement");
            }

            let sp = ux::spinner("Refining event plan...");
            let outcome = planner
                .refine(&previous, &feedback, brief.as_ref(), args.debug)
                .await;
            sp.finish_and_clear();

            present("refine", outcome?, &cfg, args.debug, out, html)?;
        }

        cli::Command::Export { plan, html } => {
            let plan = load_plan(&plan)?;
            export::write_html(&html, &plan)?;
            println!("wrote {}", html.display());
        }

        cli::Command::Template { cmd } => template_cmd(&store, cmd)?,
    }

    Ok(())
}

fn planner(store: store::TemplateStore, cfg: &config::Config) -> pipeline::Planner {
    let provider = provider::make_provider(cfg.model.clone(), cfg.timeout_secs);
    pipeline::Planner::new(store, provider, cfg.clone())
}

fn load_plan(path: &Path) -> anyhow::Result<plan::EventPlan> {
    let text = fs_err::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn present(
    stage: &str,
    outcome: pipeline::Outcome,
    cfg: &config::Config,
    debug: bool,
    out: Option<PathBuf>,
    html: Option<PathBuf>,
) -> anyhow::Result<()> {
    if outcome.recovery.is_fallback() {
        ux::notice("the model response could not be parsed; showing the placeholder plan");
    }
    ux::show_plan(outcome.plan());

    // Diagnostic artifacts must never fail the action that produced a plan.
    let tx = Uuid::new_v4();
    match log::save_stage(
        stage,
        &outcome.request,
        &outcome.raw,
        &outcome.recovery,
        outcome.plan(),
        tx,
        cfg,
    ) {
        Ok(saved) => {
            if debug {
                log::print_saved_paths(stage, &saved);
            }
        }
        Err(e) => ux::notice(&format!("could not save transaction artifacts: {e:#}")),
    }

    if let Some(path) = out {
        export::write_json(&path, outcome.plan())?;
        println!("wrote {}", path.display());
    }
    if let Some(path) = html {
        export::write_html(&path, outcome.plan())?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn template_cmd(store: &store::TemplateStore, cmd: cli::TemplateCmd) -> anyhow::Result<()> {
    match cmd {
        cli::TemplateCmd::Show { slot } => {
            println!("{}", store.get(slot)?);
        }

        cli::TemplateCmd::Save { slot, file } => {
            let content = fs_err::read_to_string(&file)?;
            // Saving over the system instruction archives the old value first.
            if slot == cli::Slot::SystemInstruction {
                let previous = store.get(slot)?;
                if previous != content {
                    if let Err(e) = store.record_history(&previous, "manual edit") {
                        ux::notice(&format!("history not updated: {e}"));
                    }
                }
            }
            store.save(slot, &content)?;
            println!("saved {} template", slot.label());
        }

        cli::TemplateCmd::Reset { slot, yes } => {
            let prompt = format!("Reset the {} template to its built-in default?", slot.label());
            if !yes && !ux::confirm(&prompt) {
                println!("Aborted by user.");
                return Ok(());
            }
            if slot == cli::Slot::SystemInstruction {
                let previous = store.get(slot)?;
                if previous != slot.default_content() {
                    if let Err(e) = store.record_history(&previous, "pre-reset") {
                        ux::notice(&format!("history not updated: {e}"));
                    }
                }
            }
            store.reset(slot)?;
            println!("reset {} template", slot.label());
        }

        cli::TemplateCmd::History => {
            let history = store.list_history()?;
            if history.is_empty() {
                println!("(no history)");
            }
            for rec in history {
                let first_line = rec.content.lines().next().unwrap_or("");
                let preview: String = first_line.chars().take(60).collect();
                println!(
                    "{}  {}  {}\n    {}",
                    rec.id.bold(),
                    rec.saved_at.format("%Y-%m-%d %H:%M:%S"),
                    rec.note,
                    preview
                );
            }
        }

        cli::TemplateCmd::Forget { id } => {
            store.delete_history(&id)?;
            println!("deleted history entry {id} (if it existed)");
        }

        cli::TemplateCmd::Upgrade { yes } => {
            let prompt = "Push customized templates to history and restore all defaults?";
            if !yes && !ux::confirm(prompt) {
                println!("Aborted by user.");
                return Ok(());
            }
            store.force_upgrade()?;
            println!("all templates restored to built-in defaults");
        }
    }
    Ok(())
}
