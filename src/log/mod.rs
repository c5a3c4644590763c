//! Per-transaction diagnostic artifacts, saved under `<store>/tx/<uuid>/`:
//! the rendered request, the raw model text, and the recovered plan.

use fs_err as fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::config::Config;
use crate::plan::EventPlan;
use crate::provider::ChatRequest;
use crate::recover::Recovery;

pub struct SavedPaths {
    pub dir: PathBuf,
    pub request: Option<PathBuf>,
    pub response: Option<PathBuf>,
    pub recovered: PathBuf,
}

fn tx_dir(root: &Path, tx: Uuid) -> PathBuf {
    root.join("tx").join(tx.to_string())
}

pub fn save_stage(
    stage: &str,
    request: &ChatRequest,
    raw: &str,
    recovery: &Recovery,
    plan: &EventPlan,
    tx: Uuid,
    cfg: &Config,
) -> anyhow::Result<SavedPaths> {
    let dir = tx_dir(Path::new(&cfg.store_dir), tx);
    fs::create_dir_all(&dir)?;

    let mut request_path = None;
    let mut response_path = None;

    if cfg.save_request {
        let p = dir.join(format!("{stage}.request.txt"));
        fs::write(
            &p,
            format!(
                "=== system ===\n{}\n\n=== user ===\n{}\n",
                request.instruction, request.user_message
            ),
        )?;
        request_path = Some(p);
    }

    if cfg.save_response {
        let p = dir.join(format!("{stage}.response.txt"));
        fs::write(&p, raw)?;
        response_path = Some(p);
    }

    // Always keep the recovered document, tagged with how it was obtained.
    let recovered = dir.join(format!("{stage}.recovered.{}.json", recovery.label()));
    fs::write(&recovered, serde_json::to_string_pretty(plan)?)?;

    Ok(SavedPaths { dir, request: request_path, response: response_path, recovered })
}

pub fn print_saved_paths(stage: &str, saved: &SavedPaths) {
    println!("debug[{stage}]: artifacts directory: {}", saved.dir.display());
    if let Some(p) = &saved.request {
        println!("debug[{stage}]: request saved at: {}", p.display());
    } else {
        println!("debug[{stage}]: request not saved (flag off)");
    }
    if let Some(p) = &saved.response {
        println!("debug[{stage}]: response saved at: {}", p.display());
    } else {
        println!("debug[{stage}]: response not saved (flag off)");
    }
    println!("debug[{stage}]: recovered plan at: {}", saved.recovered.display());
    std::io::stdout().flush().ok();
}
