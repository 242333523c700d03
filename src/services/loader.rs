use crate::model::DesignFile;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

pub fn read_design_file(path: &Path) -> Result<DesignFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let file: DesignFile = if is_json(path) {
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
    } else {
        serde_yaml::from_str(&text).map_err(|e| {
            if let Some(loc) = e.location() {
                anyhow::anyhow!("{}:{}:{}: {}", path.display(), loc.line(), loc.column(), e)
            } else {
                anyhow::anyhow!("{}: {}", path.display(), e)
            }
        })?
    };
    Ok(file)
}

pub fn write_design_file(path: &Path, file: &DesignFile) -> Result<()> {
    let text = if is_json(path) {
        let mut s = serde_json::to_string_pretty(file).context("serializing design")?;
        s.push('\n');
        s
    } else {
        serde_yaml::to_string(file).context("serializing design")?
    };
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

// Async wrappers: run file I/O off-thread and report back over the channel
pub fn spawn_load_draft(path: PathBuf, tx: Sender<crate::ui::LoadMsg>) {
    thread::spawn(move || {
        let outcome: Result<crate::ui::LoadOutcome, String> = match read_design_file(&path) {
            Ok(file) => Ok(crate::ui::LoadOutcome::Draft(file)),
            Err(e) => Err(format!("{e:#}")),
        };
        let _ = tx.send(crate::ui::LoadMsg {
            kind: crate::ui::LoadKind::Draft,
            outcome,
        });
    });
}

pub fn spawn_save_draft(path: PathBuf, file: DesignFile, tx: Sender<crate::ui::LoadMsg>) {
    thread::spawn(move || {
        let outcome: Result<crate::ui::LoadOutcome, String> =
            match write_design_file(&path, &file) {
                Ok(()) => Ok(crate::ui::LoadOutcome::Saved),
                Err(e) => Err(format!("{e:#}")),
            };
        let _ = tx.send(crate::ui::LoadMsg {
            kind: crate::ui::LoadKind::Save,
            outcome,
        });
    });
}
