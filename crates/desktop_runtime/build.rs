use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
struct WorkspaceManifest {
    schema_version: u32,
    workspace: Vec<WorkspaceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceEntry {
    name: String,
    label: String,
    kinds: Vec<String>,
}

fn is_dotted_kind(raw: &str) -> bool {
    let parts: Vec<&str> = raw.split('.').collect();
    parts.len() >= 2
        && parts.iter().all(|part| {
            part.chars().next().is_some_and(|c| c.is_ascii_lowercase())
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        })
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("workspaces.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: WorkspaceManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    if manifest.schema_version != 1 {
        panic!(
            "workspace manifest schema mismatch in {}: expected 1 found {}",
            path.display(),
            manifest.schema_version
        );
    }

    let mut names = BTreeSet::new();
    for entry in &manifest.workspace {
        if !names.insert(entry.name.clone()) {
            panic!("duplicate workspace name `{}`", entry.name);
        }
        if entry.kinds.is_empty() {
            panic!("workspace `{}` lists no content kinds", entry.name);
        }
        if let Some(bad) = entry.kinds.iter().find(|kind| !is_dotted_kind(kind)) {
            panic!("workspace `{}` has invalid content kind `{bad}`", entry.name);
        }
    }

    let json = serde_json::to_string_pretty(&manifest.workspace)
        .expect("serialize workspace catalog");
    let generated = format!(
        "/// Build-time generated workspace catalog JSON.\n\
pub const WORKSPACE_CATALOG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("workspace_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
