use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::output;
use crate::record::{Record, RecordId};
use crate::store::TreeStore;
use crate::tree_traits::TreeNodeConvert;

pub fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Some(Commands::Tree { source_path }) => _tree(source_path),
        Some(Commands::All { source_path }) => _all(source_path),
        Some(Commands::Get { source_path, id }) => _get(source_path, id),
        Some(Commands::Children { source_path, id }) => _children(source_path, id),
        Some(Commands::Descendants { source_path, id }) => _descendants(source_path, id),
        Some(Commands::Parents { source_path, id }) => _parents(source_path, id),
        Some(Commands::Roots { source_path }) => _roots(source_path),
        None => Ok(()),
    }
}

/// Read a record collection from a JSON array file.
pub fn load_records(source_path: &Path) -> Result<Vec<Record>> {
    let file = File::open(source_path)
        .with_context(|| format!("Cannot open: {}", source_path.display()))?;
    let records: Vec<Record> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid record collection: {}", source_path.display()))?;
    debug!("loaded {} records from {}", records.len(), source_path.display());
    Ok(records)
}

/// Interpret a command-line id: integer when it parses, string otherwise.
pub fn parse_id(raw: &str) -> RecordId {
    raw.parse::<i64>()
        .map(RecordId::Int)
        .unwrap_or_else(|_| RecordId::Text(raw.to_string()))
}

fn load_store(source_path: &Path) -> Result<TreeStore> {
    Ok(TreeStore::new(load_records(source_path)?))
}

#[instrument]
fn _tree(source_path: &Path) -> Result<()> {
    let store = load_store(source_path)?;
    output::header(&format!(
        "{} records, {} roots, depth {}",
        store.len(),
        store.roots().len(),
        store.tree().depth()
    ));
    output::info(&store.to_tree_string());
    Ok(())
}

#[instrument]
fn _all(source_path: &Path) -> Result<()> {
    let store = load_store(source_path)?;
    output::info(&serde_json::to_string_pretty(store.get_all())?);
    Ok(())
}

#[instrument]
fn _get(source_path: &Path, id: &str) -> Result<()> {
    let store = load_store(source_path)?;
    let id = parse_id(id);
    let record = store
        .get_item(&id)
        .ok_or_else(|| anyhow!("no record with id: {}", id))?;
    output::info(&serde_json::to_string_pretty(record)?);
    Ok(())
}

#[instrument]
fn _children(source_path: &Path, id: &str) -> Result<()> {
    let store = load_store(source_path)?;
    let id = parse_id(id);
    let children = store
        .get_children(&id)
        .ok_or_else(|| anyhow!("no record with id: {}", id))?;
    if children.is_empty() {
        output::warning(&format!("record {} has no children", id));
        return Ok(());
    }
    for child in children {
        output::info(&serde_json::to_string(child)?);
    }
    Ok(())
}

#[instrument]
fn _descendants(source_path: &Path, id: &str) -> Result<()> {
    let store = load_store(source_path)?;
    let id = parse_id(id);
    for descendant in store.get_all_children(&id) {
        output::info(&serde_json::to_string(descendant)?);
    }
    Ok(())
}

#[instrument]
fn _parents(source_path: &Path, id: &str) -> Result<()> {
    let store = load_store(source_path)?;
    let id = parse_id(id);
    let chain = store.get_all_parents(&id);
    if chain.is_empty() {
        return Err(anyhow!("no record with id: {}", id));
    }
    output::info(&chain.iter().map(|r| r.id.to_string()).join(" <- "));
    Ok(())
}

#[instrument]
fn _roots(source_path: &Path) -> Result<()> {
    let store = load_store(source_path)?;
    for root in store.roots() {
        output::detail(&root.id);
    }
    Ok(())
}
