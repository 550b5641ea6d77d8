use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Error};
use regex::Regex;
use termtree::Tree;
use tracing::{info, trace, Level};

pub fn scan_symbol_names(library: &str) -> Result<Vec<String>, Error> {
    let pattern = Regex::new(r"(?m)^DEF\s+(\S+)")?;
    Ok(captures(&pattern, library))
}

/// Module names from `(module NAME` s-expressions and legacy `Li NAME` records.
pub fn scan_footprint_names(footprint: &str) -> Result<Vec<String>, Error> {
    let module_pattern = Regex::new(r"\(module\s+([^\s()]+)")?;
    let legacy_pattern = Regex::new(r"(?m)^Li\s+(\S+)")?;

    let mut names = captures(&module_pattern, footprint);
    names.extend(captures(&legacy_pattern, footprint));

    Ok(names)
}

fn captures(pattern: &Regex, text: &str) -> Vec<String> {
    pattern.captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

fn file_tree(path: &Path, names: Vec<String>) -> Tree<String> {
    let mut node = Tree::new(path.display().to_string());
    for name in names {
        node.leaves.push(Tree::new(name));
    }
    node
}

#[tracing::instrument(level = Level::DEBUG)]
pub fn build_summary(library_paths: &[PathBuf], footprint_paths: &[PathBuf]) -> Result<Tree<String>, Error> {
    let mut symbols = Tree::new("Symbols".to_string());
    for path in library_paths {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Error reading symbol library. file: {}", path.display()))?;
        let names = scan_symbol_names(&content)?;
        trace!("Scanned symbol library. file: {}, names: {:?}", path.display(), names);
        symbols.leaves.push(file_tree(path, names));
    }

    let mut footprints = Tree::new("Footprints".to_string());
    for path in footprint_paths {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Error reading footprint. file: {}", path.display()))?;
        let names = scan_footprint_names(&content)?;
        trace!("Scanned footprint file. file: {}, names: {:?}", path.display(), names);
        footprints.leaves.push(file_tree(path, names));
    }

    let mut tree = Tree::new("Summary".to_string());
    tree.leaves.push(symbols);
    tree.leaves.push(footprints);

    Ok(tree)
}

pub fn write_summary(summary_path: &Path, summary: &Tree<String>) -> Result<(), Error> {
    fs::write(summary_path, summary.to_string())
        .with_context(|| format!("Error writing summary. file: {}", summary_path.display()))?;

    info!("Written summary. file: {}", summary_path.display());

    Ok(())
}
