use std::fs;
use std::path::Path;
use anyhow::{Context, Error};
use indexmap::IndexMap;
use tracing::{debug, Level};

pub const LIBRARIES_SECTION: &str = "eeschema/libraries";

/// Replaces the library list of a project file, keeping every other line as it is.
///
/// Lines before the first `[section]` are kept verbatim. The library section is rewritten in place
/// or appended when the project has none.
pub fn update_project(project: &str, library_names: &[String]) -> String {
    let mut preamble: Vec<&str> = vec![];
    let mut sections: IndexMap<&str, Vec<&str>> = IndexMap::new();
    let mut current: Option<&str> = None;

    for line in project.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            let name = &trimmed[1..trimmed.len() - 1];
            sections.entry(name).or_default();
            current = Some(name);
            continue
        }

        match current {
            Some(name) => sections.entry(name).or_default().push(line),
            None => preamble.push(line),
        }
    }

    let mut names: Vec<&String> = library_names.iter().collect();
    names.sort();
    let entries: Vec<String> = names.iter()
        .enumerate()
        .map(|(index, name)| format!("LibName{}={}", index + 1, name))
        .collect();

    debug!("Updating project libraries. libraries: {}, replacing: {}", entries.len(), sections.contains_key(LIBRARIES_SECTION));

    sections.entry(LIBRARIES_SECTION).or_default().clear();

    let mut lines: Vec<String> = preamble.iter().map(|line| line.to_string()).collect();
    for (name, section_lines) in sections.iter() {
        lines.push(format!("[{}]", name));
        if *name == LIBRARIES_SECTION {
            lines.extend(entries.iter().cloned());
        } else {
            lines.extend(section_lines.iter().map(|line| line.to_string()));
        }
    }

    lines.join("\n") + "\n"
}

/// Names of the `.lib` files in a directory, without extension, sorted.
#[tracing::instrument(level = Level::DEBUG)]
pub fn scan_library_names(library_path: &Path) -> Result<Vec<String>, Error> {
    let entries = fs::read_dir(library_path)
        .with_context(|| format!("Error reading library directory. path: {}", library_path.display()))?;

    let mut names: Vec<String> = vec![];
    for entry in entries {
        let path = entry
            .with_context(|| format!("Error reading library directory entry. path: {}", library_path.display()))?
            .path();

        if path.is_file() && path.extension().is_some_and(|extension| extension == "lib") {
            if let Some(stem) = path.file_stem() {
                names.push(stem.to_string_lossy().to_string());
            }
        }
    }
    names.sort();

    Ok(names)
}
