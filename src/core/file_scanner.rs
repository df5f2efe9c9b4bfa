use std::path::{Component, Path, PathBuf};

use colored::Colorize;
use glob::Pattern;
use walkdir::WalkDir;

pub const TEMPLATE_SUFFIX: &str = ".blade.php";

/// Result of scanning the command-line paths.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Template files in discovery order: arguments in order, directories sorted.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Exclusion rules built from `excludedDirectories`.
///
/// - a plain name (`vendor`) matches any path component with that name
/// - a path (`resources/views/components`) matches that run of components
/// - a pattern with `*` or `?` is a glob over the whole path
#[derive(Debug, Default)]
pub struct Exclusions {
    names: Vec<String>,
    sequences: Vec<Vec<String>>,
    globs: Vec<Pattern>,
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn components(path: &Path) -> Vec<String> {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

impl Exclusions {
    pub fn new(patterns: &[String], verbose: bool) -> Self {
        let mut exclusions = Self::default();
        for p in patterns {
            if is_glob_pattern(p) {
                match Pattern::new(p) {
                    Ok(pattern) => exclusions.globs.push(pattern),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid exclude pattern '{}': {}",
                                "warning:".bold().yellow(),
                                p,
                                e
                            );
                        }
                    }
                }
            } else if p.contains('/') || p.contains(std::path::MAIN_SEPARATOR) {
                let parts = components(Path::new(p));
                if !parts.is_empty() {
                    exclusions.sequences.push(parts);
                }
            } else if !p.is_empty() {
                exclusions.names.push(p.clone());
            }
        }
        exclusions
    }

    /// A directory with this name is never descended into.
    fn excludes_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let parts = components(path);
        if parts.iter().any(|part| self.excludes_name(part)) {
            return true;
        }
        if self.sequences.iter().any(|seq| {
            parts.len() >= seq.len() && parts.windows(seq.len()).any(|w| w == seq.as_slice())
        }) {
            return true;
        }
        let path_str = path.to_string_lossy();
        self.globs.iter().any(|g| g.matches(&path_str))
    }
}

pub fn is_template_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(TEMPLATE_SUFFIX))
}

pub fn scan_templates(paths: &[PathBuf], excluded: &[String], verbose: bool) -> ScanResult {
    let exclusions = Exclusions::new(excluded, verbose);
    let mut result = ScanResult::default();

    for path in paths {
        if path.is_file() {
            if is_template_file(path) && !exclusions.is_excluded(path) {
                push_unique(&mut result.files, path.clone());
            } else if verbose {
                eprintln!(
                    "{} Skipping {} (not a Blade template or excluded)",
                    "warning:".bold().yellow(),
                    path.display()
                );
            }
            continue;
        }
        if !path.is_dir() {
            result.skipped_count += 1;
            eprintln!(
                "{} Path does not exist: {}",
                "warning:".bold().yellow(),
                path.display()
            );
            continue;
        }

        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !exclusions.excludes_name(&entry.file_name().to_string_lossy())
            });
        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let entry_path = entry.path();
            if entry.file_type().is_file()
                && is_template_file(entry_path)
                && !exclusions.is_excluded(entry_path)
            {
                push_unique(&mut result.files, entry_path.to_path_buf());
            }
        }
    }

    result
}

fn push_unique(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}
