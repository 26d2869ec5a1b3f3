//! Per-entry ignore and include decisions.
//!
//! Patterns are matched against an entry's base name only. A pattern without
//! `*` or `?` is compared for exact equality; a pattern with either wildcard is
//! compiled as a whole-name glob in which every other character is literal.

use crate::config::ProjectConfig;
use crate::error::{AppError, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct Matcher {
    literals: HashSet<String>,
    globs: GlobSet,
    extensions: HashSet<String>,
}

impl Matcher {
    pub fn new(ignored_patterns: &[String], included_extensions: &[String]) -> Result<Self> {
        let mut literals = HashSet::new();
        let mut builder = GlobSetBuilder::new();

        for pattern in ignored_patterns {
            if is_wildcard(pattern) {
                let glob = GlobBuilder::new(&wildcard_only(pattern))
                    .literal_separator(false)
                    .backslash_escape(true)
                    .build()
                    .map_err(|e| {
                        log::error!("Invalid ignore pattern \"{}\": {}", pattern, e);
                        AppError::Glob(format!("Invalid ignore pattern \"{}\": {}", pattern, e))
                    })?;
                log::trace!("Adding glob ignore pattern: {}", pattern);
                builder.add(glob);
            } else {
                literals.insert(pattern.clone());
            }
        }

        Ok(Self {
            literals,
            globs: builder.build()?,
            extensions: included_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
        })
    }

    pub fn from_config(config: &ProjectConfig) -> Result<Self> {
        Self::new(&config.ignored_patterns, &config.included_extensions)
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.literals.contains(name) || self.globs.is_match(name)
    }

    pub fn is_included(&self, name: &str) -> bool {
        match extension_of(name) {
            Some(ext) => self.extensions.contains(&ext),
            None => false,
        }
    }
}

fn is_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

/// Escapes glob syntax other than `*` and `?`, folding runs of `*` into one.
fn wildcard_only(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '*' if escaped.ends_with('*') => {}
            '{' | '}' | '[' | ']' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Lower-cased text after the last `.` in `name`, if that text is non-empty.
pub fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}
