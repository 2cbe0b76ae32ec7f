//! Style-name parsing and the theme file writer.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use itertools::Itertools;
use thiserror::Error;

use crate::transform::TokenValue;

/// Category used when a style name carries no `/` separator.
pub const UNCATEGORIZED: &str = "uncategorized";

const THEME_FILE_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),

    #[error("theme file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize theme file: {0}")]
    Serialize(serde_json::Error),
}

/// Top-level area of the output tree a token lands in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SubArea {
    Colors,
    Fonts,
}

impl SubArea {
    pub fn dir_name(self) -> &'static str {
        match self {
            SubArea::Colors => "colors",
            SubArea::Fonts => "fonts",
        }
    }
}

/// The `(category, baseName, modifier)` triple addressing a token in the
/// output tree. Two styles producing the same triple overwrite each other.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleName {
    pub category: String,
    pub base_name: String,
    /// Hyphen-delimited trailing segments rejoined with `_`; empty when the
    /// leaf name has no modifier.
    pub modifier: String,
}

impl StyleName {
    /// Splits `category/baseName[-modifier...]` as the exporter always has:
    /// on `/` for the category, then the leaf on `-`.
    pub fn parse(name: &str) -> Self {
        let parts: Vec<&str> = name.split('/').collect();
        let category = if parts.len() > 1 {
            parts[0].to_string()
        } else {
            UNCATEGORIZED.to_string()
        };
        let leaf = parts.last().copied().unwrap_or_default();
        let mut segments = leaf.split('-');
        let base_name = segments.next().unwrap_or_default().to_string();
        let modifier = segments.join("_");
        Self {
            category,
            base_name,
            modifier,
        }
    }

    /// The key the token is stored under inside its theme file.
    pub fn key(&self) -> String {
        if self.modifier.is_empty() {
            sanitize_key(&self.base_name)
        } else {
            sanitize_key(&self.modifier)
        }
    }
}

/// Lowercases and maps every character outside `[a-z0-9]` to `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Maps every character outside `[a-zA-Z0-9]` to `-`, then lowercases.
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WriteOutcome {
    Created,
    Updated,
}

/// Writes tokens into the output tree, merging into whatever is already on
/// disk. Theme files are plain JSON maps; merging is parse-and-rewrite, and
/// the file is re-read on every call so styles sharing a file accumulate.
pub struct ThemeWriter {
    root: PathBuf,
}

impl ThemeWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sets `name.key()` to `value` in the theme file addressed by
    /// `(area, name)`, creating the file and its directories on first write.
    /// An existing value under the same key is overwritten unconditionally.
    pub fn write_token(
        &self,
        area: SubArea,
        name: &StyleName,
        value: TokenValue,
    ) -> Result<(WriteOutcome, PathBuf), WriteError> {
        let dir = self
            .root
            .join(area.dir_name())
            .join(sanitize_file_name(&name.category));
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!(
            "{}.{}",
            sanitize_file_name(&name.base_name),
            THEME_FILE_EXTENSION
        ));

        let (mut content, outcome) = match load_theme_file(&path)? {
            Some(content) => (content, WriteOutcome::Updated),
            None => (IndexMap::new(), WriteOutcome::Created),
        };
        content.insert(name.key(), value);

        let mut serialized =
            serde_json::to_string_pretty(&content).map_err(WriteError::Serialize)?;
        serialized.push('\n');
        fs::write(&path, serialized)?;
        Ok((outcome, path))
    }
}

fn load_theme_file(path: &Path) -> Result<Option<IndexMap<String, TokenValue>>, WriteError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    let content = serde_json::from_str(&data).map_err(|source| WriteError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(content))
}
