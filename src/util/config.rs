//! Override configuration for thinpom.
//!
//! Overrides are an ordered set of `key = value` pairs. They are read from,
//! in order:
//! - Global: `~/.thinpom/overrides.properties` - user-wide defaults
//! - Files passed with `--overrides` (`.toml` or properties)
//! - `--set key=value` arguments
//!
//! Later sources replace earlier values for the same key without moving
//! the key, so directives are applied in the order keys first appeared.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use toml_edit::{DocumentMut, Item, Table, Value};

/// Key whose presence enables the local `default` repository.
pub const THIN_ROOT: &str = "thin.root";

/// An ordered mapping of override keys to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    entries: Vec<(String, String)>,
}

impl Overrides {
    pub fn new() -> Self {
        Overrides::default()
    }

    /// Set a key. An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Iterate over entries in key order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another set of overrides into this one (other takes precedence).
    pub fn merge(&mut self, other: Overrides) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// Parse a single `key=value` argument.
    pub fn parse_assignment(arg: &str) -> Result<(String, String)> {
        match arg.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => bail!("invalid override `{}`, expected KEY=VALUE", arg),
        }
    }

    /// Load overrides from a file, choosing the format by extension.
    ///
    /// `.toml` files are read as TOML; anything else as Java properties.
    pub fn load(path: &Path) -> Result<Self> {
        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        if is_toml {
            Self::load_toml(path)
        } else {
            Self::load_properties(path)
        }
    }

    /// Load overrides from a properties file.
    pub fn load_properties(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read overrides: {}", path.display()))?;
        Ok(Self::from_properties_str(&contents))
    }

    /// Load overrides from a TOML file.
    pub fn load_toml(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read overrides: {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse overrides: {}", path.display()))
    }

    /// Parse Java-style properties text.
    ///
    /// Supports `key=value`, `key: value` and `key value` separators, `#` and
    /// `!` comment lines, backslash escapes and trailing-backslash line
    /// continuation.
    pub fn from_properties_str(contents: &str) -> Self {
        let mut overrides = Overrides::new();
        for line in logical_lines(contents) {
            let (key, value) = split_property(&line);
            overrides.insert(key, value);
        }
        overrides
    }

    /// Parse TOML text, flattening tables into dotted keys.
    ///
    /// `[boms] spring = "g:a:1.0"` becomes `boms.spring = g:a:1.0`. Document
    /// order is kept.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let doc: DocumentMut = contents.parse().context("invalid TOML")?;
        let mut overrides = Overrides::new();
        flatten_table(doc.as_table(), "", &mut overrides);
        Ok(overrides)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Overrides::new();
        overrides.extend(iter);
        overrides
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Overrides {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Join physical lines into logical ones, dropping blanks and comments.
fn logical_lines(contents: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for raw in contents.lines() {
        let line = raw.trim_start();

        if !continuing && (line.is_empty() || line.starts_with('#') || line.starts_with('!')) {
            continue;
        }

        // An odd number of trailing backslashes continues the line.
        let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
        if trailing % 2 == 1 {
            current.push_str(&line[..line.len() - 1]);
            continuing = true;
        } else {
            current.push_str(line);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }

    if continuing {
        lines.push(current);
    }

    lines
}

fn split_property(line: &str) -> (String, String) {
    let mut chars = line.chars().peekable();
    let mut key = String::new();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    push_escaped(&mut key, escaped, &mut chars);
                }
            }
            '=' | ':' => break,
            c if c.is_whitespace() => {
                while chars.peek().is_some_and(|c| c.is_whitespace()) {
                    chars.next();
                }
                if matches!(chars.peek(), Some('=') | Some(':')) {
                    chars.next();
                }
                break;
            }
            c => key.push(c),
        }
    }

    while chars.peek().is_some_and(|c| c.is_whitespace()) {
        chars.next();
    }

    // Trailing whitespace is trimmed only after the last escape, so `\ `
    // survives.
    let mut value = String::new();
    let mut escaped_end = 0;
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                push_escaped(&mut value, escaped, &mut chars);
                escaped_end = value.len();
            }
        } else {
            value.push(c);
        }
    }

    let tail = value[escaped_end..].trim_end().len();
    value.truncate(escaped_end + tail);
    (key, value)
}

fn push_escaped(
    out: &mut String,
    escaped: char,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) {
    match escaped {
        't' => out.push('\t'),
        'n' => out.push('\n'),
        'r' => out.push('\r'),
        'f' => out.push('\u{000C}'),
        'u' => {
            let hex: String = chars.by_ref().take(4).collect();
            match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                Some(c) => out.push(c),
                None => {
                    out.push('u');
                    out.push_str(&hex);
                }
            }
        }
        other => out.push(other),
    }
}

fn flatten_table(table: &Table, prefix: &str, out: &mut Overrides) {
    for (key, item) in table.iter() {
        let full_key = join_key(prefix, key);
        match item {
            Item::Value(Value::InlineTable(inline)) => {
                for (inner_key, value) in inline.iter() {
                    flatten_value(value, &join_key(&full_key, inner_key), out);
                }
            }
            Item::Value(value) => flatten_value(value, &full_key, out),
            Item::Table(inner) => flatten_table(inner, &full_key, out),
            Item::ArrayOfTables(_) | Item::None => {
                tracing::warn!("ignoring unsupported override `{}`", full_key);
            }
        }
    }
}

fn flatten_value(value: &Value, key: &str, out: &mut Overrides) {
    match value {
        Value::String(s) => out.insert(key, s.value().as_str()),
        Value::Integer(i) => out.insert(key, i.value().to_string()),
        Value::Float(f) => out.insert(key, f.value().to_string()),
        Value::Boolean(b) => out.insert(key, b.value().to_string()),
        Value::Datetime(d) => out.insert(key, d.value().to_string()),
        Value::InlineTable(inline) => {
            for (inner_key, inner) in inline.iter() {
                flatten_value(inner, &join_key(key, inner_key), out);
            }
        }
        Value::Array(_) => {
            tracing::warn!("ignoring array override `{}`", key);
        }
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Get the global thinpom config directory (~/.thinpom).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".thinpom"))
}

/// Get the global overrides path (~/.thinpom/overrides.properties).
pub fn global_overrides_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("overrides.properties"))
}

/// Load overrides with fallback to empty if the file doesn't exist or
/// cannot be read.
pub fn load_or_default(path: &Path) -> Overrides {
    if path.exists() {
        Overrides::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load overrides from {}: {:#}", path.display(), e);
            Overrides::default()
        })
    } else {
        Overrides::default()
    }
}

/// Load the merged overrides for one invocation.
///
/// Order of precedence (highest to lowest):
/// 1. `assignments` (`--set key=value`)
/// 2. `files`, later files first
/// 3. The global overrides file, when `global` is given
pub fn load_overrides(
    global: Option<&Path>,
    files: &[PathBuf],
    assignments: &[String],
) -> Result<Overrides> {
    let mut overrides = Overrides::new();

    if let Some(global) = global {
        overrides.merge(load_or_default(global));
    }

    for file in files {
        overrides.merge(Overrides::load(file)?);
    }

    for assignment in assignments {
        let (key, value) = Overrides::parse_assignment(assignment)?;
        overrides.insert(key, value);
    }

    Ok(overrides)
}
