use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// A locale's translation dictionary: flat mapping from translation key to
/// template string.
///
/// Keys may be flat (`"greeting"`), scoped with dot-separated prefixes
/// (`"scope.greeting"`), and/or pluralized with a suffix marker
/// (`"item#one"`). A plural-suffixed key is expected to have a sibling
/// `#other` form as fallback.
///
/// The set of pluralizable base keys (every key containing `#`, with the
/// suffix stripped and any scope prefix intact) is derived here, at
/// construction, so the translation engine never recomputes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, String>,
    plural_bases: HashSet<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Dictionary::default()
    }

    pub fn from_map(entries: HashMap<String, String>) -> Self {
        let plural_bases = entries
            .keys()
            .filter(|key| key.contains('#'))
            .filter_map(|key| key.split('#').next())
            .map(str::to_owned)
            .collect();
        Dictionary { entries, plural_bases }
    }

    pub fn with_message(&mut self, key: &str, template: &str) -> &mut Self {
        if let Some(base) = key.split_once('#').map(|(base, _)| base) {
            self.plural_bases.insert(base.to_owned());
        }
        self.entries.insert(key.to_owned(), template.to_owned());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn is_plural_base(&self, key: &str) -> bool {
        self.plural_bases.contains(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Deferred producer of a locale's [`Dictionary`].
///
/// The cache guarantees each loader runs at most once per locale per
/// instance; implementations need no memoization of their own.
#[async_trait]
pub trait LocaleLoader: Send + Sync {
    async fn load(&self) -> Result<Dictionary, String>;
}

/// In-memory loader, primarily for tests and statically bundled locales.
///
/// Counts invocations and can simulate load latency or failure, so tests
/// can observe the at-most-one-load invariant of the cache.
#[derive(Debug, Default)]
pub struct StaticLoader {
    entries: HashMap<String, String>,
    failure: Option<String>,
    delay_ms: u64,
    calls: AtomicUsize,
}

impl StaticLoader {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        StaticLoader {
            entries: pairs
                .iter()
                .map(|(key, template)| (key.to_string(), template.to_string()))
                .collect(),
            ..StaticLoader::default()
        }
    }

    /// Loader that always fails with the given message
    pub fn failing(message: &str) -> Self {
        StaticLoader {
            failure: Some(message.to_owned()),
            ..StaticLoader::default()
        }
    }

    /// Simulated load latency, to hold a load in flight during tests
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Number of times `load` has been invoked
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocaleLoader for StaticLoader {
    async fn load(&self) -> Result<Dictionary, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.delay_ms > 0 {
            tokio::time::sleep(std::time::Duration::from_millis(self.delay_ms)).await;
        }
        match &self.failure {
            Some(message) => Err(message.clone()),
            None => Ok(Dictionary::from_map(self.entries.clone())),
        }
    }
}

/// Loader reading a dictionary from a JSON file.
///
/// The file is a flat object of string templates. Keys starting with `@`
/// (metadata) are skipped; non-string values are skipped with a warning.
#[derive(Debug, Clone)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileLoader { path: path.into() }
    }
}

#[async_trait]
impl LocaleLoader for FileLoader {
    async fn load(&self) -> Result<Dictionary, String> {
        load_dictionary_from_file(&self.path)
    }
}

pub fn load_dictionary_from_file(path: &Path) -> Result<Dictionary, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))?;

    let json: Value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse JSON from '{}': {}", path.display(), e))?;

    let obj = json.as_object().ok_or_else(|| {
        format!(
            "Invalid JSON in '{}': root must be an object",
            path.display()
        )
    })?;

    let mut dictionary = Dictionary::new();
    for (key, value) in obj {
        if key.starts_with('@') {
            continue;
        }
        if let Some(template) = value.as_str() {
            dictionary.with_message(key, template);
        } else {
            warn!(%key, file = %path.display(), "dictionary entry is not a string, skipping");
        }
    }
    Ok(dictionary)
}
