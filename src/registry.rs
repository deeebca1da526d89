use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{I18nError, I18nResult};
use crate::loader::{Dictionary, LocaleLoader};

/// Registered locales and their deferred dictionary loaders, in locale id
/// order.
#[derive(Default)]
pub struct LocaleRegistry {
    loaders: BTreeMap<String, Arc<dyn LocaleLoader>>,
}

impl LocaleRegistry {
    pub fn new() -> Self {
        LocaleRegistry::default()
    }

    pub fn with_loader(mut self, locale: &str, loader: impl LocaleLoader + 'static) -> Self {
        self.loaders.insert(locale.to_owned(), Arc::new(loader));
        self
    }

    pub fn with_shared_loader(mut self, locale: &str, loader: Arc<dyn LocaleLoader>) -> Self {
        self.loaders.insert(locale.to_owned(), loader);
        self
    }

    pub fn is_supported(&self, locale: &str) -> bool {
        self.loaders.contains_key(locale)
    }

    pub fn supported_locales(&self) -> Vec<&str> {
        self.loaders.keys().map(String::as_str).collect()
    }

    fn loader(&self, locale: &str) -> Option<&Arc<dyn LocaleLoader>> {
        self.loaders.get(locale)
    }
}

type DictionaryCell = Arc<OnceCell<Arc<Dictionary>>>;

/// Memoized locale dictionaries for one i18n instance.
///
/// Each locale gets a lazily created cell; `get_or_try_init` on that cell
/// makes concurrent callers for a not-yet-loaded locale await the same
/// in-flight load instead of starting their own. Entries are only added,
/// never evicted.
#[derive(Default)]
pub struct LocaleCache {
    cells: Mutex<HashMap<String, DictionaryCell>>,
}

impl LocaleCache {
    pub fn new() -> Self {
        LocaleCache::default()
    }

    /// Dictionary for `locale` if it has already been loaded.
    pub fn cached(&self, locale: &str) -> Option<Arc<Dictionary>> {
        let cells = self.cells.lock().unwrap_or_else(|e| e.into_inner());
        cells.get(locale).and_then(|cell| cell.get().cloned())
    }

    /// Load `locale`'s dictionary, reusing the cached result or an
    /// in-flight load when one exists.
    ///
    /// A failed load caches nothing; there is no retry or timeout policy
    /// here, a stalled loader stalls its callers.
    pub async fn load(
        &self,
        registry: &LocaleRegistry,
        locale: &str,
    ) -> I18nResult<Arc<Dictionary>> {
        let loader = registry
            .loader(locale)
            .ok_or_else(|| I18nError::UnknownLocale(locale.to_owned()))?
            .clone();

        let cell = {
            let mut cells = self.cells.lock().unwrap_or_else(|e| e.into_inner());
            cells.entry(locale.to_owned()).or_default().clone()
        };

        cell.get_or_try_init(|| async {
            debug!(locale, "loading locale dictionary");
            loader
                .load()
                .await
                .map(Arc::new)
                .map_err(|message| I18nError::Load {
                    locale: locale.to_owned(),
                    message,
                })
        })
        .await
        .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StaticLoader;

    fn registry_with(loader: Arc<dyn LocaleLoader>) -> LocaleRegistry {
        LocaleRegistry::new()
            .with_shared_loader("en", loader)
            .with_loader("es", StaticLoader::from_pairs(&[("greeting", "Hola")]))
    }

    #[test]
    fn test_supported_locales_are_ordered() {
        let registry = LocaleRegistry::new()
            .with_loader("es", StaticLoader::default())
            .with_loader("en", StaticLoader::default());
        assert_eq!(registry.supported_locales(), vec!["en", "es"]);
        assert!(registry.is_supported("en"));
        assert!(!registry.is_supported("fr"));
    }

    #[tokio::test]
    async fn test_load_caches_dictionary() {
        let loader = Arc::new(StaticLoader::from_pairs(&[("greeting", "Hello")]));
        let registry = registry_with(loader.clone());
        let cache = LocaleCache::new();

        assert!(cache.cached("en").is_none());
        let first = cache.load(&registry, "en").await.unwrap();
        let second = cache.load(&registry, "en").await.unwrap();
        assert_eq!(first.get("greeting"), Some("Hello"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(loader.calls(), 1);
        assert!(cache.cached("en").is_some());
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_one_invocation() {
        let loader = Arc::new(
            StaticLoader::from_pairs(&[("greeting", "Hello")]).with_delay_ms(20),
        );
        let registry = registry_with(loader.clone());
        let cache = LocaleCache::new();

        let (a, b, c) = tokio::join!(
            cache.load(&registry, "en"),
            cache.load(&registry, "en"),
            cache.load(&registry, "en"),
        );
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(loader.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_locale() {
        let registry = registry_with(Arc::new(StaticLoader::default()));
        let cache = LocaleCache::new();
        assert_eq!(
            cache.load(&registry, "fr").await.unwrap_err(),
            I18nError::UnknownLocale("fr".to_owned())
        );
    }

    #[tokio::test]
    async fn test_failed_load_is_not_cached() {
        let registry = LocaleRegistry::new().with_loader("en", StaticLoader::failing("boom"));
        let cache = LocaleCache::new();
        let err = cache.load(&registry, "en").await.unwrap_err();
        assert_eq!(
            err,
            I18nError::Load {
                locale: "en".to_owned(),
                message: "boom".to_owned(),
            }
        );
        assert!(cache.cached("en").is_none());
    }
}
