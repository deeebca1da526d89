//! Locale resolution, routing and translation core for multi-locale
//! applications.
//!
//! The crate has two coupled halves. The resolution state machine
//! ([`resolve::Resolution`], driven through [`server::I18nServer`])
//! inspects a request's path, cookies and `Accept-Language` header and
//! either resolves a `(locale, region)` pair or directs the host to
//! redirect to the canonical localized URL. The translation engine
//! ([`translate::translate`]) resolves scoped and pluralized keys in a
//! locale's dictionary and interpolates parameters, preserving opaque
//! rich-content values as ordered nodes.
//!
//! Locale dictionaries are produced by caller-supplied [`loader::LocaleLoader`]s
//! and memoized per instance; the hosting framework is reached only
//! through the [`adapter::HostAdapter`] capability set.

use std::sync::Arc;

use tracing::warn;

pub mod accept;
pub mod adapter;
pub mod client;
pub mod config;
pub mod cookie;
pub mod error;
pub mod loader;
pub mod parser;
pub mod path;
pub mod plural;
pub mod region;
pub mod registry;
pub mod resolve;
pub mod server;
pub mod translate;


pub use adapter::HostAdapter;
pub use client::{I18nClient, LocaleChange};
pub use config::I18nConfig;
pub use cookie::SetCookie;
pub use error::{I18nError, I18nResult};
pub use loader::{Dictionary, FileLoader, LocaleLoader, StaticLoader};
pub use path::Dir;
pub use registry::LocaleRegistry;
pub use resolve::{RedirectDirective, RequestParts, ResolvedLocale, Resolution};
pub use server::I18nServer;
pub use translate::{Arg, ContentHandle, Node, Params, Rendered, Translator};

/// One configured i18n instance: registry, configuration and the
/// per-instance dictionary cache.
///
/// Instances are self-contained (no process-wide state), so multiple
/// configurations can coexist without cross-contamination.
pub struct I18n {
    config: I18nConfig,
    registry: LocaleRegistry,
    cache: registry::LocaleCache,
}

impl I18n {
    /// Build an instance, validating the configuration against the
    /// registered locales. Configuration errors are fatal at setup.
    pub fn new(registry: LocaleRegistry, config: I18nConfig) -> I18nResult<Self> {
        config.validate(&registry)?;
        Ok(I18n {
            config,
            registry,
            cache: registry::LocaleCache::new(),
        })
    }

    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    pub(crate) fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    pub fn supported_locales(&self) -> Vec<&str> {
        self.registry.supported_locales()
    }

    /// Server-side view: cookie-gated translation plus resolution.
    pub fn server(&self) -> I18nServer<'_> {
        I18nServer::new(self)
    }

    /// Client-side view bound to a host adapter.
    pub fn client<'a, A: HostAdapter>(&'a self, adapter: &'a A) -> I18nClient<'a, A> {
        I18nClient::new(self, adapter)
    }

    /// Locale-prefixed form of a path under this configuration.
    pub fn locale_path(&self, to: &str, locale: &str) -> String {
        path::build_locale_path(to, locale, &self.config)
    }

    /// Every locale-prefixed path to render statically for the routes.
    pub fn static_locale_paths(&self, routes: &[&str]) -> Vec<String> {
        path::generate_static_paths(routes, &self.supported_locales(), &self.config)
    }

    pub fn text_direction(&self, locale: &str) -> Dir {
        path::text_direction(locale)
    }

    /// Load (or reuse) the dictionary for a locale.
    pub async fn dictionary(&self, locale: &str) -> I18nResult<Arc<Dictionary>> {
        self.cache.load(&self.registry, locale).await
    }

    /// Debug-build check that every locale defines the same keys, to catch
    /// typos early. Missing keys are reported per locale via `warn!`;
    /// nothing is enforced.
    pub async fn check_locale_keys(&self) -> I18nResult<()> {
        if !cfg!(debug_assertions) {
            return Ok(());
        }

        let locales = self.supported_locales();
        let mut dictionaries = Vec::with_capacity(locales.len());
        for locale in &locales {
            dictionaries.push((*locale, self.dictionary(locale).await?));
        }

        let mut all_keys: Vec<&str> = dictionaries
            .iter()
            .flat_map(|(_, dictionary)| dictionary.keys())
            .collect();
        all_keys.sort_unstable();
        all_keys.dedup();

        for (locale, dictionary) in &dictionaries {
            let missing: Vec<&str> = all_keys
                .iter()
                .filter(|key| dictionary.get(key).is_none())
                .copied()
                .collect();
            if !missing.is_empty() {
                warn!(locale = %locale, keys = ?missing, "locale is missing translation keys");
            }
        }
        Ok(())
    }
}
