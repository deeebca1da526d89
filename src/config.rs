use std::collections::HashMap;

use crate::error::{I18nError, I18nResult};
use crate::registry::LocaleRegistry;

/// Default cookie and route-parameter name for the locale segment.
pub const PARAM_NAME: &str = "locale";

/// Configuration for an [`crate::I18n`] instance.
///
/// `default_locale` and `fallback_locale` must be registered locales, and
/// `regions` must carry a non-empty region list for every registered locale.
/// Both invariants are checked once, at instance construction.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct I18nConfig {
    pub default_locale: String,
    pub fallback_locale: String,
    /// Ordered region codes per locale; the first entry is canonical.
    #[serde(default)]
    pub regions: HashMap<String, Vec<String>>,
    #[serde(default = "default_prefix_default_locale")]
    pub prefix_default_locale: bool,
    #[serde(default = "default_param_name")]
    pub param_name: String,
}

fn default_prefix_default_locale() -> bool {
    true
}

fn default_param_name() -> String {
    PARAM_NAME.to_owned()
}

impl I18nConfig {
    pub fn new(default_locale: &str, fallback_locale: &str) -> Self {
        I18nConfig {
            default_locale: default_locale.to_owned(),
            fallback_locale: fallback_locale.to_owned(),
            regions: HashMap::new(),
            prefix_default_locale: true,
            param_name: PARAM_NAME.to_owned(),
        }
    }

    pub fn with_regions(mut self, locale: &str, regions: &[&str]) -> Self {
        self.regions
            .insert(locale.to_owned(), regions.iter().map(|r| r.to_string()).collect());
        self
    }

    pub fn with_prefix_default_locale(mut self, prefix: bool) -> Self {
        self.prefix_default_locale = prefix;
        self
    }

    pub fn with_param_name(mut self, name: &str) -> Self {
        self.param_name = name.to_owned();
        self
    }

    /// Name of the full-locale cookie (`locale-REGION` values).
    pub fn full_param_name(&self) -> String {
        format!("full_{}", self.param_name)
    }

    /// Validate the configuration against the set of registered locales.
    pub(crate) fn validate(&self, registry: &LocaleRegistry) -> I18nResult<()> {
        if !registry.is_supported(&self.default_locale) {
            return Err(I18nError::Config(format!(
                "default locale '{}' has no registered loader",
                self.default_locale
            )));
        }
        if !registry.is_supported(&self.fallback_locale) {
            return Err(I18nError::Config(format!(
                "fallback locale '{}' has no registered loader",
                self.fallback_locale
            )));
        }
        for locale in registry.supported_locales() {
            match self.regions.get(locale) {
                None => {
                    return Err(I18nError::Config(format!(
                        "no regions configured for locale '{}'",
                        locale
                    )));
                }
                Some(regions) if regions.is_empty() => {
                    return Err(I18nError::Config(format!(
                        "empty region list for locale '{}'",
                        locale
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::StaticLoader;

    fn registry() -> LocaleRegistry {
        LocaleRegistry::new()
            .with_loader("en", StaticLoader::from_pairs(&[("greeting", "Hello")]))
            .with_loader("es", StaticLoader::from_pairs(&[("greeting", "Hola")]))
    }

    #[test]
    fn test_defaults() {
        let config = I18nConfig::new("en", "en");
        assert!(config.prefix_default_locale);
        assert_eq!(config.param_name, "locale");
        assert_eq!(config.full_param_name(), "full_locale");
    }

    #[test]
    fn test_valid_configuration() {
        let config = I18nConfig::new("en", "en")
            .with_regions("en", &["US"])
            .with_regions("es", &["AR"]);
        assert!(config.validate(&registry()).is_ok());
    }

    #[test]
    fn test_unregistered_default_locale() {
        let config = I18nConfig::new("fr", "en")
            .with_regions("en", &["US"])
            .with_regions("es", &["AR"]);
        assert!(matches!(
            config.validate(&registry()),
            Err(I18nError::Config(_))
        ));
    }

    #[test]
    fn test_missing_region_entry() {
        let config = I18nConfig::new("en", "en").with_regions("en", &["US"]);
        let err = config.validate(&registry()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: no regions configured for locale 'es'"
        );
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let config: I18nConfig = serde_json::from_str(
            r#"{
                "default_locale": "en",
                "fallback_locale": "en",
                "regions": { "en": ["US"], "es": ["AR"] }
            }"#,
        )
        .unwrap();
        assert!(config.prefix_default_locale);
        assert_eq!(config.param_name, "locale");
        assert_eq!(config.regions["es"], vec!["AR"]);
        assert!(config.validate(&registry()).is_ok());
    }

    #[test]
    fn test_empty_region_list() {
        let config = I18nConfig::new("en", "en")
            .with_regions("en", &["US"])
            .with_regions("es", &[]);
        assert!(matches!(
            config.validate(&registry()),
            Err(I18nError::Config(_))
        ));
    }
}
