use std::collections::HashMap;

/// Canonical region for a locale: the first configured region, falling back
/// to the fallback locale's first region. Returns `None` only when the
/// configuration invariant (regions cover every registered locale) is
/// violated; instance construction validates that up front.
pub fn region_by_locale<'a>(
    regions: &'a HashMap<String, Vec<String>>,
    locale: &str,
    fallback_locale: &str,
) -> Option<&'a str> {
    regions
        .get(locale)
        .or_else(|| regions.get(fallback_locale))
        .and_then(|list| list.first())
        .map(String::as_str)
}

/// Compose a `locale-REGION` full locale string.
pub fn full_locale(locale: &str, region: &str) -> String {
    format!("{}-{}", locale, region)
}

/// Validate a stored `locale-REGION` full-locale cookie against the region
/// configuration. Malformed values and unknown base/region pairs are
/// invalid.
pub fn validate_full_locale(
    cookie: Option<&str>,
    regions: &HashMap<String, Vec<String>>,
) -> bool {
    let Some(cookie) = cookie else {
        return false;
    };
    let Some((base, region)) = cookie.split_once('-') else {
        return false;
    };
    if base.is_empty() || region.is_empty() {
        return false;
    }
    regions
        .get(base)
        .is_some_and(|list| list.iter().any(|r| r == region))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> HashMap<String, Vec<String>> {
        HashMap::from([
            ("en".to_owned(), vec!["US".to_owned(), "GB".to_owned()]),
            ("es".to_owned(), vec!["AR".to_owned()]),
        ])
    }

    #[test]
    fn test_region_by_locale() {
        let regions = regions();
        assert_eq!(region_by_locale(&regions, "en", "en"), Some("US"));
        assert_eq!(region_by_locale(&regions, "es", "en"), Some("AR"));
    }

    #[test]
    fn test_falls_back_for_unknown_locale() {
        let regions = regions();
        assert_eq!(region_by_locale(&regions, "fr", "en"), Some("US"));
        assert_eq!(region_by_locale(&regions, "fr", "de"), None);
    }

    #[test]
    fn test_full_locale() {
        assert_eq!(full_locale("en", "US"), "en-US");
    }

    #[test]
    fn test_validate_full_locale() {
        let regions = regions();
        assert!(validate_full_locale(Some("en-US"), &regions));
        assert!(validate_full_locale(Some("en-GB"), &regions));
        assert!(validate_full_locale(Some("es-AR"), &regions));
        assert!(!validate_full_locale(Some("en-AR"), &regions));
        assert!(!validate_full_locale(Some("fr-FR"), &regions));
        assert!(!validate_full_locale(Some("en"), &regions));
        assert!(!validate_full_locale(Some("en-"), &regions));
        assert!(!validate_full_locale(Some("-US"), &regions));
        assert!(!validate_full_locale(None, &regions));
    }
}
