use std::collections::HashMap;

/// One entry of an `Accept-Language` header, lowercased, with its quality
/// weight (default 1.0).
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    pub code: String,
    pub weight: f32,
}

/// Parse an `Accept-Language` header into entries sorted by descending
/// weight. Entries are comma separated, `code[;q=weight]`; malformed
/// weights fall back to 1.0, empty codes are skipped.
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    let mut ranges: Vec<LanguageRange> = header
        .split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            let (code, params) = match entry.split_once(';') {
                Some((code, params)) => (code.trim(), Some(params)),
                None => (entry, None),
            };
            if code.is_empty() {
                return None;
            }
            let weight = params
                .and_then(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            Some(LanguageRange {
                code: code.to_lowercase(),
                weight,
            })
        })
        .collect();
    ranges.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    ranges
}

/// The locale a browser preference resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferredLocale {
    pub base_locale: String,
    pub full_locale: String,
}

/// Pick the highest-weight `Accept-Language` entry whose base language is
/// supported. An exact match against the locale's configured regions wins
/// over the canonical region; no match at all yields the default locale.
pub fn preferred_locale(
    accept_language: &str,
    supported_locales: &[&str],
    default_locale: &str,
    regions: &HashMap<String, Vec<String>>,
) -> PreferredLocale {
    let resolve_full = |base: &str| -> String {
        match regions.get(base).and_then(|list| list.first()) {
            Some(region) => crate::region::full_locale(base, region),
            None => base.to_owned(),
        }
    };

    for range in parse_accept_language(accept_language) {
        let (base, region) = match range.code.split_once('-') {
            Some((base, region)) => (base, Some(region)),
            None => (range.code.as_str(), None),
        };
        if !supported_locales.contains(&base) {
            continue;
        }
        let Some(configured) = regions.get(base).filter(|list| !list.is_empty()) else {
            continue;
        };

        if let Some(region) = region
            && configured.iter().any(|r| r.eq_ignore_ascii_case(region))
        {
            return PreferredLocale {
                base_locale: base.to_owned(),
                full_locale: range.code.clone(),
            };
        }
        return PreferredLocale {
            base_locale: base.to_owned(),
            full_locale: resolve_full(base),
        };
    }

    PreferredLocale {
        base_locale: default_locale.to_owned(),
        full_locale: resolve_full(default_locale),
    }
}
