use crate::config::I18nConfig;

/// Normalize a path by collapsing duplicate slashes and stripping trailing
/// slashes. The root stays `/`, and an empty input becomes `/`.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                normalized.push(c);
            }
            prev_slash = true;
        } else {
            normalized.push(c);
            prev_slash = false;
        }
    }
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// Compute the locale-prefixed form of `to` for the given locale.
///
/// Idempotent: an already-prefixed path is returned normalized, never
/// double-prefixed. The default locale stays unprefixed when
/// `prefix_default_locale` is off.
pub fn build_locale_path(to: &str, locale: &str, config: &I18nConfig) -> String {
    let to = if to.starts_with('/') {
        to.to_owned()
    } else {
        format!("/{}", to)
    };

    if locale == config.default_locale && !config.prefix_default_locale {
        return normalize_path(&to);
    }
    if to.starts_with(&format!("/{}/", locale)) || to == format!("/{}", locale) {
        return normalize_path(&to);
    }
    if to == "/" {
        return format!("/{}", locale);
    }
    normalize_path(&format!("/{}{}", locale, to))
}

/// Expand a route list into every locale-prefixed path to render statically.
///
/// With default-locale prefixing on, every route is emitted once per
/// supported locale. With it off, each route is emitted unprefixed once
/// plus prefixed for every non-default locale.
pub fn generate_static_paths(
    routes: &[&str],
    supported_locales: &[&str],
    config: &I18nConfig,
) -> Vec<String> {
    let mut paths = Vec::new();
    for route in routes {
        let suffix = if *route == "/" { "" } else { route };
        if config.prefix_default_locale {
            for locale in supported_locales {
                paths.push(format!("/{}{}", locale, suffix));
            }
        } else {
            paths.push(if *route == "/" {
                "/".to_owned()
            } else {
                (*route).to_owned()
            });
            for locale in supported_locales {
                if *locale != config.default_locale {
                    paths.push(format!("/{}{}", locale, suffix));
                }
            }
        }
    }
    paths
}

/// Languages written right-to-left
const RTL_LANGUAGES: &[&str] = &[
    "ar",  // Arabic
    "arc", // Aramaic
    "ckb", // Central Kurdish (Sorani)
    "dv",  // Divehi, Dhivehi, Maldivian
    "fa",  // Persian (Farsi)
    "ha",  // Hausa (written in Arabic script)
    "he",  // Hebrew
    "khw", // Khowar
    "ks",  // Kashmiri
    "ku",  // Kurdish (some dialects)
    "ps",  // Pashto
    "sd",  // Sindhi
    "ug",  // Uyghur
    "ur",  // Urdu
    "yi",  // Yiddish
];

/// Text direction of a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Ltr,
    Rtl,
}

pub fn text_direction(locale: &str) -> Dir {
    if RTL_LANGUAGES.contains(&locale) {
        Dir::Rtl
    } else {
        Dir::Ltr
    }
}
