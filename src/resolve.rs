use tracing::debug;

use crate::accept::preferred_locale;
use crate::config::I18nConfig;
use crate::cookie::{SetCookie, get_cookie, locale_cookies};
use crate::error::{I18nError, I18nResult};
use crate::path::normalize_path;
use crate::region::{full_locale, region_by_locale, validate_full_locale};
use crate::registry::LocaleRegistry;

/// The pieces of an incoming request the resolver consumes.
#[derive(Debug, Clone, Default)]
pub struct RequestParts {
    pub pathname: String,
    /// Query string, with its leading `?` when non-empty
    pub search: String,
    pub cookie_header: Option<String>,
    pub accept_language: Option<String>,
}

impl RequestParts {
    pub fn new(pathname: &str) -> Self {
        RequestParts {
            pathname: pathname.to_owned(),
            ..RequestParts::default()
        }
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = if search.is_empty() || search.starts_with('?') {
            search.to_owned()
        } else {
            format!("?{}", search)
        };
        self
    }

    pub fn with_cookie_header(mut self, header: &str) -> Self {
        self.cookie_header = Some(header.to_owned());
        self
    }

    pub fn with_accept_language(mut self, header: &str) -> Self {
        self.accept_language = Some(header.to_owned());
        self
    }

    pub(crate) fn cookie(&self, name: &str) -> Option<&str> {
        get_cookie(self.cookie_header.as_deref(), name)
    }
}

/// Successful, terminal outcome of locale resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLocale {
    pub locale: String,
    pub region: String,
    pub full_locale: String,
}

/// Terminal outcome instructing the host to move the client to a canonical
/// localized URL, refreshing the locale cookies that changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDirective {
    pub location: String,
    pub cookies: Vec<SetCookie>,
}

/// Outcome of locale resolution. A redirect is ordinary control flow here,
/// not an error; the outer request-handling layer turns it into an actual
/// HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ResolvedLocale),
    Redirect(RedirectDirective),
}

/// Decide the locale for a request from its URL path, cookies and
/// `Accept-Language` header.
///
/// Branches, first match wins:
/// 1. URL/route locale present but unsupported: render directly under the
///    fallback locale, no redirect.
/// 2. No URL locale: an unprefixed default renders directly when the
///    cookie agrees; otherwise the cookie, or failing that the
///    `Accept-Language` preference, picks the redirect target.
/// 3. URL locale supported: stale or invalid cookies force a
///    cookie-refreshing redirect to the same locale; an unnecessarily
///    prefixed default locale redirects to the unprefixed form; anything
///    else resolves in place.
pub(crate) fn resolve(
    config: &I18nConfig,
    registry: &LocaleRegistry,
    request: &RequestParts,
    route_locale: Option<&str>,
) -> I18nResult<Resolution> {
    let supported = registry.supported_locales();
    let first_segment = request.pathname.split('/').find(|s| !s.is_empty());
    let locale_param = route_locale.or(first_segment);

    let locale_cookie = request.cookie(&config.param_name);
    let full_cookie = request.cookie(&config.full_param_name());

    let region_of = |locale: &str| -> I18nResult<&str> {
        region_by_locale(&config.regions, locale, &config.fallback_locale).ok_or_else(|| {
            I18nError::Config(format!("no regions configured for locale '{}'", locale))
        })
    };

    let resolved = |locale: &str| -> I18nResult<Resolution> {
        let region = region_of(locale)?;
        Ok(Resolution::Resolved(ResolvedLocale {
            locale: locale.to_owned(),
            region: region.to_owned(),
            full_locale: full_locale(locale, region),
        }))
    };

    let redirect_to = |target: &str| -> I18nResult<Resolution> {
        let region = region_of(target)?;
        let target_full = full_locale(target, region);
        let (locale_set, full_set) = locale_cookies(target, region, &config.param_name);

        // Only emit cookies whose value actually changes.
        let mut cookies = Vec::new();
        if locale_cookie != Some(target) {
            cookies.push(locale_set);
        }
        if full_cookie != Some(target_full.as_str()) {
            cookies.push(full_set);
        }

        let clean_path = if locale_param.is_some() {
            strip_first_segment(&request.pathname)
        } else {
            request.pathname.trim_start_matches('/').to_owned()
        };
        let should_prefix = config.prefix_default_locale || target != config.default_locale;
        let mut path = String::new();
        if should_prefix {
            path.push('/');
            path.push_str(target);
        }
        if !clean_path.is_empty() {
            path.push('/');
            path.push_str(&clean_path);
        }
        let location = format!("{}{}", normalize_path(&path), request.search);
        debug!(locale = target, %location, "redirecting to canonical localized URL");
        Ok(Resolution::Redirect(RedirectDirective { location, cookies }))
    };

    // 1. Unsupported locale segment: direct render under the fallback.
    if let Some(param) = locale_param
        && !supported.contains(&param)
    {
        debug!(param, "unsupported URL locale, rendering with fallback");
        return resolved(&config.fallback_locale);
    }

    // 2. No locale segment in the URL.
    let Some(param) = locale_param else {
        if !config.prefix_default_locale && locale_cookie == Some(config.default_locale.as_str()) {
            return resolved(&config.default_locale);
        }
        if let Some(cookie) = locale_cookie {
            if !config.prefix_default_locale && cookie != config.default_locale {
                return redirect_to(&config.default_locale);
            }
            return redirect_to(cookie);
        }
        // No stored preference: consult the Accept-Language header.
        let preferred = preferred_locale(
            request.accept_language.as_deref().unwrap_or(""),
            &supported,
            &config.default_locale,
            &config.regions,
        );
        debug!(locale = %preferred.base_locale, "picked locale from accept-language");
        return redirect_to(&preferred.base_locale);
    };

    // 3. Supported locale segment in the URL.
    let full_cookie_invalid = !validate_full_locale(full_cookie, &config.regions)
        || full_cookie.and_then(|c| c.split('-').next()) != Some(param);

    if locale_cookie != Some(param) || full_cookie_invalid {
        return redirect_to(param);
    }
    if !config.prefix_default_locale && param == config.default_locale {
        return redirect_to(&config.default_locale);
    }
    resolved(param)
}

fn strip_first_segment(pathname: &str) -> String {
    pathname
        .split('/')
        .filter(|s| !s.is_empty())
        .skip(1)
        .collect::<Vec<_>>()
        .join("/")
}
