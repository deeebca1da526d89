use crate::I18n;
use crate::adapter::HostAdapter;
use crate::cookie::{SetCookie, locale_cookies};
use crate::error::{I18nError, I18nResult};
use crate::path::{build_locale_path, normalize_path};
use crate::region::{full_locale, region_by_locale};
use crate::translate::Translator;

/// Cookie and navigation instructions produced by a locale change. The
/// host applies the cookies; navigation already happened through the
/// adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleChange {
    pub target: String,
    pub cookies: Vec<SetCookie>,
}

/// Client-side view of an [`I18n`] instance, bound to a host adapter.
///
/// The adapter knows the active locale (from the URL the resolver already
/// canonicalized), so translation here is not cookie-gated.
pub struct I18nClient<'a, A: HostAdapter> {
    i18n: &'a I18n,
    adapter: &'a A,
}

impl<'a, A: HostAdapter> I18nClient<'a, A> {
    pub(crate) fn new(i18n: &'a I18n, adapter: &'a A) -> Self {
        I18nClient { i18n, adapter }
    }

    /// Translator for the adapter's current locale.
    pub async fn t(&self) -> I18nResult<Translator> {
        self.translator(None).await
    }

    /// Translator resolving keys under `scope`.
    pub async fn scoped_t(&self, scope: &str) -> I18nResult<Translator> {
        self.translator(Some(scope)).await
    }

    async fn translator(&self, scope: Option<&str>) -> I18nResult<Translator> {
        let locale = self.adapter.current_locale();
        let dictionary = self.i18n.dictionary(&locale).await?;
        Ok(Translator::new(locale, dictionary, scope))
    }

    pub fn current_locale(&self) -> String {
        self.adapter.current_locale()
    }

    /// The current `locale-REGION` full locale.
    pub fn current_region(&self) -> I18nResult<String> {
        let locale = self.adapter.current_locale();
        let config = self.i18n.config();
        let region = region_by_locale(&config.regions, &locale, &config.fallback_locale)
            .ok_or_else(|| {
                I18nError::Config(format!("no regions configured for locale '{}'", locale))
            })?;
        Ok(full_locale(&locale, region))
    }

    /// Switch to `locale`: pre-load its dictionary, rebuild the current
    /// path under the new locale (query preserved), navigate there, and
    /// hand back the cookie updates for the host to apply.
    ///
    /// Switching to the current locale is a no-op.
    pub async fn change_locale(&self, locale: &str) -> I18nResult<Option<LocaleChange>> {
        let current = self.adapter.current_locale();
        if locale == current {
            return Ok(None);
        }

        // Dictionary is warmed before navigating so the new locale renders
        // without a load gap.
        self.i18n.dictionary(locale).await?;

        let config = self.i18n.config();
        let region = region_by_locale(&config.regions, locale, &config.fallback_locale)
            .ok_or_else(|| {
                I18nError::Config(format!("no regions configured for locale '{}'", locale))
            })?;
        let (locale_cookie, full_cookie) = locale_cookies(locale, region, &config.param_name);

        // Current path without its locale prefix.
        let pathname = self.adapter.pathname();
        let mut segments: Vec<&str> = pathname.split('/').filter(|s| !s.is_empty()).collect();
        if segments.first() == Some(&current.as_str()) {
            segments.remove(0);
        }
        let path = format!("/{}", segments.join("/"));

        let search = self
            .adapter
            .search_params()
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&");

        let should_prefix = config.prefix_default_locale || locale != config.default_locale;
        let prefix = if should_prefix {
            format!("/{}", locale)
        } else {
            String::new()
        };
        let mut target = normalize_path(&format!("{}{}", prefix, path));
        if !search.is_empty() {
            target.push('?');
            target.push_str(&search);
        }

        self.adapter.navigate(&target);
        Ok(Some(LocaleChange {
            target,
            cookies: vec![locale_cookie, full_cookie],
        }))
    }

    /// Render a host link whose target went through the locale path
    /// builder first.
    pub fn link(&self, to: &str, props: A::LinkProps) -> A::Rendered {
        let target = build_locale_path(to, &self.adapter.current_locale(), self.i18n.config());
        self.adapter.render_link(&target, props)
    }
}
