use crate::I18n;
use crate::adapter::HostAdapter;
use crate::error::{I18nError, I18nResult};
use crate::resolve::{self, RedirectDirective, RequestParts, Resolution};
use crate::translate::Translator;

/// Server-side view of an [`I18n`] instance.
///
/// Translation here is cookie-gated: `t` and `scoped_t` require the locale
/// cookie that a prior successful [`I18nServer::resolve`] set. Calling them
/// without it is a programmer error and fails loudly.
pub struct I18nServer<'a> {
    i18n: &'a I18n,
}

impl<'a> I18nServer<'a> {
    pub(crate) fn new(i18n: &'a I18n) -> Self {
        I18nServer { i18n }
    }

    /// Translator for the request's locale cookie.
    pub async fn t(&self, request: &RequestParts) -> I18nResult<Translator> {
        self.translator(request, None, "t").await
    }

    /// Translator resolving keys under `scope`.
    pub async fn scoped_t(&self, scope: &str, request: &RequestParts) -> I18nResult<Translator> {
        self.translator(request, Some(scope), "scoped_t").await
    }

    async fn translator(
        &self,
        request: &RequestParts,
        scope: Option<&str>,
        operation: &'static str,
    ) -> I18nResult<Translator> {
        let locale = request
            .cookie(&self.i18n.config().param_name)
            .ok_or(I18nError::MissingLocaleCookie { operation })?
            .to_owned();
        let dictionary = self.i18n.dictionary(&locale).await?;
        Ok(Translator::new(locale, dictionary, scope))
    }

    /// Run the locale resolution state machine for a request.
    ///
    /// `route_locale` is a pre-extracted locale route parameter, when the
    /// host router already split the path.
    pub fn resolve(
        &self,
        request: &RequestParts,
        route_locale: Option<&str>,
    ) -> I18nResult<Resolution> {
        resolve::resolve(self.i18n.config(), self.i18n.registry(), request, route_locale)
    }

    /// Turn a redirect directive into the host's response value.
    pub fn redirect_response<A: HostAdapter>(
        &self,
        adapter: &A,
        directive: &RedirectDirective,
    ) -> A::Response {
        adapter.redirect(&directive.location, &directive.cookies)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::I18nConfig;
    use crate::error::I18nError;
    use crate::loader::StaticLoader;
    use crate::registry::LocaleRegistry;
    use crate::resolve::RequestParts;
    use crate::translate::Params;
    use crate::I18n;

    fn i18n() -> I18n {
        let registry = LocaleRegistry::new()
            .with_loader(
                "en",
                StaticLoader::from_pairs(&[
                    ("greeting", "Hello, {name}!"),
                    ("scope.thing#one", "scoped thing"),
                    ("scope.thing#other", "scoped things"),
                ]),
            )
            .with_loader("es", StaticLoader::from_pairs(&[("greeting", "¡Hola, {name}!")]));
        let config = I18nConfig::new("en", "en")
            .with_regions("en", &["US"])
            .with_regions("es", &["AR"]);
        I18n::new(registry, config).unwrap()
    }

    #[tokio::test]
    async fn test_t_requires_locale_cookie() {
        let i18n = i18n();
        let err = i18n.server().t(&RequestParts::new("/en")).await.unwrap_err();
        assert_eq!(err, I18nError::MissingLocaleCookie { operation: "t" });
        assert!(err.to_string().contains("calling t"));

        let err = i18n
            .server()
            .scoped_t("scope", &RequestParts::new("/en"))
            .await
            .unwrap_err();
        assert_eq!(err, I18nError::MissingLocaleCookie { operation: "scoped_t" });
    }

    #[tokio::test]
    async fn test_t_translates_for_cookie_locale() {
        let i18n = i18n();
        let request = RequestParts::new("/en").with_cookie_header("locale=en");
        let t = i18n.server().t(&request).await.unwrap();
        let params = Params::new().with_text("name", "Chris");
        assert_eq!(
            t.t("greeting", Some(&params)).as_text(),
            Some("Hello, Chris!")
        );

        let request = RequestParts::new("/es").with_cookie_header("locale=es");
        let t = i18n.server().t(&request).await.unwrap();
        assert_eq!(
            t.t("greeting", Some(&params)).as_text(),
            Some("¡Hola, Chris!")
        );
    }

    #[tokio::test]
    async fn test_scoped_t_resolves_under_scope() {
        let i18n = i18n();
        let request = RequestParts::new("/en").with_cookie_header("locale=en");
        let t = i18n.server().scoped_t("scope", &request).await.unwrap();
        assert_eq!(
            t.t("thing", Some(&Params::new().with_count(1))).as_text(),
            Some("scoped thing")
        );
        assert_eq!(
            t.t("thing", Some(&Params::new().with_count(3))).as_text(),
            Some("scoped things")
        );
    }
}
