use crate::cookie::SetCookie;

/// Capability set supplied by the surrounding framework.
///
/// One conforming implementation exists per host; the core never branches
/// on which host it runs under. Navigation and link rendering receive
/// paths that already went through the locale path builder.
pub trait HostAdapter {
    /// Host response value produced for a redirect
    type Response;
    /// Host-specific link properties (everything but the target path)
    type LinkProps;
    /// Host renderable produced for a link
    type Rendered;

    fn current_locale(&self) -> String;

    /// Side-effecting navigation; no return contract is relied upon.
    fn navigate(&self, to: &str);

    fn pathname(&self) -> String;

    fn search_params(&self) -> Vec<(String, String)>;

    fn redirect(&self, to: &str, cookies: &[SetCookie]) -> Self::Response;

    fn render_link(&self, to: &str, props: Self::LinkProps) -> Self::Rendered;
}
