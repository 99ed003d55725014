use tracing::warn;

/// Side effect fired when the session cannot be renewed and the user has to
/// sign in again.
pub trait LoginRedirect: Send + Sync {
    fn redirect(&self, route: &str);
}

/// Default hook: there is no page to navigate, so the redirect is logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRedirect;

impl LoginRedirect for TracingRedirect {
    fn redirect(&self, route: &str) {
        warn!(route, "session.redirect");
    }
}

impl<F> LoginRedirect for F
where
    F: Fn(&str) + Send + Sync,
{
    fn redirect(&self, route: &str) {
        self(route)
    }
}
