//! State

use std::sync::Arc;

use ribbon_app::context::AppContext;
use salvo::http::header::HeaderName;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Header carrying a gateway-verified shop identity, when configured.
    pub(crate) verified_shop_header: Option<HeaderName>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, verified_shop_header: Option<HeaderName>) -> Self {
        Self {
            app,
            verified_shop_header,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(
        app: AppContext,
        verified_shop_header: Option<HeaderName>,
    ) -> Arc<Self> {
        Arc::new(Self::new(app, verified_shop_header))
    }
}
