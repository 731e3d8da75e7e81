//! State

use std::sync::Arc;

use vitrine_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Public base URL used to build payment return links.
    pub(crate) public_base_url: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, public_base_url: String) -> Self {
        Self {
            app,
            public_base_url,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, public_base_url: String) -> Arc<Self> {
        Arc::new(Self::new(app, public_base_url))
    }
}
