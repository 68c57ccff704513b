//! State

use std::sync::Arc;

use minijinja::Environment;
use tally_app::context::AppContext;

pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) top_n: usize,
    pub(crate) templates: Environment<'static>,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, top_n: usize, templates: Environment<'static>) -> Self {
        Self {
            app,
            top_n,
            templates,
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, top_n: usize, templates: Environment<'static>) -> Arc<Self> {
        Arc::new(Self::new(app, top_n, templates))
    }
}
