//! Context propagation helpers for application and view spans.
//!
//! # Design
//! - Keeps the active view name in task-local storage so fetch tasks spawned by
//!   a listing controller can tag their logs without threading it through.
//! - Provides an application-level span guard so top-level spans carry mode/build info.

use std::future::Future;
use std::sync::Arc;

use tracing::{Span, span::Entered};

use crate::init::build_sha;

/// Guard that keeps the application-level span entered for the lifetime of the process.
pub struct GlobalContextGuard {
    _guard: Entered<'static>,
}

impl GlobalContextGuard {
    /// Enter the application-level tracing span for the lifetime of the guard.
    #[must_use]
    pub fn new(mode: impl Into<String>) -> Self {
        let mode = mode.into();
        let span: &'static Span = Box::leak(Box::new(
            tracing::info_span!("app", mode = %mode, build_sha = %build_sha()),
        ));
        let guard = span.enter();
        Self { _guard: guard }
    }
}

/// Execute the provided future with the given view name available to downstream code.
pub async fn with_view_context<Fut, T>(view: impl Into<String>, fut: Fut) -> T
where
    Fut: Future<Output = T>,
{
    let context = ViewContext {
        view: Arc::from(view.into()),
    };
    ACTIVE_VIEW_CONTEXT.scope(context, fut).await
}

/// Retrieve the view name for the current task, if one is set.
#[must_use]
pub fn current_view() -> Option<String> {
    ACTIVE_VIEW_CONTEXT
        .try_with(|ctx| ctx.view.as_ref().to_string())
        .ok()
}

#[derive(Clone)]
struct ViewContext {
    view: Arc<str>,
}

tokio::task_local! {
    static ACTIVE_VIEW_CONTEXT: ViewContext;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_is_unset_outside_a_view_scope() {
        let guard = GlobalContextGuard::new("test");
        assert!(current_view().is_none());
        drop(guard);
    }

    #[tokio::test]
    async fn with_view_context_exposes_view_name() {
        let output = with_view_context("vault", async {
            assert_eq!(current_view().as_deref(), Some("vault"));
            "done"
        })
        .await;
        assert_eq!(output, "done");
        assert!(current_view().is_none());
    }
}
