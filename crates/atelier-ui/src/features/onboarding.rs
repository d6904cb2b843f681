//! Terms-of-service onboarding step.
//!
//! # Design
//! - The terms page loads once; accept and decline are offered only after it
//!   has loaded (successfully or not).
//! - Accept is single-flight: a second accept while the step is being
//!   completed does nothing.
//! - The wizard advances only after the onboarding service confirms the step.

use std::sync::Arc;

use atelier_core::{ContentPage, ContentSource, OnboardingService, OnboardingStep, OnboardingWizard};
use atelier_events::{Event, EventBus};
use tracing::{debug, info, warn};

use crate::core::bulk::DispatchOutcome;
use crate::core::signal::Signal;
use crate::error::{UiError, UiResult};

/// Content slug of the terms page.
pub const TOS_SLUG: &str = "tos";
/// Step heading.
pub const TOS_TITLE: &str = "Terms of Service";
/// Step subheading.
pub const TOS_DESCRIPTION: &str = "Please take a moment to review and accept our terms of service.";

/// Load state of the terms page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TermsState {
    /// Lookup outstanding.
    #[default]
    Loading,
    /// Lookup finished; `None` when there is no terms page.
    Loaded(Option<ContentPage>),
}

/// Terms-of-service step controller.
pub struct TosStep {
    content: Arc<dyn ContentSource>,
    onboarding: Arc<dyn OnboardingService>,
    wizard: Arc<dyn OnboardingWizard>,
    terms: Signal<TermsState>,
    completing: Signal<bool>,
    events: Option<EventBus>,
}

impl TosStep {
    /// Step wired to its collaborators; call [`Self::load`] to fetch the terms.
    #[must_use]
    pub fn new(
        content: Arc<dyn ContentSource>,
        onboarding: Arc<dyn OnboardingService>,
        wizard: Arc<dyn OnboardingWizard>,
    ) -> Self {
        Self {
            content,
            onboarding,
            wizard,
            terms: Signal::new(TermsState::Loading),
            completing: Signal::new(false),
            events: None,
        }
    }

    /// Publish completion events on `events`.
    #[must_use]
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Fetch the terms page.
    pub async fn load(&self) -> TermsState {
        let page = match self.content.get(TOS_SLUG).await {
            Ok(page) => page,
            Err(err) => {
                warn!(slug = TOS_SLUG, error = %err, "terms lookup failed");
                None
            }
        };
        let state = TermsState::Loaded(page);
        self.terms.set(state.clone());
        state
    }

    /// Current terms state.
    #[must_use]
    pub fn terms(&self) -> TermsState {
        self.terms.get()
    }

    /// Observable terms state.
    #[must_use]
    pub const fn terms_signal(&self) -> &Signal<TermsState> {
        &self.terms
    }

    /// Whether accept and decline are offered.
    #[must_use]
    pub fn actions_available(&self) -> bool {
        self.terms.with(|terms| !matches!(terms, TermsState::Loading))
    }

    /// Whether an accept is in flight.
    #[must_use]
    pub fn is_completing(&self) -> bool {
        self.completing.get()
    }

    /// Accept the terms and advance the wizard.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Collaborator`] when the onboarding service fails;
    /// the wizard stays on this step.
    pub async fn accept(&self) -> UiResult<DispatchOutcome> {
        if !self.actions_available() {
            debug!("terms accept ignored while loading");
            return Ok(DispatchOutcome::Ignored);
        }
        if !self.completing.replace(true) {
            debug!("terms accept ignored while completing");
            return Ok(DispatchOutcome::Ignored);
        }
        let result = self.onboarding.complete_step(OnboardingStep::Tos).await;
        self.completing.set(false);

        match result {
            Ok(()) => {
                self.wizard.next();
                if let Some(events) = &self.events {
                    let _ = events.publish(Event::OnboardingStepCompleted {
                        step: OnboardingStep::Tos.as_str().to_string(),
                    });
                }
                info!(step = %OnboardingStep::Tos, "onboarding step completed");
                Ok(DispatchOutcome::Completed)
            }
            Err(source) => {
                warn!(step = %OnboardingStep::Tos, error = %source, "onboarding step failed");
                Err(UiError::collaborator(source.operation(), source))
            }
        }
    }

    /// Decline the terms and leave onboarding.
    pub fn decline(&self) {
        info!("terms declined");
        self.wizard.abort();
    }
}
