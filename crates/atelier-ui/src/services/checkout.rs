//! Checkout SDK provider.
//!
//! # Design
//! - Checkout stays disabled unless a client token is configured.
//! - SDK callbacks are translated into bus events; only the loaded, closed and
//!   completed callbacks are forwarded.
//! - The session handle is set once initialisation resolves; earlier access
//!   reports [`UiError::CheckoutNotInitialized`].

use std::sync::{Arc, Mutex, PoisonError};

use atelier_config::CheckoutConfig;
use atelier_core::{
    CheckoutCallback, CheckoutCustomer, CheckoutOptions, CheckoutSdk, CheckoutSdkEvent,
    CheckoutSession, CurrentUser,
};
use atelier_events::{Event, EventBus, EventId};
use atelier_telemetry::Metrics;
use tracing::{debug, info, warn};

use crate::error::{UiError, UiResult};

/// SDK initialisation options, or `None` when checkout is disabled.
#[must_use]
pub fn checkout_options(
    config: &CheckoutConfig,
    user: Option<&CurrentUser>,
) -> Option<CheckoutOptions> {
    let token = config.enabled_token()?;
    let customer = match user {
        None => CheckoutCustomer::Anonymous,
        Some(user) => match (&user.customer_id, &user.email) {
            (Some(customer_id), _) => CheckoutCustomer::Id(customer_id.clone()),
            (None, Some(email)) => CheckoutCustomer::Email(email.clone()),
            (None, None) => CheckoutCustomer::Anonymous,
        },
    };
    Some(CheckoutOptions {
        environment: config.environment.as_str().to_string(),
        token: token.to_string(),
        customer,
        theme: config.theme.as_str().to_string(),
        allow_logout: config.allow_logout,
    })
}

/// Publish the bus event matching an SDK callback.
///
/// Returns the event id, or `None` for callbacks that are not forwarded.
#[must_use]
pub fn forward_checkout_event(
    events: &EventBus,
    metrics: &Metrics,
    sdk_event: CheckoutSdkEvent,
) -> Option<EventId> {
    let event = match sdk_event.name.as_str() {
        "checkout.completed" => Event::CheckoutCompleted {
            data: sdk_event.data,
        },
        "checkout.closed" => Event::CheckoutClosed,
        "checkout.loaded" => Event::CheckoutLoaded,
        other => {
            debug!(name = other, "checkout callback ignored");
            return None;
        }
    };
    let kind = event.kind();
    let id = events.publish(event);
    metrics.inc_checkout_event(kind);
    metrics.inc_event(kind);
    debug!(kind, event_id = id, "checkout event forwarded");
    Some(id)
}

/// Owns the checkout SDK session for the application.
pub struct CheckoutProvider {
    sdk: Arc<dyn CheckoutSdk>,
    config: CheckoutConfig,
    events: EventBus,
    metrics: Metrics,
    session: Mutex<Option<Arc<dyn CheckoutSession>>>,
}

impl CheckoutProvider {
    /// Provider that has not initialised the SDK yet.
    #[must_use]
    pub fn new(
        sdk: Arc<dyn CheckoutSdk>,
        config: CheckoutConfig,
        events: EventBus,
        metrics: Metrics,
    ) -> Self {
        Self {
            sdk,
            config,
            events,
            metrics,
            session: Mutex::new(None),
        }
    }

    /// Whether a client token is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled_token().is_some()
    }

    /// Initialise the SDK for `user`.
    ///
    /// Returns `true` once a session is available; `false` when checkout is
    /// disabled or the SDK could not be loaded.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Collaborator`] when the SDK rejects initialisation.
    pub async fn initialize(&self, user: Option<&CurrentUser>) -> UiResult<bool> {
        let Some(options) = checkout_options(&self.config, user) else {
            debug!("checkout disabled: no client token configured");
            return Ok(false);
        };
        let environment = options.environment.clone();
        let events = self.events.clone();
        let metrics = self.metrics.clone();
        let callback: CheckoutCallback = Arc::new(move |sdk_event| {
            let _ = forward_checkout_event(&events, &metrics, sdk_event);
        });

        match self.sdk.initialize(options, callback).await {
            Ok(Some(session)) => {
                *self
                    .session
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner) = Some(session);
                info!(environment = %environment, "checkout initialised");
                Ok(true)
            }
            Ok(None) => {
                warn!(environment = %environment, "checkout sdk unavailable");
                Ok(false)
            }
            Err(source) => {
                warn!(error = %source, "checkout initialisation failed");
                Err(UiError::collaborator(source.operation(), source))
            }
        }
    }

    /// Whether a session is available.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// The initialised session.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::CheckoutNotInitialized`] before initialisation.
    pub fn session(&self) -> UiResult<Arc<dyn CheckoutSession>> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(UiError::CheckoutNotInitialized)
    }

    /// Open the checkout overlay for `price_ids`.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::CheckoutNotInitialized`] before initialisation and
    /// [`UiError::Collaborator`] when the SDK refuses to open.
    pub fn open(&self, price_ids: &[String]) -> UiResult<()> {
        self.session()?
            .open(price_ids)
            .map_err(|source| UiError::collaborator(source.operation(), source))
    }
}
