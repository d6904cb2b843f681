//! Application context: configuration, telemetry, the event bus and the
//! factories that mount page controllers with the configured tuning.

use std::sync::Arc;

use atelier_config::AtelierConfig;
use atelier_core::{
    CheckoutSdk, ContentSource, Cosmetic, CosmeticType, CurrentUser, DialogHost, FilterState,
    NotificationSink, OnboardingService, OnboardingWizard, ResultFetcher, VaultItem,
    VaultMutations, VaultSort,
};
use atelier_events::EventBus;
use atelier_telemetry::{GlobalContextGuard, LogFormat, LoggingConfig, Metrics};
use atelier_ui::features::cosmetic_shop::CosmeticPicker;
use atelier_ui::features::onboarding::TosStep;
use atelier_ui::features::vault::{VaultCollaborators, VaultPage};
use atelier_ui::services::CheckoutProvider;
use atelier_ui::{BulkActionDispatcher, ListingController, ListingOptions, SelectionSet, Signal};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Shared services for one running application.
pub struct AppContext {
    config: AtelierConfig,
    metrics: Metrics,
    events: EventBus,
}

impl AppContext {
    /// Install logging from `config.telemetry` and build the context.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid, a tracing
    /// subscriber is already installed, or metrics cannot be registered.
    pub fn from_config(config: AtelierConfig) -> AppResult<Self> {
        let format = config
            .telemetry
            .log_format
            .as_deref()
            .map_or_else(LogFormat::infer, LogFormat::parse);
        let logging = LoggingConfig {
            level: &config.telemetry.log_level,
            format,
            build_sha: option_env!("ATELIER_BUILD_SHA").unwrap_or("dev"),
        };
        atelier_telemetry::init_logging(&logging)
            .map_err(|err| AppError::telemetry("telemetry.init", err))?;
        Self::new(config)
    }

    /// Build the context without touching the global subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is invalid or metrics cannot
    /// be registered.
    pub fn new(config: AtelierConfig) -> AppResult<Self> {
        atelier_config::validate::validate(&config)
            .map_err(|err| AppError::config("config.validate", err))?;
        let metrics = Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
        Ok(Self {
            config,
            metrics,
            events: EventBus::new(),
        })
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &AtelierConfig {
        &self.config
    }

    /// Metrics registry shared by every controller.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Event bus shared by every controller.
    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }

    /// Listing tuning for `surface` from the configured debounce and page size.
    #[must_use]
    pub const fn listing_options(&self, surface: &'static str) -> ListingOptions {
        ListingOptions::new(surface)
            .with_debounce(self.config.listing.debounce())
            .with_limit(self.config.listing.page_limit)
    }

    /// Mount a listing controller for `surface`.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn mount_listing<F: ResultFetcher>(
        &self,
        fetcher: Arc<F>,
        initial: FilterState<F::Sort, F::Kind>,
        surface: &'static str,
    ) -> ListingController<F> {
        ListingController::mount(
            fetcher,
            initial,
            self.listing_options(surface),
            self.metrics.clone(),
        )
    }

    /// Bulk dispatcher over `selection`, publishing on the shared bus.
    #[must_use]
    pub fn bulk_dispatcher(
        &self,
        mutations: Arc<dyn VaultMutations>,
        notifications: Arc<dyn NotificationSink>,
        dialogs: Arc<dyn DialogHost>,
        selection: Signal<SelectionSet<VaultItem>>,
    ) -> BulkActionDispatcher {
        BulkActionDispatcher::new(
            mutations,
            notifications,
            dialogs,
            selection,
            self.metrics.clone(),
        )
        .with_events(self.events.clone())
    }

    /// Mount the vault page.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn mount_vault<F>(&self, fetcher: Arc<F>, collaborators: VaultCollaborators) -> VaultPage<F>
    where
        F: ResultFetcher<Item = VaultItem, Sort = VaultSort, Kind = String>,
    {
        VaultPage::mount(
            fetcher,
            collaborators,
            self.config.vault.clone(),
            self.listing_options("vault"),
            self.metrics.clone(),
        )
        .with_events(self.events.clone())
    }

    /// Mount the cosmetic picker.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn mount_cosmetic_picker<F>(&self, fetcher: Arc<F>) -> CosmeticPicker<F>
    where
        F: ResultFetcher<Item = Cosmetic, Sort = (), Kind = CosmeticType>,
    {
        CosmeticPicker::mount(
            fetcher,
            self.listing_options("cosmetic_picker"),
            self.metrics.clone(),
        )
    }

    /// Terms-of-service onboarding step publishing on the shared bus.
    #[must_use]
    pub fn tos_step(
        &self,
        content: Arc<dyn ContentSource>,
        onboarding: Arc<dyn OnboardingService>,
        wizard: Arc<dyn OnboardingWizard>,
    ) -> TosStep {
        TosStep::new(content, onboarding, wizard).with_events(self.events.clone())
    }

    /// Build the checkout provider and initialise it for `user`.
    ///
    /// # Errors
    ///
    /// Returns an error when the SDK rejects initialisation.
    pub async fn start_checkout(
        &self,
        sdk: Arc<dyn CheckoutSdk>,
        user: Option<&CurrentUser>,
    ) -> AppResult<CheckoutProvider> {
        let provider = CheckoutProvider::new(
            sdk,
            self.config.checkout.clone(),
            self.events.clone(),
            self.metrics.clone(),
        );
        provider
            .initialize(user)
            .await
            .map_err(|err| AppError::ui("checkout.initialize", err))?;
        Ok(provider)
    }
}

/// Load configuration from the environment, install logging and report the
/// effective settings.
///
/// # Errors
///
/// Returns an error if configuration loading or telemetry setup fails.
pub fn run_app() -> AppResult<AppContext> {
    let config = AtelierConfig::from_env().map_err(|err| AppError::config("config.from_env", err))?;
    let context = AppContext::from_config(config)?;
    let _context_guard = GlobalContextGuard::new("bootstrap");

    let config = context.config();
    info!(
        debounce_ms = config.listing.debounce_ms,
        page_limit = config.listing.page_limit,
        checkout_enabled = config.checkout.enabled_token().is_some(),
        checkout_environment = %config.checkout.environment,
        site = %config.profile.site_name,
        "Atelier application context ready"
    );
    Ok(context)
}
