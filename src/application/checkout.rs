use crate::config::CheckoutConfig;
use crate::domain::configuration::AppConfiguration;
use crate::domain::consent::order_consents;
use crate::domain::locale::LocaleTag;
use crate::domain::order::{CalculatedCost, Order, OrderPatch, RequestOptions};
use crate::domain::payment::{
    ActiveConfiguration, BrowserInfo, Channel, InitiatePaymentRequest, find_gateway,
};
use crate::domain::ports::CheckoutServices;
use crate::error::{CheckoutError, Result};
use crate::interfaces::json::safe_log::{LogValue, to_safe_value};
use serde::Serialize;
use serde_json::json;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// State gathered during one checkout run. Each field is written once, by the
/// step that fetches it, and only read by later steps.
#[derive(Debug, Default, Clone)]
pub struct CheckoutContext {
    pub locale: Option<LocaleTag>,
    pub draft_order: Option<Order>,
    pub app_configuration: Option<AppConfiguration>,
    pub session_id: Option<String>,
}

/// How a checkout run ended.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// The payment widget was rendered into the container.
    Rendered {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
    /// No draft order; the shopper was sent back to the cart.
    EmptyCart,
    /// No matching payment gateway; the shopper was sent back to the cart.
    GatewayUnavailable,
    /// The gateway returned nothing to render.
    NoPaymentSession,
    /// A step failed and the failure was reported.
    Failed { message: String },
}

#[derive(Debug, Clone)]
pub struct CheckoutRun {
    pub outcome: CheckoutOutcome,
    pub context: CheckoutContext,
}

/// Drives the hosted payment checkout from cart to rendered widget.
///
/// Steps run strictly one after another: locale, draft order, app configuration,
/// consent update, shipping cost, gateway lookup, session initiation, rendering.
/// Missing cart or gateway are ordinary exits; anything that fails is reported
/// once, after which the shopper is returned to the cart.
pub struct KlarnaCheckout {
    services: CheckoutServices,
    config: CheckoutConfig,
    pending_logs: Mutex<Vec<JoinHandle<()>>>,
}

impl KlarnaCheckout {
    /// Creates a new checkout over the given collaborators.
    pub fn new(services: CheckoutServices, config: CheckoutConfig) -> Self {
        Self {
            services,
            config,
            pending_logs: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Waits for debug log deliveries started by failed runs. `initialize`
    /// never waits for them itself.
    pub async fn flush_logs(&self) {
        let pending = std::mem::take(&mut *self.pending_logs.lock().await);
        for delivery in pending {
            if let Err(join_err) = delivery.await {
                warn!(error = %join_err, "debug log task aborted");
            }
        }
    }

    /// Runs the checkout and handles any failure. Never returns an error.
    #[tracing::instrument(skip_all, fields(provider = %self.config.gateway_provider))]
    pub async fn initialize(&self) -> CheckoutRun {
        let mut context = CheckoutContext::default();
        let outcome = match self.run(&mut context).await {
            Ok(outcome) => {
                info!(?outcome, "checkout initialized");
                outcome
            }
            Err(err) => {
                self.handle_failure(&context, &err).await;
                CheckoutOutcome::Failed {
                    message: err.message(),
                }
            }
        };
        CheckoutRun { outcome, context }
    }

    /// Runs the pipeline, returning the first error unhandled.
    pub async fn run(&self, context: &mut CheckoutContext) -> Result<CheckoutOutcome> {
        let locale = self.services.locale.get().await?.tag();
        debug!(%locale, "locale resolved");
        context.locale = Some(locale.clone());

        let Some(order) = self.services.cart.draft_order().await? else {
            info!("no draft order, returning to cart");
            self.navigate_to_cart(Some(&locale)).await?;
            return Ok(CheckoutOutcome::EmptyCart);
        };
        debug!(order_id = %order.order_id, "draft order loaded");
        context.draft_order = Some(order.clone());

        let app_configuration = self.services.app_configuration.app_configuration().await?;
        let division_id = app_configuration.experience.division_id.clone();
        context.app_configuration = Some(app_configuration);

        let consents = self
            .services
            .consents
            .consents_status()
            .await?
            .map(order_consents);
        self.services
            .orders
            .update_order(
                &order.order_id,
                OrderPatch::consent(consents),
                RequestOptions::with_order_lines(),
            )
            .await?;
        debug!("order consents updated");

        self.conditional_calculate_cost(&order).await?;

        let configs = self
            .services
            .payments
            .active_configurations(&division_id)
            .await?;
        let Some(gateway) = find_gateway(&configs, &self.config.gateway_provider) else {
            info!(%division_id, "no matching payment gateway, returning to cart");
            self.navigate_to_cart(Some(&locale)).await?;
            return Ok(CheckoutOutcome::GatewayUnavailable);
        };

        let request = self.initiate_request(&locale, gateway, &order);
        let Some(response) = self.services.payments.initiate(request).await? else {
            debug!("gateway returned no payment session");
            return Ok(CheckoutOutcome::NoPaymentSession);
        };
        let session_id = response.upscale_payment_session_id.clone();
        context.session_id = Some(session_id.clone());

        self.services
            .open_payment
            .load_resources(response.resources())
            .await?;
        self.services
            .open_payment
            .render_html(&self.config.container, response.html())
            .await?;

        Ok(CheckoutOutcome::Rendered { session_id })
    }

    /// Recalculates shipping cost when the order already has somewhere to ship to.
    pub async fn conditional_calculate_cost(&self, order: &Order) -> Result<Option<CalculatedCost>> {
        let Some(address) = order.shipping_address.as_ref() else {
            return Ok(None);
        };

        let cost = self
            .services
            .orders
            .calculate_cost(
                &order.order_id,
                OrderPatch::shipping_address(address.cost_region()),
                RequestOptions::with_order_lines(),
            )
            .await?;
        debug!(total = %cost.total_amount, "shipping cost recalculated");
        Ok(Some(cost))
    }

    fn initiate_request(
        &self,
        locale: &LocaleTag,
        gateway: &ActiveConfiguration,
        order: &Order,
    ) -> InitiatePaymentRequest {
        let environment = &self.services.environment;
        let base_uri = environment.base_uri().unwrap_or_default();
        let url = format!("{base_uri}{locale}/{}", self.config.result_path);

        InitiatePaymentRequest {
            account_id: gateway.id.clone(),
            order_id: order.order_id.clone(),
            result_url: url.clone(),
            cancel_url: url,
            channel: Channel::Browser,
            browser_info: BrowserInfo::from_snapshot(
                environment.snapshot(),
                environment.timezone_offset(),
            ),
        }
    }

    async fn navigate_to_cart(&self, locale: Option<&LocaleTag>) -> Result<()> {
        let mut segments = Vec::with_capacity(2);
        if let Some(locale) = locale {
            segments.push(locale.as_str());
        }
        segments.push(self.config.cart_path.as_str());
        self.services.navigator.navigate(&segments).await
    }

    async fn handle_failure(&self, context: &CheckoutContext, err: &CheckoutError) {
        let alert = context
            .app_configuration
            .as_ref()
            .and_then(|config| config.text(&self.config.unknown_error_key))
            .unwrap_or(self.config.fallback_error_message.as_str());
        self.services.environment.alert(alert).await;

        let logger = self.services.logger.clone();
        let content = self.failure_report(err);
        let delivery = tokio::spawn(async move {
            if let Err(log_err) = logger.debug_log(content).await {
                warn!(error = %log_err, "debug log rejected");
            }
        });
        self.pending_logs.lock().await.push(delivery);

        error!("PAYMENT_INIT_FAILED: {}", err.message());

        if let Err(nav_err) = self.navigate_to_cart(context.locale.as_ref()).await {
            warn!(error = %nav_err, "could not return to cart");
        }
    }

    /// Builds and serializes the debug log entry. The log tree is not `Send`, so
    /// it never outlives this call.
    fn failure_report(&self, err: &CheckoutError) -> String {
        let mut error = json!({ "message": err.message() });
        if let Some(status) = err.status() {
            error["status"] = status.into();
        }
        let report = LogValue::from(json!({
            "description": self.config.failure_description,
            "error": error,
        }));
        to_safe_value(&report).to_string()
    }
}
