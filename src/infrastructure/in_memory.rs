use crate::domain::configuration::AppConfiguration;
use crate::domain::consent::Consent;
use crate::domain::locale::SupportedLocale;
use crate::domain::order::{CalculatedCost, Order, OrderPatch, RequestOptions};
use crate::domain::payment::{
    ActiveConfiguration, BrowserSnapshot, InitOpenPaymentResponse, InitiatePaymentRequest,
    PaymentResources,
};
use crate::domain::ports::{
    AppConfigurationService, AppLogger, BrowserEnvironment, CartService, CheckoutServices,
    ConsentService, LocaleService, Navigator, OpenPaymentService, OrderBroker, PaymentService,
};
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A collaborator call a fault can be attached to.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Locale,
    DraftOrder,
    AppConfiguration,
    Consents,
    UpdateOrder,
    CalculateCost,
    PaymentConfigurations,
    Initiate,
    LoadResources,
    RenderHtml,
    Navigate,
    DebugLog,
}

impl Step {
    fn service(self) -> &'static str {
        match self {
            Step::Locale => "locale",
            Step::DraftOrder => "cart",
            Step::AppConfiguration => "app-configuration",
            Step::Consents => "consent",
            Step::UpdateOrder | Step::CalculateCost => "order-broker",
            Step::PaymentConfigurations | Step::Initiate => "payment",
            Step::LoadResources | Step::RenderHtml => "open-payment",
            Step::Navigate => "router",
            Step::DebugLog => "app-logger",
        }
    }
}

/// A canned failure returned instead of the collaborator's response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct ServiceFault {
    #[serde(default)]
    pub status: Option<u16>,
    pub message: String,
}

impl ServiceFault {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn to_error(&self, step: Step) -> CheckoutError {
        match step {
            Step::Navigate => CheckoutError::NavigationError(self.message.clone()),
            _ => CheckoutError::service(step.service(), self.status, self.message.clone()),
        }
    }
}

/// One call made by the checkout, as observed by the in-memory storefront.
#[derive(Debug, Serialize, PartialEq, Clone)]
#[serde(tag = "call", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServiceCall {
    GetLocale,
    GetDraftOrder,
    GetAppConfiguration,
    GetConsents,
    UpdateOrder {
        order_id: String,
        patch: OrderPatch,
        options: RequestOptions,
    },
    CalculateCost {
        order_id: String,
        patch: OrderPatch,
        options: RequestOptions,
    },
    GetActiveConfigurations {
        division_id: String,
    },
    Initiate {
        request: InitiatePaymentRequest,
    },
    LoadResources {
        resources: PaymentResources,
    },
    RenderHtml {
        container: String,
        html: String,
    },
    Navigate {
        path: String,
    },
    Alert {
        message: String,
    },
    DebugLog {
        content: String,
    },
}

impl ServiceCall {
    pub fn name(&self) -> &'static str {
        match self {
            ServiceCall::GetLocale => "getLocale",
            ServiceCall::GetDraftOrder => "getDraftOrder",
            ServiceCall::GetAppConfiguration => "getAppConfiguration",
            ServiceCall::GetConsents => "getConsents",
            ServiceCall::UpdateOrder { .. } => "updateOrder",
            ServiceCall::CalculateCost { .. } => "calculateCost",
            ServiceCall::GetActiveConfigurations { .. } => "getActiveConfigurations",
            ServiceCall::Initiate { .. } => "initiate",
            ServiceCall::LoadResources { .. } => "loadResources",
            ServiceCall::RenderHtml { .. } => "renderHtml",
            ServiceCall::Navigate { .. } => "navigate",
            ServiceCall::Alert { .. } => "alert",
            ServiceCall::DebugLog { .. } => "debugLog",
        }
    }
}

/// Ordered record of every call, shared by all clones of a storefront.
#[derive(Default, Clone)]
pub struct CallLog {
    calls: Arc<RwLock<Vec<ServiceCall>>>,
}

impl CallLog {
    pub async fn record(&self, call: ServiceCall) {
        self.calls.write().await.push(call);
    }

    pub async fn snapshot(&self) -> Vec<ServiceCall> {
        self.calls.read().await.clone()
    }
}

/// Seed data for an [`InMemoryStorefront`].
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub locale: SupportedLocale,
    #[serde(default)]
    pub draft_order: Option<Order>,
    #[serde(default)]
    pub app_configuration: AppConfiguration,
    #[serde(default)]
    pub consents: Option<Vec<Consent>>,
    #[serde(default)]
    pub calculated_cost: Option<CalculatedCost>,
    #[serde(default)]
    pub payment_configurations: Vec<ActiveConfiguration>,
    #[serde(default)]
    pub init_response: Option<InitOpenPaymentResponse>,
    #[serde(default)]
    pub browser: BrowserSnapshot,
    #[serde(default)]
    pub base_uri: Option<String>,
    #[serde(default)]
    pub timezone_offset: i32,
    #[serde(default)]
    pub faults: HashMap<Step, ServiceFault>,
}

impl Scenario {
    /// Creates a new scenario with an empty cart and no faults.
    pub fn new(locale: SupportedLocale) -> Self {
        Self {
            locale,
            draft_order: None,
            app_configuration: AppConfiguration::default(),
            consents: None,
            calculated_cost: None,
            payment_configurations: Vec::new(),
            init_response: None,
            browser: BrowserSnapshot::default(),
            base_uri: None,
            timezone_offset: 0,
            faults: HashMap::new(),
        }
    }

    pub fn with_fault(mut self, step: Step, fault: ServiceFault) -> Self {
        self.faults.insert(step, fault);
        self
    }
}

/// Page-level readings, fixed for the lifetime of the storefront.
struct PageEnvironment {
    browser: BrowserSnapshot,
    base_uri: Option<String>,
    timezone_offset: i32,
}

/// A storefront held entirely in memory that implements every checkout port.
///
/// Clones share state, so the same storefront can be handed to the checkout
/// as separate boxed collaborators and inspected afterwards.
#[derive(Clone)]
pub struct InMemoryStorefront {
    state: Arc<RwLock<Scenario>>,
    page: Arc<PageEnvironment>,
    rendered: Arc<RwLock<HashMap<String, String>>>,
    calls: CallLog,
}

impl InMemoryStorefront {
    /// Creates a new storefront seeded from `scenario`.
    pub fn new(scenario: Scenario) -> Self {
        let page = PageEnvironment {
            browser: scenario.browser.clone(),
            base_uri: scenario.base_uri.clone(),
            timezone_offset: scenario.timezone_offset,
        };
        Self {
            state: Arc::new(RwLock::new(scenario)),
            page: Arc::new(page),
            rendered: Arc::default(),
            calls: CallLog::default(),
        }
    }

    /// Boxes a clone of this storefront behind every port.
    pub fn services(&self) -> CheckoutServices {
        CheckoutServices {
            locale: Box::new(self.clone()),
            cart: Box::new(self.clone()),
            app_configuration: Box::new(self.clone()),
            consents: Box::new(self.clone()),
            orders: Box::new(self.clone()),
            payments: Box::new(self.clone()),
            open_payment: Box::new(self.clone()),
            navigator: Box::new(self.clone()),
            logger: Arc::new(self.clone()),
            environment: Box::new(self.clone()),
        }
    }

    pub async fn calls(&self) -> Vec<ServiceCall> {
        self.calls.snapshot().await
    }

    /// Markup rendered into `container`, if any.
    pub async fn rendered(&self, container: &str) -> Option<String> {
        self.rendered.read().await.get(container).cloned()
    }

    /// The draft order as the storefront currently holds it.
    pub async fn current_order(&self) -> Option<Order> {
        self.state.read().await.draft_order.clone()
    }

    async fn check(&self, step: Step) -> Result<()> {
        match self.state.read().await.faults.get(&step) {
            Some(fault) => Err(fault.to_error(step)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl LocaleService for InMemoryStorefront {
    async fn get(&self) -> Result<SupportedLocale> {
        self.calls.record(ServiceCall::GetLocale).await;
        self.check(Step::Locale).await?;
        Ok(self.state.read().await.locale.clone())
    }
}

#[async_trait]
impl CartService for InMemoryStorefront {
    async fn draft_order(&self) -> Result<Option<Order>> {
        self.calls.record(ServiceCall::GetDraftOrder).await;
        self.check(Step::DraftOrder).await?;
        Ok(self.state.read().await.draft_order.clone())
    }
}

#[async_trait]
impl AppConfigurationService for InMemoryStorefront {
    async fn app_configuration(&self) -> Result<AppConfiguration> {
        self.calls.record(ServiceCall::GetAppConfiguration).await;
        self.check(Step::AppConfiguration).await?;
        Ok(self.state.read().await.app_configuration.clone())
    }
}

#[async_trait]
impl ConsentService for InMemoryStorefront {
    async fn consents_status(&self) -> Result<Option<Vec<Consent>>> {
        self.calls.record(ServiceCall::GetConsents).await;
        self.check(Step::Consents).await?;
        Ok(self.state.read().await.consents.clone())
    }
}

#[async_trait]
impl OrderBroker for InMemoryStorefront {
    async fn update_order(
        &self,
        order_id: &str,
        patch: OrderPatch,
        options: RequestOptions,
    ) -> Result<Order> {
        self.calls
            .record(ServiceCall::UpdateOrder {
                order_id: order_id.to_string(),
                patch: patch.clone(),
                options,
            })
            .await;
        self.check(Step::UpdateOrder).await?;

        let mut state = self.state.write().await;
        match state.draft_order.as_mut() {
            Some(order) if order.order_id == order_id => {
                if let Some(consent) = patch.consent {
                    order.consent = consent;
                }
                Ok(order.clone())
            }
            _ => Err(CheckoutError::service(
                Step::UpdateOrder.service(),
                Some(404),
                format!("Order {order_id} not found"),
            )),
        }
    }

    async fn calculate_cost(
        &self,
        order_id: &str,
        patch: OrderPatch,
        options: RequestOptions,
    ) -> Result<CalculatedCost> {
        self.calls
            .record(ServiceCall::CalculateCost {
                order_id: order_id.to_string(),
                patch,
                options,
            })
            .await;
        self.check(Step::CalculateCost).await?;

        let state = self.state.read().await;
        Ok(state.calculated_cost.clone().unwrap_or_else(|| CalculatedCost {
            order_id: order_id.to_string(),
            ..CalculatedCost::default()
        }))
    }
}

#[async_trait]
impl PaymentService for InMemoryStorefront {
    async fn active_configurations(&self, division_id: &str) -> Result<Vec<ActiveConfiguration>> {
        self.calls
            .record(ServiceCall::GetActiveConfigurations {
                division_id: division_id.to_string(),
            })
            .await;
        self.check(Step::PaymentConfigurations).await?;
        Ok(self.state.read().await.payment_configurations.clone())
    }

    async fn initiate(
        &self,
        request: InitiatePaymentRequest,
    ) -> Result<Option<InitOpenPaymentResponse>> {
        self.calls.record(ServiceCall::Initiate { request }).await;
        self.check(Step::Initiate).await?;
        Ok(self.state.read().await.init_response.clone())
    }
}

#[async_trait]
impl OpenPaymentService for InMemoryStorefront {
    async fn load_resources(&self, resources: PaymentResources) -> Result<()> {
        self.calls
            .record(ServiceCall::LoadResources { resources })
            .await;
        self.check(Step::LoadResources).await
    }

    async fn render_html(&self, container: &str, html: &str) -> Result<()> {
        self.calls
            .record(ServiceCall::RenderHtml {
                container: container.to_string(),
                html: html.to_string(),
            })
            .await;
        self.check(Step::RenderHtml).await?;
        self.rendered
            .write()
            .await
            .insert(container.to_string(), html.to_string());
        Ok(())
    }
}

#[async_trait]
impl Navigator for InMemoryStorefront {
    async fn navigate(&self, segments: &[&str]) -> Result<()> {
        self.calls
            .record(ServiceCall::Navigate {
                path: segments.join("/"),
            })
            .await;
        self.check(Step::Navigate).await
    }
}

#[async_trait]
impl AppLogger for InMemoryStorefront {
    async fn debug_log(&self, content: String) -> Result<()> {
        self.calls.record(ServiceCall::DebugLog { content }).await;
        self.check(Step::DebugLog).await
    }
}

#[async_trait]
impl BrowserEnvironment for InMemoryStorefront {
    fn snapshot(&self) -> BrowserSnapshot {
        self.page.browser.clone()
    }

    fn base_uri(&self) -> Option<String> {
        self.page.base_uri.clone()
    }

    fn timezone_offset(&self) -> i32 {
        self.page.timezone_offset
    }

    async fn alert(&self, message: &str) {
        self.calls
            .record(ServiceCall::Alert {
                message: message.to_string(),
            })
            .await;
    }
}
