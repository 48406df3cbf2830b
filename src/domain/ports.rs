use super::configuration::AppConfiguration;
use super::consent::Consent;
use super::locale::SupportedLocale;
use super::order::{CalculatedCost, Order, OrderPatch, RequestOptions};
use super::payment::{
    ActiveConfiguration, BrowserSnapshot, InitOpenPaymentResponse, InitiatePaymentRequest,
    PaymentResources,
};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait LocaleService: Send + Sync {
    async fn get(&self) -> Result<SupportedLocale>;
}

#[async_trait]
pub trait CartService: Send + Sync {
    /// The shopper's current draft order, if the cart holds one.
    async fn draft_order(&self) -> Result<Option<Order>>;
}

#[async_trait]
pub trait AppConfigurationService: Send + Sync {
    async fn app_configuration(&self) -> Result<AppConfiguration>;
}

#[async_trait]
pub trait ConsentService: Send + Sync {
    async fn consents_status(&self) -> Result<Option<Vec<Consent>>>;
}

#[async_trait]
pub trait OrderBroker: Send + Sync {
    async fn update_order(
        &self,
        order_id: &str,
        patch: OrderPatch,
        options: RequestOptions,
    ) -> Result<Order>;
    async fn calculate_cost(
        &self,
        order_id: &str,
        patch: OrderPatch,
        options: RequestOptions,
    ) -> Result<CalculatedCost>;
}

#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn active_configurations(&self, division_id: &str) -> Result<Vec<ActiveConfiguration>>;
    /// Opens a hosted payment session. `None` means the gateway had nothing to render.
    async fn initiate(
        &self,
        request: InitiatePaymentRequest,
    ) -> Result<Option<InitOpenPaymentResponse>>;
}

#[async_trait]
pub trait OpenPaymentService: Send + Sync {
    async fn load_resources(&self, resources: PaymentResources) -> Result<()>;
    async fn render_html(&self, container: &str, html: &str) -> Result<()>;
}

#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, segments: &[&str]) -> Result<()>;
}

#[async_trait]
pub trait AppLogger: Send + Sync {
    async fn debug_log(&self, content: String) -> Result<()>;
}

/// Access to the hosting page: `window`, `document` and the user-facing alert.
#[async_trait]
pub trait BrowserEnvironment: Send + Sync {
    fn snapshot(&self) -> BrowserSnapshot;
    fn base_uri(&self) -> Option<String>;
    fn timezone_offset(&self) -> i32;
    async fn alert(&self, message: &str);
}

pub type LocaleServiceBox = Box<dyn LocaleService>;
pub type CartServiceBox = Box<dyn CartService>;
pub type AppConfigurationServiceBox = Box<dyn AppConfigurationService>;
pub type ConsentServiceBox = Box<dyn ConsentService>;
pub type OrderBrokerBox = Box<dyn OrderBroker>;
pub type PaymentServiceBox = Box<dyn PaymentService>;
pub type OpenPaymentServiceBox = Box<dyn OpenPaymentService>;
pub type NavigatorBox = Box<dyn Navigator>;
/// Shared so a log delivery can outlive the call that started it.
pub type SharedAppLogger = Arc<dyn AppLogger>;
pub type BrowserEnvironmentBox = Box<dyn BrowserEnvironment>;

/// Every collaborator the checkout talks to.
pub struct CheckoutServices {
    pub locale: LocaleServiceBox,
    pub cart: CartServiceBox,
    pub app_configuration: AppConfigurationServiceBox,
    pub consents: ConsentServiceBox,
    pub orders: OrderBrokerBox,
    pub payments: PaymentServiceBox,
    pub open_payment: OpenPaymentServiceBox,
    pub navigator: NavigatorBox,
    pub logger: SharedAppLogger,
    pub environment: BrowserEnvironmentBox,
}
