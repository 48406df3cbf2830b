pub const DEFAULT_GATEWAY_PROVIDER: &str = "klarna-checkout";
pub const DEFAULT_CART_PATH: &str = "cart";
pub const DEFAULT_RESULT_PATH: &str = "redirect-result/checkout";
pub const DEFAULT_CONTAINER: &str = "paymentMethodContainer";
pub const DEFAULT_UNKNOWN_ERROR_KEY: &str = "general.errors.unknown";

/// Tunables of the checkout component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// `gatewayProviderName` of the payment configuration to use.
    pub gateway_provider: String,
    /// Route (below the locale) the shopper is sent back to on exit.
    pub cart_path: String,
    /// Route (below the locale) the gateway redirects to on success or cancel.
    pub result_path: String,
    /// Element the widget markup is rendered into.
    pub container: String,
    /// Language pack key of the alert text.
    pub unknown_error_key: String,
    /// Alert text when the language pack is not available.
    pub fallback_error_message: String,
    /// Description attached to the debug log entry of a failed run.
    pub failure_description: String,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            gateway_provider: DEFAULT_GATEWAY_PROVIDER.to_string(),
            cart_path: DEFAULT_CART_PATH.to_string(),
            result_path: DEFAULT_RESULT_PATH.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
            unknown_error_key: DEFAULT_UNKNOWN_ERROR_KEY.to_string(),
            fallback_error_message: "An unknown error occurred.".to_string(),
            failure_description: "Klarna Checkout could not be initialized.".to_string(),
        }
    }
}

impl CheckoutConfig {
    pub fn with_gateway_provider(mut self, provider: impl Into<String>) -> Self {
        self.gateway_provider = provider.into();
        self
    }

    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = container.into();
        self
    }
}
