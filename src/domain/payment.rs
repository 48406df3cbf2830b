use serde::{Deserialize, Serialize};

/// A payment gateway account configured for a division.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActiveConfiguration {
    pub id: String,
    pub gateway_provider_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_id: Option<String>,
}

impl ActiveConfiguration {
    pub fn new(id: impl Into<String>, gateway_provider_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            gateway_provider_name: gateway_provider_name.into(),
            display_name: None,
            merchant_id: None,
        }
    }
}

/// Returns the first configuration served by `provider`.
pub fn find_gateway<'a>(
    configs: &'a [ActiveConfiguration],
    provider: &str,
) -> Option<&'a ActiveConfiguration> {
    configs
        .iter()
        .find(|config| config.gateway_provider_name == provider)
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    #[default]
    Browser,
}

/// Raw readings taken from the shopper's browser.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BrowserSnapshot {
    pub color_depth: Option<u32>,
    pub java_enabled: Option<bool>,
    pub language: Option<String>,
    pub screen_height: Option<u32>,
    pub screen_width: Option<u32>,
    pub user_agent: Option<String>,
    pub origin_url: Option<String>,
}

/// Browser details the gateway needs for risk checks and 3-D Secure.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BrowserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub java_enabled: Option<bool>,
    pub java_script_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Minutes between UTC and local time (`UTC - local`).
    pub timezone_offset: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_url: Option<String>,
}

impl BrowserInfo {
    /// The page running the checkout is scripted, so JavaScript is always on.
    pub fn from_snapshot(snapshot: BrowserSnapshot, timezone_offset: i32) -> Self {
        Self {
            color_depth: snapshot.color_depth,
            java_enabled: snapshot.java_enabled,
            java_script_enabled: true,
            language: snapshot.language,
            screen_height: snapshot.screen_height,
            screen_width: snapshot.screen_width,
            user_agent: snapshot.user_agent,
            timezone_offset,
            origin_url: snapshot.origin_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InitiatePaymentRequest {
    pub account_id: String,
    pub order_id: String,
    #[serde(rename = "resultURL")]
    pub result_url: String,
    #[serde(rename = "cancelURL")]
    pub cancel_url: String,
    pub channel: Channel,
    pub browser_info: BrowserInfo,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct DynamicScript {
    pub js_urls: Vec<String>,
    pub css_urls: Vec<String>,
    pub html: Option<String>,
}

/// Gateway response to a session initiation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InitOpenPaymentResponse {
    #[serde(rename = "upscalePaymentSessionID")]
    pub upscale_payment_session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_script: Option<DynamicScript>,
}

/// Scripts and stylesheets to inject before rendering the widget.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResources {
    pub scripts: Vec<String>,
    pub styles: Vec<String>,
}

impl InitOpenPaymentResponse {
    pub fn resources(&self) -> PaymentResources {
        self.dynamic_script
            .as_ref()
            .map(|script| PaymentResources {
                scripts: script.js_urls.clone(),
                styles: script.css_urls.clone(),
            })
            .unwrap_or_default()
    }

    pub fn html(&self) -> &str {
        self.dynamic_script
            .as_ref()
            .and_then(|script| script.html.as_deref())
            .unwrap_or_default()
    }
}
