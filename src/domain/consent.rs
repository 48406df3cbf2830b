use serde::{Deserialize, Serialize};

/// Category of user agreement attached to an order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsentType {
    /// Privacy policy and terms of service.
    #[serde(rename = "PPANDTOS")]
    PpAndTos,
    /// Upsell offers after checkout.
    #[serde(rename = "NEXTSELL")]
    NextSell,
    Newsletter,
    Marketing,
    #[serde(other)]
    Other,
}

impl ConsentType {
    /// Whether consents of this type are forwarded to the order.
    pub fn is_order_consent(self) -> bool {
        matches!(self, Self::PpAndTos | Self::NextSell)
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Consent {
    pub consent_template_id: String,
    pub consent_template_type: ConsentType,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Consent {
    pub fn new(template_id: impl Into<String>, template_type: ConsentType, accepted: bool) -> Self {
        Self {
            consent_template_id: template_id.into(),
            consent_template_type: template_type,
            accepted,
            version: None,
        }
    }
}

/// Keeps only the consents that belong on an order, preserving their order.
pub fn order_consents(consents: Vec<Consent>) -> Vec<Consent> {
    consents
        .into_iter()
        .filter(|consent| consent.consent_template_type.is_order_consent())
        .collect()
}
