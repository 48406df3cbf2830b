use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub division_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<String>,
}

/// Storefront configuration: store/division identity and the localized text.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppConfiguration {
    pub experience: Experience,
    #[serde(default)]
    pub language_pack: HashMap<String, String>,
}

impl AppConfiguration {
    pub fn text(&self, key: &str) -> Option<&str> {
        self.language_pack.get(key).map(String::as_str)
    }
}
