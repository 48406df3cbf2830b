use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CountryInfo {
    pub country_code: String,
}

/// A locale the storefront is configured to serve.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SupportedLocale {
    pub language: String,
    pub country_info: CountryInfo,
}

impl SupportedLocale {
    pub fn new(language: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            country_info: CountryInfo {
                country_code: country_code.into(),
            },
        }
    }

    pub fn tag(&self) -> LocaleTag {
        LocaleTag(format!(
            "{}-{}",
            self.language, self.country_info.country_code
        ))
    }
}

/// A `language-COUNTRY` tag, used as the first segment of storefront routes.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct LocaleTag(String);

impl LocaleTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
