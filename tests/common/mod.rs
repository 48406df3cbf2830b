#![allow(dead_code)]

use klarna_checkout::application::checkout::KlarnaCheckout;
use klarna_checkout::config::CheckoutConfig;
use klarna_checkout::infrastructure::in_memory::{InMemoryStorefront, Scenario, ServiceCall};
use serde_json::Value;
use std::io::Write;
use tempfile::NamedTempFile;

pub const HAPPY_PATH: &str = include_str!("../fixtures/happy_path.json");

pub fn scenario_json() -> Value {
    serde_json::from_str(HAPPY_PATH).expect("fixture is valid JSON")
}

pub fn scenario() -> Scenario {
    serde_json::from_value(scenario_json()).expect("fixture is a valid scenario")
}

pub fn checkout(scenario: Scenario) -> (KlarnaCheckout, InMemoryStorefront) {
    let storefront = InMemoryStorefront::new(scenario);
    let checkout = KlarnaCheckout::new(storefront.services(), CheckoutConfig::default());
    (checkout, storefront)
}

pub fn write_scenario(value: &Value) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{value}").expect("write scenario");
    file
}

pub fn names(calls: &[ServiceCall]) -> Vec<&'static str> {
    calls.iter().map(ServiceCall::name).collect()
}

pub fn count(calls: &[ServiceCall], name: &str) -> usize {
    calls.iter().filter(|call| call.name() == name).count()
}
