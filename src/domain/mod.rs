//! Storefront entities and the ports through which the checkout reaches them.

pub mod configuration;
pub mod consent;
pub mod locale;
pub mod order;
pub mod payment;
pub mod ports;
