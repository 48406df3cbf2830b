//! Application layer: the checkout orchestration.
//!
//! `KlarnaCheckout` owns the boxed collaborators and runs the payment
//! initialization pipeline one awaited step at a time.

pub mod checkout;
