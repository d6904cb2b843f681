//! Wrappers around third-party browser SDKs.

pub mod checkout;

pub use checkout::{CheckoutProvider, checkout_options, forward_checkout_event};
