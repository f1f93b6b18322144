//! Autoclick: domain-scoped CSS selector auto-click rules.
//!
//! Rules pair a domain with a CSS selector. When a page on a matching domain
//! loads, the first visible element matching the selector is clicked once.
//! This library crate exposes all modules for use by the binary and
//! integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod page;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
