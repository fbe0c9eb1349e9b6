//! Page Assistant core: conversation store, prompt assembly, chat session
//! and the popup controller, written against port traits only.

pub mod actions;
pub mod capture;
pub mod controller;
pub mod event_bus;
pub mod ports;
pub mod prompt;
pub mod session;
pub mod settings;
pub mod store;
