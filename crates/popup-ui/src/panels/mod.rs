pub mod chat;
pub mod header;
pub mod quick_actions;
