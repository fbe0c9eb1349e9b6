pub mod message;
pub mod conversation;
pub mod page;
pub mod event;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::PopupError;
pub type Result<T> = std::result::Result<T, PopupError>;
