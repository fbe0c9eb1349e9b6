pub mod puter;

pub use puter::PuterChat;
