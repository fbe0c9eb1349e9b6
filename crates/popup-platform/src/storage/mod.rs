pub mod memory;
pub mod chrome;
pub mod auto;

pub use memory::MemoryStorage;
pub use chrome::ChromeStorage;
pub use auto::auto_detect_storage;
