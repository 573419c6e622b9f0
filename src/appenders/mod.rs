//! Appender implementations

pub mod async_appender;
pub mod forwarding;
pub mod memory;

#[cfg(feature = "console")]
pub mod console;

#[cfg(feature = "file")]
pub mod file;

pub use async_appender::{AsyncAppender, DEFAULT_SHUTDOWN_TIMEOUT};
pub use forwarding::ForwardingAppender;
pub use memory::MemoryAppender;

#[cfg(feature = "console")]
pub use console::ConsoleAppender;

#[cfg(feature = "file")]
pub use file::FileAppender;

pub use crate::core::Appender;
