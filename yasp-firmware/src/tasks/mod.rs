//! Embassy async tasks

pub mod serial;

pub use serial::serial_task;
