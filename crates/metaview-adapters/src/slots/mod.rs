//! Slot sinks.

mod file;
mod memory;

pub use file::FileSlots;
pub use memory::MemorySlots;
