//! Storage layer for Expense Card
//!
//! Provides key-value slots backed by JSON files with atomic writes, plus an
//! in-memory variant.

pub mod file_io;
pub mod slot;

pub use file_io::{read_if_exists, write_atomic};
pub use slot::{FileSlotStore, MemorySlotStore, SlotStore};
