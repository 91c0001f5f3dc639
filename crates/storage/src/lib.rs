#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod memory;
mod seed;

pub use memory::MemoryRepository;
pub use seed::{Seed, SeedError};
