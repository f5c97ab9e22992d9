pub mod compute;
pub mod entities;
pub mod input;
pub mod memory;
