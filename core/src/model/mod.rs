pub mod filter;
pub mod snapshot;
pub mod task;
