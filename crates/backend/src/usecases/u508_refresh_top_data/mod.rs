pub mod executor;
pub mod slot_publisher;

pub use executor::RefreshExecutor;
