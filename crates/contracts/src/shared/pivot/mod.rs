pub mod keys;
pub mod ranking;
pub mod report;

pub use keys::*;
pub use ranking::*;
pub use report::*;
