pub mod key_detector;
pub mod top_n;

pub use key_detector::detect_keys;
pub use top_n::extract_top;
