pub mod use_cases;

pub use use_cases::color_analyzer::analyze_colors;
pub use use_cases::color_extractor::extract_colors;
pub use use_cases::fibonacci::{fibonacci_sum, DEFAULT_FIBONACCI_TERMS};
