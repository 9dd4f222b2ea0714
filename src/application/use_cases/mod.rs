pub mod color_analyzer;
pub mod color_extractor;
pub mod fibonacci;
