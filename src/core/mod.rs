pub mod assembler;
pub mod binary;
pub mod classifier;
pub mod extractor;
pub mod file_selector;
