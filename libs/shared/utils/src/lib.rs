pub mod extractor;
pub mod generation;
pub mod jwt;
pub mod test_utils;
pub mod timezone;
