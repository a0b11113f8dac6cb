pub mod similarity;

pub use similarity::{levenshtein, similarity, TITLE_MATCH_THRESHOLD};
