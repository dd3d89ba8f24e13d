pub mod keyword;
pub mod score;
