pub mod prediction;
pub mod profile;
