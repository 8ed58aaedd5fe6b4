pub mod pattern;
pub mod profile;
