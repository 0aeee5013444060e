pub mod admin;
pub mod translate;
