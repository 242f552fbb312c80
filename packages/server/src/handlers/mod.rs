pub mod blog;
pub mod file;
