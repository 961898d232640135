pub mod catalog;
pub mod date;
pub mod detector;
pub mod types;
