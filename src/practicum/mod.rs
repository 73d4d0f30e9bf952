pub mod checks;
pub mod client;
