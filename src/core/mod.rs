pub mod add;
pub mod analytics;
pub mod del;
pub mod import;
pub mod log;
pub mod logic;
pub mod provider;
