pub mod add;
pub mod config;
pub mod db;
pub mod del;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod locations;
pub mod log;
pub mod merchants;
pub mod series;
pub mod summary;
pub mod weekly;
