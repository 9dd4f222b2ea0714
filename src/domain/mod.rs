pub mod color;
pub mod db_config;
pub mod error;
