pub mod aggregate;
pub mod cli;
pub mod error;
pub mod exit;
pub mod parser;
pub mod report;
pub mod types;
