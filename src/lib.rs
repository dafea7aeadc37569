pub mod batch;
pub mod config;
pub mod error;
pub mod output;
pub mod pricing;
pub mod prompt;
pub mod stderr_buffer;
pub mod vehicle;
