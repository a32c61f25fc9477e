// Library interface for pressbox modules
// This allows tests and other binaries to import modules

pub mod attribution;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod normalize;
pub mod pipeline;
pub mod quotes;
pub mod scraping;
pub mod server;
pub mod summarize;
