// Library modules shared by the binary and the integration tests
pub mod audio;
pub mod chunking;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pdf;
pub mod progress;
pub mod rate_limit;
pub mod services;
pub mod session;
pub mod text_processing;
pub mod tts;
