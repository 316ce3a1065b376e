pub mod client;
pub mod models;
pub mod response;
pub mod service;

pub use client::OpenAiClient;
pub use service::LlmService;
