//! Gemini model client and content generator for Wayfinder.
//!
//! [`ContentDriver`] is the seam between the pipeline and a concrete model
//! backend; [`GeminiClient`] implements it over the REST structured-output
//! endpoint, and [`ContentGenerator`] adds prompt assembly, JSON parsing,
//! schema checking, and retry on top.

mod client;
mod driver;
mod dto;
mod generator;
mod retry;

pub use client::GeminiClient;
pub use driver::{ContentDriver, DriverRequest, DriverResponse};
pub use generator::{ContentGenerator, GeneratorConfig};
pub use retry::{RetryConfig, retry_with_backoff};
