// Request/response mediation layer.
// Builders turn user text into model requests, decoders turn raw replies into typed
// results, and the facade composes them. All model calls go through llm_client.

pub mod builders;
pub mod decode;
pub mod error;
pub mod facade;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod retry;
pub mod schemas;

pub use error::MediationError;
pub use facade::Mediator;
