//! Tripfolio AI - the AI-assisted itinerary generator.
//!
//! This crate turns a loaded trip (dates, cities, catalog activities,
//! budget) into a prompt for an OpenAI-compatible chat-completions endpoint
//! and relays the streamed response as `SuggestionEvent`s to the HTTP layer.
//!
//! # Architecture
//!
//! - `prompt_template`: versioned prompt builders
//! - `providers`: provider catalog and the streaming `ChatCompletionClient`
//! - `generator`: the `ItineraryGenerator` orchestrating prompt → stream
//! - `types`: trip context DTOs and stream events
//! - `error`: `AiError`
//!
//! The provider client is deliberately thin: no tool loop, no retries.
//! The server relays deltas to the browser as SSE and the browser renders
//! them as they arrive.

pub mod error;
pub mod generator;
pub mod prompt_template;
pub mod providers;
pub mod types;

pub use error::{AiError, AiResult};
pub use generator::{GeneratorConfig, ItineraryGenerator};
pub use providers::{ChatCompletionClient, HttpChatClient, ProviderConfig, ProviderKind};
pub use types::{ActivityContext, GenerationRequest, SuggestionEvent, TripContext};
