//! The itinerary generator: prompt assembly and stream relay.

use std::sync::{Arc, Mutex};

use futures::stream::{self, BoxStream, StreamExt};
use log::debug;

use crate::error::AiResult;
use crate::prompt_template::{build_user_prompt, system_prompt};
use crate::providers::ChatCompletionClient;
use crate::types::{GenerationRequest, SuggestionEvent, TripContext};

/// Tuning knobs for generation, resolved from server config.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
        }
    }
}

pub struct ItineraryGenerator {
    client: Arc<dyn ChatCompletionClient>,
    config: GeneratorConfig,
}

impl ItineraryGenerator {
    pub fn new(client: Arc<dyn ChatCompletionClient>, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Streams suggestion events for the given trip context. The stream
    /// always terminates with either `Done` (carrying the concatenated
    /// text) or a single `Error` event.
    pub async fn generate(
        &self,
        context: TripContext,
    ) -> AiResult<BoxStream<'static, SuggestionEvent>> {
        let request = GenerationRequest {
            model: self.config.model.clone(),
            system_prompt: system_prompt().to_string(),
            user_prompt: build_user_prompt(&context),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };
        debug!(
            "Generating itinerary for '{}' ({} candidate activities)",
            context.trip_name,
            context.candidate_activities.len()
        );

        let deltas = self.client.stream_completion(request).await?;

        let accumulated = Arc::new(Mutex::new(String::new()));
        let accumulated_for_done = accumulated.clone();

        // Relay deltas as they arrive; a mid-stream provider error becomes a
        // terminal Error event rather than a broken connection.
        let events = deltas
            .map(move |result| match result {
                Ok(delta) => {
                    accumulated.lock().unwrap().push_str(&delta);
                    SuggestionEvent::TextDelta { delta }
                }
                Err(e) => SuggestionEvent::Error {
                    message: e.to_string(),
                },
            })
            .chain(stream::once(futures::future::lazy(move |_| {
                SuggestionEvent::Done {
                    full_text: accumulated_for_done.lock().unwrap().clone(),
                }
            })))
            .scan(false, |errored, event| {
                // The first Error event is terminal; everything after it
                // (including the trailing Done) is dropped.
                if *errored {
                    return futures::future::ready(None);
                }
                if matches!(event, SuggestionEvent::Error { .. }) {
                    *errored = true;
                }
                futures::future::ready(Some(event))
            })
            .boxed();

        Ok(events)
    }
}
