//! Mediation Facade — one entry point per tool.
//!
//! Flow: validate input → build request → gateway round trip → decode.
//!
//! No caching and no deduplication: every call is a fresh, independent round trip.
//! Retries happen only when the configured `RetryPolicy` allows them.

use std::sync::Arc;

use tracing::{info, warn};

use crate::llm_client::{ModelGateway, RawReply};
use crate::mediation::builders::{
    build_idea_request, build_metadata_request, build_script_request, build_trend_request,
    ModelRequest,
};
use crate::mediation::decode::{decode_ideas, decode_metadata, decode_script, decode_trends};
use crate::mediation::error::MediationError;
use crate::mediation::models::{FullScript, Tone, TrendResult, VideoIdea, VideoMetadata};
use crate::mediation::retry::{with_retry, RetryPolicy};

#[derive(Clone)]
pub struct Mediator {
    gateway: Arc<dyn ModelGateway>,
    retry: RetryPolicy,
}

impl Mediator {
    pub fn new(gateway: Arc<dyn ModelGateway>, retry: RetryPolicy) -> Self {
        Self { gateway, retry }
    }

    pub async fn run_trends(&self, niche: &str) -> Result<TrendResult, MediationError> {
        let niche = require_input("niche", niche)?;
        let reply = self.round_trip("trends", build_trend_request(niche)).await?;
        let trend = decode_trends(niche, reply);
        info!(
            "Trend report ready: {} chars, {} citation(s)",
            trend.narrative.len(),
            trend.citations.len()
        );
        Ok(trend)
    }

    pub async fn run_ideas(&self, topic: &str) -> Result<Vec<VideoIdea>, MediationError> {
        let topic = require_input("topic", topic)?;
        let reply = self.round_trip("ideas", build_idea_request(topic)).await?;
        let ideas = decode("ideas", decode_ideas(&reply.text))?;
        info!("Decoded {} video ideas", ideas.len());
        Ok(ideas)
    }

    pub async fn run_script(&self, idea: &str, tone: Tone) -> Result<FullScript, MediationError> {
        let idea = require_input("idea", idea)?;
        let reply = self
            .round_trip("script", build_script_request(idea, tone))
            .await?;
        let script = decode("script", decode_script(&reply.text))?;
        info!(
            "Decoded script '{}' with {} sections (tone: {})",
            script.title,
            script.sections.len(),
            tone
        );
        Ok(script)
    }

    pub async fn run_metadata(&self, context: &str) -> Result<VideoMetadata, MediationError> {
        let context = require_input("context", context)?;
        let reply = self
            .round_trip("metadata", build_metadata_request(context))
            .await?;
        let metadata = decode("metadata", decode_metadata(&reply.text))?;
        info!(
            "Decoded metadata: {} titles, {} tags",
            metadata.titles.len(),
            metadata.tags.len()
        );
        Ok(metadata)
    }

    async fn round_trip(
        &self,
        feature: &str,
        request: ModelRequest,
    ) -> Result<RawReply, MediationError> {
        info!("Submitting {feature} request to model gateway");
        let gateway = &self.gateway;
        let request = &request;
        with_retry(&self.retry, move || {
            gateway.submit(&request.prompt, &request.options)
        })
        .await
        .map_err(|e| {
            warn!("{feature} request failed upstream: {e}");
            MediationError::Upstream(e)
        })
    }
}

/// Blank input is rejected before any network call. Returns the trimmed input.
fn require_input<'a>(name: &str, value: &'a str) -> Result<&'a str, MediationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MediationError::InvalidInput(format!("{name} cannot be empty")));
    }
    Ok(trimmed)
}

fn decode<T>(feature: &str, result: Result<T, MediationError>) -> Result<T, MediationError> {
    result.map_err(|e| {
        warn!("{feature} reply rejected: {e}");
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{transport_error, MockGateway};
    use crate::llm_client::{Citation, GatewayError};
    use serde_json::json;
    use std::time::Duration;

    fn mediator(gateway: Arc<MockGateway>) -> Mediator {
        Mediator::new(gateway, RetryPolicy::none())
    }

    fn five_ideas() -> String {
        json!([
            {"title": "I Tried 10 Productivity Apps", "hook": "Only one survived", "viralScore": 91, "targetAudience": "Students"},
            {"title": "The 2-Minute Rule Is a Lie", "hook": "Here's what works", "viralScore": 78, "targetAudience": "Office workers"},
            {"title": "Deep Work for Lazy People", "hook": "No willpower needed", "viralScore": 66, "targetAudience": "Freelancers"},
            {"title": "My Notion Setup Is Gone", "hook": "Paper won", "viralScore": 54, "targetAudience": "Notion fans"},
            {"title": "I Woke Up at 5am for 30 Days", "hook": "Day 12 broke me", "viralScore": 88, "targetAudience": "Self-improvers"}
        ])
        .to_string()
    }

    #[tokio::test]
    async fn test_ideas_success_preserves_reply_order() {
        let gateway = Arc::new(MockGateway::new().with_text(&five_ideas()));
        let ideas = mediator(gateway.clone())
            .run_ideas("Productivity Hacks")
            .await
            .unwrap();

        assert_eq!(ideas.len(), 5);
        assert_eq!(ideas[0].title, "I Tried 10 Productivity Apps");
        assert_eq!(ideas[4].viral_score, 88);
        assert!(ideas.iter().all(|i| (1..=100).contains(&i.viral_score)));

        let recorded = gateway.recorded();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[0].0.contains("Productivity Hacks"));
        assert!(recorded[0].1.response_shape.is_some());
    }

    #[tokio::test]
    async fn test_trends_success_lifts_citation() {
        let gateway = Arc::new(MockGateway::new().with_reply(RawReply {
            text: "Minecraft speedrunning is trending.".to_string(),
            citations: vec![Citation {
                url: "https://example.com".to_string(),
                title: Some("Example".to_string()),
            }],
        }));
        let trend = mediator(gateway.clone()).run_trends("Minecraft").await.unwrap();

        assert_eq!(trend.narrative, "Minecraft speedrunning is trending.");
        assert_eq!(trend.citation_url.as_deref(), Some("https://example.com"));
        assert_eq!(trend.citation_title.as_deref(), Some("Example"));
        assert!(gateway.recorded()[0].1.enable_search_augmentation);
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_gateway() {
        let gateway = Arc::new(MockGateway::new());
        let m = mediator(gateway.clone());

        assert!(matches!(m.run_trends("").await, Err(MediationError::InvalidInput(_))));
        assert!(matches!(m.run_ideas("   ").await, Err(MediationError::InvalidInput(_))));
        assert!(matches!(
            m.run_script("\n\t", Tone::default()).await,
            Err(MediationError::InvalidInput(_))
        ));
        assert!(matches!(m.run_metadata(" ").await, Err(MediationError::InvalidInput(_))));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_upstream_and_not_retried() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_error(transport_error().await)
                .with_text(&five_ideas()),
        );
        let result = mediator(gateway.clone()).run_ideas("Productivity Hacks").await;

        assert!(matches!(
            result,
            Err(MediationError::Upstream(GatewayError::Http(_)))
        ));
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_policy_recovers_from_transient_failure() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_error(GatewayError::Api {
                    status: 503,
                    message: "overloaded".to_string(),
                })
                .with_text(&five_ideas()),
        );
        let policy = RetryPolicy {
            max_retries: 2,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(100),
        };
        let ideas = Mediator::new(gateway.clone(), policy)
            .run_ideas("Productivity Hacks")
            .await
            .unwrap();

        assert_eq!(ideas.len(), 5);
        assert_eq!(gateway.call_count(), 2);
    }

    #[tokio::test]
    async fn test_decode_errors_are_not_retried() {
        let gateway = Arc::new(MockGateway::new().with_text("not json").with_text("[]"));
        let policy = RetryPolicy {
            max_retries: 3,
            ..RetryPolicy::default()
        };
        let result = Mediator::new(gateway.clone(), policy).run_ideas("chess").await;

        assert!(matches!(result, Err(MediationError::MalformedResponse(_))));
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_out_of_range_score_is_schema_violation() {
        let reply = json!([
            {"title": "A", "hook": "B", "viralScore": 150, "targetAudience": "C"}
        ])
        .to_string();
        let gateway = Arc::new(MockGateway::new().with_text(&reply));
        let result = mediator(gateway).run_ideas("chess").await;

        match result {
            Err(MediationError::SchemaViolation { field, .. }) => {
                assert!(field.ends_with("viralScore"))
            }
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_script_embeds_tone() {
        let reply = json!({
            "title": "A Day in the Life",
            "sections": [
                {"heading": "Intro", "content": "Hey!", "duration": "0:00-0:15"},
                {"heading": "Morning", "content": "Coffee.", "duration": "0:15-1:00"},
                {"heading": "Work", "content": "Code.", "duration": "1:00-3:00"},
                {"heading": "Evening", "content": "Gym.", "duration": "3:00-4:00"},
                {"heading": "Outro", "content": "Subscribe!", "duration": "4:00-4:20"}
            ]
        })
        .to_string();
        let gateway = Arc::new(MockGateway::new().with_text(&reply));
        let script = mediator(gateway.clone())
            .run_script("A day in the life of a software engineer", Tone::RelaxedStorytelling)
            .await
            .unwrap();

        assert_eq!(script.sections.len(), 5);
        assert!(gateway.recorded()[0]
            .0
            .contains("Tone: Relaxed and Storytelling."));
    }

    #[tokio::test]
    async fn test_metadata_success() {
        let reply = json!({
            "titles": ["Tesla Model 3: One Year Later", "The Truth About the Model 3", "Should You Buy a Model 3?"],
            "description": "After 12 months...\nHere is everything.",
            "tags": ["tesla", "model 3", "ev"],
            "thumbnailPrompt": "Red Model 3 with a shocked face"
        })
        .to_string();
        let gateway = Arc::new(MockGateway::new().with_text(&reply));
        let metadata = mediator(gateway).run_metadata("Tesla Model 3 review").await.unwrap();

        assert_eq!(metadata.titles.len(), 3);
        assert_eq!(metadata.tags[2], "ev");
    }

    #[tokio::test]
    async fn test_concurrent_identical_requests_are_independent() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_text(&five_ideas())
                .with_text(&five_ideas()),
        );
        let m = mediator(gateway.clone());
        let (a, b) = tokio::join!(m.run_ideas("chess"), m.run_ideas("chess"));

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(gateway.call_count(), 2);
    }
}
