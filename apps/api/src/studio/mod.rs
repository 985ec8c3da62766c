//! Studio — the four tool views, each owning its own request lifecycle.
//!
//! Controllers share nothing: a failure or teardown in one view never touches another.

pub mod controller;
pub mod handlers;

use std::str::FromStr;

use serde::Serialize;

use crate::mediation::models::{FullScript, Tone, TrendResult, VideoIdea, VideoMetadata};
use crate::mediation::Mediator;
use controller::{FeatureController, SubmitOutcome, ViewState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Trends,
    Ideas,
    Script,
    Metadata,
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trends" => Ok(Feature::Trends),
            "ideas" => Ok(Feature::Ideas),
            "script" => Ok(Feature::Script),
            "metadata" => Ok(Feature::Metadata),
            other => Err(format!("unknown feature '{other}'")),
        }
    }
}

/// Current state of one view, serialized as `{"state": ..., "result"?: ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureSnapshot {
    Trends(ViewState<TrendResult>),
    Ideas(ViewState<Vec<VideoIdea>>),
    Script(ViewState<FullScript>),
    Metadata(ViewState<VideoMetadata>),
}

pub struct Studio {
    mediator: Mediator,
    trends: FeatureController<TrendResult>,
    ideas: FeatureController<Vec<VideoIdea>>,
    script: FeatureController<FullScript>,
    metadata: FeatureController<VideoMetadata>,
}

impl Studio {
    pub fn new(mediator: Mediator) -> Self {
        Self {
            mediator,
            trends: FeatureController::new("trends"),
            ideas: FeatureController::new("ideas"),
            script: FeatureController::new("script"),
            metadata: FeatureController::new("metadata"),
        }
    }

    /// Submits `input` to the view. `tone` only applies to the script view.
    pub fn submit(&self, feature: Feature, input: &str, tone: Tone) -> SubmitOutcome {
        let mediator = self.mediator.clone();
        match feature {
            Feature::Trends => self.trends.submit(input, move |niche| async move {
                mediator.run_trends(&niche).await
            }),
            Feature::Ideas => self.ideas.submit(input, move |topic| async move {
                mediator.run_ideas(&topic).await
            }),
            Feature::Script => self.script.submit(input, move |idea| async move {
                mediator.run_script(&idea, tone).await
            }),
            Feature::Metadata => self.metadata.submit(input, move |context| async move {
                mediator.run_metadata(&context).await
            }),
        }
    }

    pub fn snapshot(&self, feature: Feature) -> FeatureSnapshot {
        match feature {
            Feature::Trends => FeatureSnapshot::Trends(self.trends.snapshot()),
            Feature::Ideas => FeatureSnapshot::Ideas(self.ideas.snapshot()),
            Feature::Script => FeatureSnapshot::Script(self.script.snapshot()),
            Feature::Metadata => FeatureSnapshot::Metadata(self.metadata.snapshot()),
        }
    }

    /// Navigating away from a view: cancel its in-flight call and reset it to Idle.
    pub fn teardown(&self, feature: Feature) {
        match feature {
            Feature::Trends => self.trends.teardown(),
            Feature::Ideas => self.ideas.teardown(),
            Feature::Script => self.script.teardown(),
            Feature::Metadata => self.metadata.teardown(),
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self, feature: Feature) -> bool {
        match feature {
            Feature::Trends => self.trends.is_pending(),
            Feature::Ideas => self.ideas.is_pending(),
            Feature::Script => self.script.is_pending(),
            Feature::Metadata => self.metadata.is_pending(),
        }
    }
}
