// Event timeline pipeline: normalization and score derivation.

pub mod normalize;
pub mod score;

pub use normalize::{DefaultNormalizer, NormalizedTimeline, Normalizer, RejectedEvent, RejectionReason};
pub use score::{game_score, score_timeline};

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{GameScore, ScoreMarker};
use crate::error::Result;
use crate::observability::metrics;

/// Result of a complete pipeline run over one raw payload.
#[derive(Debug, Serialize)]
pub struct PipelineResult {
    pub timeline: NormalizedTimeline,
    pub score: GameScore,
    pub markers: Vec<ScoreMarker>,
}

/// Drives a raw game record through normalization and score derivation,
/// emitting the operational logging and counters the pure stages keep out of
/// their own contracts.
pub struct Pipeline {
    normalizer: Box<dyn Normalizer + Send + Sync>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            normalizer: Box::new(DefaultNormalizer::new()),
        }
    }

    pub fn with_normalizer(normalizer: Box<dyn Normalizer + Send + Sync>) -> Self {
        Self { normalizer }
    }

    /// Normalize a raw payload, surfacing per-event rejections to the log.
    pub fn normalize(&self, raw: &Value) -> Result<NormalizedTimeline> {
        let timeline = self.normalizer.normalize(raw)?;

        for rejection in &timeline.rejected {
            warn!(
                index = rejection.index,
                id = rejection.id.as_deref(),
                reason = ?rejection.reason,
                raw_time = %rejection.raw_time,
                raw_team = %rejection.raw_team,
                "event excluded from canonical timeline"
            );
            metrics::normalize::event_rejected(rejection.reason);
        }
        metrics::normalize::events_accepted(timeline.events.len() as u64);
        info!(
            accepted = timeline.events.len(),
            rejected = timeline.rejected.len(),
            "normalized raw game record"
        );

        Ok(timeline)
    }

    /// Run the full pipeline: canonical timeline, final score, score markers.
    pub fn run(&self, raw: &Value) -> Result<PipelineResult> {
        let timeline = self.normalize(raw)?;
        let score = game_score(&timeline.events);
        let markers = score_timeline(&timeline.events);
        metrics::score::game_scored();

        info!(
            home = %score.home.display,
            away = %score.away.display,
            markers = markers.len(),
            "derived game score"
        );

        Ok(PipelineResult {
            timeline,
            score,
            markers,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pipeline_runs_end_to_end() {
        let pipeline = Pipeline::new();
        let result = pipeline
            .run(&json!({
                "events": [
                    {"time": 30, "code": "Goal", "team": "own"},
                    {"time": 65, "code": "Point", "team": "opp"},
                    {"time": 12, "code": "Kickout Won"},
                ],
                "team_mapping": {"own": "home"},
            }))
            .unwrap();

        assert_eq!(result.timeline.events.len(), 3);
        assert_eq!(result.score.home.display, "1-00");
        assert_eq!(result.score.away.display, "0-01");
        assert_eq!(result.markers.len(), 2);
    }

    #[test]
    fn pipeline_propagates_shape_errors() {
        let pipeline = Pipeline::new();
        assert!(pipeline.run(&json!("not events")).is_err());
    }
}
