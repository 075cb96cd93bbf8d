//! Counters for the timeline pipeline, following Prometheus naming
//! conventions. Recorded against whatever recorder the embedding process
//! installs; a bare CLI run simply drops them.

use std::fmt;

/// Every metric name used by the pipeline, so there are no magic strings at
/// the call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    NormalizeEventsAccepted,
    NormalizeEventsRejected,
    ScoreGamesScored,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::NormalizeEventsAccepted => "timeline_normalize_events_accepted_total",
            MetricName::NormalizeEventsRejected => "timeline_normalize_events_rejected_total",
            MetricName::ScoreGamesScored => "timeline_score_games_scored_total",
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod normalize {
    use super::MetricName;
    use crate::pipeline::normalize::RejectionReason;

    /// Count events admitted to the canonical sequence.
    pub fn events_accepted(count: u64) {
        ::metrics::counter!(MetricName::NormalizeEventsAccepted.as_str()).increment(count);
    }

    /// Count an excluded event, labeled by why it was dropped.
    pub fn event_rejected(reason: RejectionReason) {
        let reason_label = match reason {
            RejectionReason::InvalidTime => "invalid_time",
            RejectionReason::UnresolvedTeam => "unresolved_team",
        };
        ::metrics::counter!(
            MetricName::NormalizeEventsRejected.as_str(),
            "reason" => reason_label
        )
        .increment(1);
    }
}

pub mod score {
    use super::MetricName;

    pub fn game_scored() {
        ::metrics::counter!(MetricName::ScoreGamesScored.as_str()).increment(1);
    }
}
