use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of points a goal is worth under Gaelic scoring rules.
pub const GOAL_VALUE: u32 = 3;

/// Absolute side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub fn opposite(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }
}

/// Classification of an event for score derivation, resolved once during
/// normalization so every consumer sees the same decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    Goal,
    Point,
    #[default]
    None,
}

/// A normalized, validated match event with a guaranteed-finite time and a
/// resolved absolute team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub id: String,
    /// Match clock, in whole seconds from the start of the recording.
    pub time: u32,
    /// Lower-cased, trimmed event category.
    pub kind: String,
    /// Display qualifier, original casing preserved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub team: Team,
    #[serde(default)]
    pub score_kind: ScoreKind,
}

/// Mapping from relative team tags to absolute sides, supplied per game by
/// the producer alongside the event list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamMapping {
    #[serde(default)]
    pub own: Option<Team>,
    #[serde(default)]
    pub opp: Option<Team>,
}

impl TeamMapping {
    /// Resolve the side the analyzed team plays on. When only the opposing
    /// side was supplied, fall back to its opposite.
    pub fn own_side(&self) -> Option<Team> {
        self.own.or_else(|| self.opp.map(Team::opposite))
    }

    pub fn opp_side(&self) -> Option<Team> {
        self.opp.or_else(|| self.own.map(Team::opposite))
    }
}

/// Sibling keys extracted from wrapped legacy payloads. These travel next to
/// the event list but are never merged into event fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_mapping: Option<TeamMapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_info: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Running totals for one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamScore {
    pub goals: u32,
    pub points: u32,
    pub total: u32,
    /// Conventional GAA notation, points zero-padded to two digits.
    pub display: String,
}

impl TeamScore {
    pub fn new(goals: u32, points: u32) -> Self {
        Self {
            goals,
            points,
            total: goals * GOAL_VALUE + points,
            display: format!("{}-{:02}", goals, points),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub home: TeamScore,
    pub away: TeamScore,
}

impl GameScore {
    pub fn scoreless() -> Self {
        Self {
            home: TeamScore::new(0, 0),
            away: TeamScore::new(0, 0),
        }
    }
}

/// One timeline marker per scoring event, carrying the cumulative game score
/// after that event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreMarker {
    pub time: u32,
    pub team: Team,
    pub score_kind: ScoreKind,
    pub score: GameScore,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_score_display_pads_points_not_goals() {
        assert_eq!(TeamScore::new(0, 0).display, "0-00");
        assert_eq!(TeamScore::new(2, 4).display, "2-04");
        assert_eq!(TeamScore::new(1, 14).display, "1-14");
    }

    #[test]
    fn team_score_total_applies_goal_value() {
        let score = TeamScore::new(2, 5);
        assert_eq!(score.total, 11);
    }

    #[test]
    fn team_mapping_falls_back_to_opposite_side() {
        let mapping = TeamMapping {
            own: None,
            opp: Some(Team::Away),
        };
        assert_eq!(mapping.own_side(), Some(Team::Home));
        assert_eq!(mapping.opp_side(), Some(Team::Away));
    }

    #[test]
    fn team_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Team::Home).unwrap(), "\"home\"");
        let parsed: Team = serde_json::from_str("\"away\"").unwrap();
        assert_eq!(parsed, Team::Away);
    }
}
