use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{CanonicalEvent, RecordMetadata, ScoreKind, Team, TeamMapping};
use crate::error::{Result, TimelineError};

/// Producers disagree on the name of the event-category field; the first
/// present wins. `kind` is listed first so canonical output re-normalizes
/// to itself.
const KIND_FIELDS: [&str; 4] = ["kind", "code", "type", "action"];

/// Relative or absolute team tags, possibly embedded in compound codes such
/// as "Attack Own" or "Turnover Opp".
static TEAM_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(own|opp|home|away)\b").unwrap());

/// A canonical ordered event sequence plus everything stripped off the raw
/// payload on the way: wrapper metadata and per-event rejections.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedTimeline {
    pub events: Vec<CanonicalEvent>,
    pub metadata: RecordMetadata,
    pub rejected: Vec<RejectedEvent>,
}

/// Diagnostic entry for an event excluded from the canonical sequence.
/// Surfaced to operational logging, never to end users.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedEvent {
    /// Position in the raw event list.
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub raw_time: Value,
    pub raw_team: Value,
    pub raw_kind: Value,
    pub reason: RejectionReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    InvalidTime,
    UnresolvedTeam,
}

/// Trait for normalizing raw event payloads into the canonical timeline
pub trait Normalizer {
    fn normalize(&self, raw: &Value) -> Result<NormalizedTimeline>;
}

/// Default normalizer covering the shapes found in production game records:
/// flat event arrays, and wrapper objects carrying the list under an
/// `events` key (including the doubly-nested legacy variant).
#[derive(Debug, Default)]
pub struct DefaultNormalizer;

impl DefaultNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Detect the payload shape and split it into the raw event list and the
    /// wrapper metadata. Wrapper objects may nest another wrapper under
    /// `events`; sibling keys closest to the event list win.
    fn detect_shape(raw: &Value) -> Result<(Vec<Value>, RecordMetadata)> {
        if let Some(list) = raw.as_array() {
            return Ok((list.clone(), RecordMetadata::default()));
        }

        let mut metadata = RecordMetadata::default();
        let mut current = raw;
        while let Some(obj) = current.as_object() {
            let Some(inner) = obj.get("events") else {
                break;
            };
            collect_metadata(&mut metadata, obj);
            if let Some(list) = inner.as_array() {
                return Ok((list.clone(), metadata));
            }
            if inner.is_object() {
                current = inner;
                continue;
            }
            break;
        }

        Err(TimelineError::UnrecognizedShape { value: raw.clone() })
    }

    /// Normalize a single raw event, or explain why it was excluded.
    fn normalize_event(
        index: usize,
        raw: &Value,
        mapping: Option<&TeamMapping>,
    ) -> std::result::Result<CanonicalEvent, RejectedEvent> {
        let empty = serde_json::Map::new();
        let obj = raw.as_object().unwrap_or(&empty);

        let id = obj.get("id").and_then(value_to_id);
        let kind_text = KIND_FIELDS
            .iter()
            .find_map(|field| obj.get(*field).and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty());

        let reject = |reason| RejectedEvent {
            index,
            id: id.clone(),
            raw_time: obj.get("time").cloned().unwrap_or(Value::Null),
            raw_team: obj.get("team").cloned().unwrap_or(Value::Null),
            raw_kind: kind_text.map(Into::into).unwrap_or(Value::Null),
            reason,
        };

        let Some(time) = parse_time(obj.get("time")) else {
            return Err(reject(RejectionReason::InvalidTime));
        };

        let team = match obj.get("team").and_then(Value::as_str) {
            // A present team field must resolve; garbage is a rejection,
            // not a fallback.
            Some(tag) => resolve_team(tag, mapping),
            // No explicit team: a tag embedded in the category text, else
            // the event belongs to the analyzed side.
            None => match kind_text.and_then(|text| find_team_tag(text)) {
                Some(tag) => resolve_team(&tag, mapping),
                None => mapping.and_then(TeamMapping::own_side),
            },
        };
        let Some(team) = team else {
            return Err(reject(RejectionReason::UnresolvedTeam));
        };

        let kind = kind_text.map(str::to_lowercase).unwrap_or_default();
        let label = obj
            .get("label")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| kind_text.map(str::to_string));

        let qualifier = obj
            .get("metadata")
            .and_then(|m| m.get("scoreType"))
            .or_else(|| obj.get("score_kind"))
            .and_then(Value::as_str);

        Ok(CanonicalEvent {
            id: id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            time,
            score_kind: classify_score(&kind, qualifier),
            kind,
            label,
            team,
        })
    }
}

impl Normalizer for DefaultNormalizer {
    fn normalize(&self, raw: &Value) -> Result<NormalizedTimeline> {
        let (raw_events, metadata) = Self::detect_shape(raw)?;
        let mapping = metadata.team_mapping.as_ref();

        let mut events = Vec::with_capacity(raw_events.len());
        let mut rejected = Vec::new();
        for (index, raw_event) in raw_events.iter().enumerate() {
            match Self::normalize_event(index, raw_event, mapping) {
                Ok(event) => events.push(event),
                Err(rejection) => rejected.push(rejection),
            }
        }

        // Stable sort: equal-time events keep their input order
        events.sort_by_key(|event| event.time);

        Ok(NormalizedTimeline {
            events,
            metadata,
            rejected,
        })
    }
}

/// Lift `team_mapping`, `match_info` and `updated_at` siblings off a wrapper
/// level, overwriting values taken from an outer level.
fn collect_metadata(metadata: &mut RecordMetadata, obj: &serde_json::Map<String, Value>) {
    if let Some(mapping) = obj.get("team_mapping").and_then(parse_team_mapping) {
        metadata.team_mapping = Some(mapping);
    }
    if let Some(info) = obj.get("match_info") {
        metadata.match_info = Some(info.clone());
    }
    if let Some(updated) = obj.get("updated_at").and_then(parse_timestamp) {
        metadata.updated_at = Some(updated);
    }
}

fn parse_team_mapping(value: &Value) -> Option<TeamMapping> {
    let obj = value.as_object()?;
    let side = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .and_then(parse_absolute_team)
    };
    let mapping = TeamMapping {
        own: side("own"),
        opp: side("opp"),
    };
    (mapping.own.is_some() || mapping.opp.is_some()).then_some(mapping)
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_absolute_team(text: &str) -> Option<Team> {
    match text.trim().to_lowercase().as_str() {
        "home" => Some(Team::Home),
        "away" => Some(Team::Away),
        _ => None,
    }
}

/// Coerce a raw time value to whole non-negative seconds. Numeric strings
/// are accepted; null, negative, non-numeric and non-finite values are not.
fn parse_time(value: Option<&Value>) -> Option<u32> {
    let seconds = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (seconds.is_finite() && seconds >= 0.0).then(|| seconds.trunc() as u32)
}

fn find_team_tag(text: &str) -> Option<String> {
    TEAM_TAG.find(text).map(|m| m.as_str().to_lowercase())
}

/// Resolve a team tag to an absolute side. Relative tags go through the
/// per-game mapping; compound codes are scanned for an embedded tag.
fn resolve_team(tag: &str, mapping: Option<&TeamMapping>) -> Option<Team> {
    match tag.trim().to_lowercase().as_str() {
        "home" => Some(Team::Home),
        "away" => Some(Team::Away),
        "own" => mapping.and_then(TeamMapping::own_side),
        "opp" => mapping.and_then(TeamMapping::opp_side),
        other => {
            let embedded = find_team_tag(other)?;
            // A compound code cannot embed another compound code
            resolve_team(&embedded, mapping)
        }
    }
}

/// Producers encode the score type either as the primary category or as a
/// qualifier; both are honored, and an event counts once when they agree.
fn classify_score(kind: &str, qualifier: Option<&str>) -> ScoreKind {
    let qualifier = qualifier.map(str::trim);
    let signals = |wanted: &str| {
        kind == wanted || qualifier.is_some_and(|q| q.eq_ignore_ascii_case(wanted))
    };
    if signals("goal") {
        ScoreKind::Goal
    } else if signals("point") {
        ScoreKind::Point
    } else {
        ScoreKind::None
    }
}

fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
