use anyhow::Result;
use match_timeline::domain::{ScoreKind, Team};
use match_timeline::pipeline::{Pipeline, RejectionReason};
use serde_json::json;

#[test]
fn flat_payload_normalizes_scores_and_reports_rejections() -> Result<()> {
    let raw: serde_json::Value = serde_json::from_str(include_str!("resources/flat_events.json"))?;

    let result = Pipeline::new().run(&raw)?;

    // One event carried a null time and must be excluded, not swallowed
    assert_eq!(result.timeline.events.len(), 9);
    assert_eq!(result.timeline.rejected.len(), 1);
    let rejection = &result.timeline.rejected[0];
    assert_eq!(rejection.id.as_deref(), Some("ev-006"));
    assert_eq!(rejection.reason, RejectionReason::InvalidTime);

    // Canonical order is ascending in time, ties in input order
    let times: Vec<_> = result.timeline.events.iter().map(|e| e.time).collect();
    assert_eq!(times, [8, 131, 245, 245, 391, 607, 833, 1099, 1312]);
    assert_eq!(result.timeline.events[2].id, "ev-003");
    assert_eq!(result.timeline.events[3].id, "ev-004");

    assert_eq!(result.score.home.display, "1-02");
    assert_eq!(result.score.home.total, 5);
    assert_eq!(result.score.away.display, "1-01");
    assert_eq!(result.score.away.total, 4);

    assert_eq!(result.markers.len(), 5);
    assert_eq!(result.markers.last().unwrap().score, result.score);

    Ok(())
}

#[test]
fn nested_legacy_payload_resolves_relative_teams() -> Result<()> {
    let raw: serde_json::Value = serde_json::from_str(include_str!("resources/nested_legacy.json"))?;

    let result = Pipeline::new().run(&raw)?;
    let timeline = &result.timeline;

    // Wrapper metadata is surfaced separately from the event list
    let mapping = timeline.metadata.team_mapping.as_ref().unwrap();
    assert_eq!(mapping.own, Some(Team::Home));
    assert_eq!(
        timeline.metadata.match_info.as_ref().unwrap()["venue"],
        json!("Parnell Park")
    );
    assert!(timeline.metadata.updated_at.is_some());

    assert_eq!(timeline.events.len(), 6);
    assert_eq!(timeline.rejected.len(), 1);
    assert_eq!(timeline.rejected[0].raw_time, json!("NaN"));

    // Untagged and "Attack Own" events land on the analyzed side,
    // opp-tagged events on the other
    let teams: Vec<_> = timeline.events.iter().map(|e| e.team).collect();
    assert_eq!(
        teams,
        [
            Team::Home,
            Team::Home,
            Team::Home,
            Team::Away,
            Team::Away,
            Team::Home,
        ]
    );

    assert_eq!(result.score.home.display, "1-01");
    assert_eq!(result.score.away.display, "0-01");

    Ok(())
}

#[test]
fn renormalizing_canonical_output_is_stable() -> Result<()> {
    let raw: serde_json::Value = serde_json::from_str(include_str!("resources/nested_legacy.json"))?;

    let pipeline = Pipeline::new();
    let first = pipeline.normalize(&raw)?;
    let second = pipeline.normalize(&serde_json::to_value(&first.events)?)?;

    assert!(second.rejected.is_empty());
    assert_eq!(first.events, second.events);

    Ok(())
}

#[test]
fn goal_qualifier_survives_the_full_pipeline() -> Result<()> {
    let result = Pipeline::new().run(&json!({
        "events": [
            {"time": 238, "code": "Shot", "team": "own", "metadata": {"scoreType": "Goal"}},
        ],
        "team_mapping": {"own": "away"},
    }))?;

    assert_eq!(result.timeline.events[0].score_kind, ScoreKind::Goal);
    assert_eq!(result.score.away.display, "1-00");
    assert_eq!(result.score.home.display, "0-00");

    Ok(())
}
