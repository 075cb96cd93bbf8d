use crate::domain::{CanonicalEvent, GameScore, ScoreKind, ScoreMarker, Team, TeamScore};

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    goals: u32,
    points: u32,
}

impl Tally {
    fn add(&mut self, kind: ScoreKind) {
        match kind {
            ScoreKind::Goal => self.goals += 1,
            ScoreKind::Point => self.points += 1,
            ScoreKind::None => {}
        }
    }

    fn score(self) -> TeamScore {
        TeamScore::new(self.goals, self.points)
    }
}

/// Derive the final game score from a canonical event sequence. Non-scoring
/// events contribute nothing; an empty sequence is a scoreless game.
pub fn game_score(events: &[CanonicalEvent]) -> GameScore {
    let mut home = Tally::default();
    let mut away = Tally::default();

    for event in events {
        match event.team {
            Team::Home => home.add(event.score_kind),
            Team::Away => away.add(event.score_kind),
        }
    }

    GameScore {
        home: home.score(),
        away: away.score(),
    }
}

/// One marker per scoring event, with the cumulative game score after it.
/// Assumes the sequence is already time-ordered, as the normalizer
/// guarantees.
pub fn score_timeline(events: &[CanonicalEvent]) -> Vec<ScoreMarker> {
    let mut home = Tally::default();
    let mut away = Tally::default();
    let mut markers = Vec::new();

    for event in events {
        if event.score_kind == ScoreKind::None {
            continue;
        }
        match event.team {
            Team::Home => home.add(event.score_kind),
            Team::Away => away.add(event.score_kind),
        }
        markers.push(ScoreMarker {
            time: event.time,
            team: event.team,
            score_kind: event.score_kind,
            score: GameScore {
                home: home.score(),
                away: away.score(),
            },
        });
    }

    markers
}
