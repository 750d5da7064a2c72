//! Recent form and head-to-head summaries, derived fresh from match history on every request.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::provider::MatchHistory;

const WIN_POINTS: u32 = 3;
const DRAW_POINTS: u32 = 1;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamForm {
    pub matches: usize,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub avg_goals_for: f64,
    pub avg_goals_against: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeadToHead {
    pub wins_a: usize,
    pub draws: usize,
    pub wins_b: usize,
    pub avg_goals: f64,
    pub games: usize,
}
impl HeadToHead {
    pub fn empty(default_avg_goals: f64) -> Self {
        Self {
            wins_a: 0,
            draws: 0,
            wins_b: 0,
            avg_goals: default_avg_goals,
            games: 0,
        }
    }
}

pub struct Analyzer<'a, H: MatchHistory + ?Sized> {
    history: &'a H,
    default_avg_goals: f64,
}
impl<'a, H: MatchHistory + ?Sized> Analyzer<'a, H> {
    pub fn new(history: &'a H, default_avg_goals: f64) -> Self {
        Self {
            history,
            default_avg_goals,
        }
    }

    /// Points and goals over the last `n` matches of `team`. Zeroed when there is no history.
    pub fn form(&self, team: &str, n: usize) -> TeamForm {
        let mut form = TeamForm::default();
        for result in self.history.recent(team, n) {
            let Some(side) = result.side_of(team) else {
                continue;
            };
            let (goals_for, goals_against) = result.goals_for_side(side);
            form.matches += 1;
            form.goals_for += goals_for as u32;
            form.goals_against += goals_against as u32;
            form.points += match goals_for.cmp(&goals_against) {
                std::cmp::Ordering::Greater => WIN_POINTS,
                std::cmp::Ordering::Equal => DRAW_POINTS,
                std::cmp::Ordering::Less => 0,
            };
        }
        if form.matches > 0 {
            form.avg_goals_for = form.goals_for as f64 / form.matches as f64;
            form.avg_goals_against = form.goals_against as f64 / form.matches as f64;
        }
        trace!("form of {team}: {form:?}");
        form
    }

    /// The record between `team_a` and `team_b` over their last `n` meetings, from the perspective
    /// of `team_a`.
    pub fn head_to_head(&self, team_a: &str, team_b: &str, n: usize) -> HeadToHead {
        let meetings = self.history.head_to_head(team_a, team_b, n);
        if meetings.is_empty() {
            return HeadToHead::empty(self.default_avg_goals);
        }

        let mut h2h = HeadToHead::empty(0.0);
        let mut total_goals = 0;
        for result in &meetings {
            let Some(side) = result.side_of(team_a) else {
                continue;
            };
            total_goals += result.total_goals() as u32;
            h2h.games += 1;
            let (goals_a, goals_b) = result.goals_for_side(side);
            match goals_a.cmp(&goals_b) {
                std::cmp::Ordering::Greater => h2h.wins_a += 1,
                std::cmp::Ordering::Equal => h2h.draws += 1,
                std::cmp::Ordering::Less => h2h.wins_b += 1,
            }
        }
        if h2h.games == 0 {
            return HeadToHead::empty(self.default_avg_goals);
        }
        h2h.avg_goals = total_goals as f64 / h2h.games as f64;
        trace!("head-to-head of {team_a} v {team_b}: {h2h:?}");
        h2h
    }
}
