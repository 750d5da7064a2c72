//! Composite 0–100 team strength: season aggregates, recent form and venue, blended by weight.

use crate::config::StrengthConfig;
use crate::domain::TeamStatistics;
use crate::form::TeamForm;
use crate::probs::clamp;

pub fn strength(config: &StrengthConfig, stats: &TeamStatistics, form: &TeamForm, is_home: bool) -> f64 {
    let win_rate = stats.wins as f64 / u32::max(1, stats.played()) as f64;
    let goal_diff = clamp(
        stats.goals_scored - stats.goals_conceded,
        -config.goal_diff_cap,
        config.goal_diff_cap,
    );
    let general = win_rate * config.win_rate_scale + goal_diff + config.goal_diff_cap;
    let form_strength = form.points as f64 / config.max_form_points * config.form_scale;
    let venue = if is_home {
        config.home_venue_bonus
    } else {
        config.away_venue_bonus
    };

    f64::min(
        config.max_strength,
        general * config.general_weight + form_strength * config.form_weight + venue * config.venue_weight,
    )
}
