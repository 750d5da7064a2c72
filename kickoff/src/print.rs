use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Styles};
use stanza::table::{Col, Row, Table};

use crate::combo::ComboSlip;
use crate::domain::{MatchProbabilities, MatchProbabilityEstimate};
use crate::engine::{MatchAnalysis, Tip};
use crate::ensemble::EnsembleEstimate;
use crate::form::TeamForm;

fn two_cols() -> Table {
    Table::default().with_cols(vec![
        Col::new(Styles::default().with(MinWidth(12)).with(Left)),
        Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
    ])
}

fn push_pair(table: &mut Table, label: &str, value: String) {
    table.push_row(Row::new(Styles::default(), vec![label.into(), value.into()]));
}

pub fn tabulate_probs(probs: &MatchProbabilities) -> Table {
    let mut table = two_cols();
    push_pair(&mut table, "Home win", format!("{:.3}", probs.home_win));
    push_pair(&mut table, "Draw", format!("{:.3}", probs.draw));
    push_pair(&mut table, "Away win", format!("{:.3}", probs.away_win));
    push_pair(&mut table, "Over 2.5", format!("{:.3}", probs.over_2_5));
    push_pair(&mut table, "Under 2.5", format!("{:.3}", probs.under_2_5()));
    table
}

pub fn tabulate_estimate(estimate: &MatchProbabilityEstimate) -> Table {
    let mut table = tabulate_probs(&estimate.probs);
    if let Some(expected_goals) = estimate.expected_goals {
        push_pair(&mut table, "Exp. goals", format!("{expected_goals:.2}"));
    }
    if let Some(strengths) = &estimate.strengths {
        push_pair(&mut table, "Strengths", format!("{:.1} / {:.1}", strengths.home, strengths.away));
    }
    push_pair(&mut table, "Confidence", estimate.confidence.to_string());
    table
}

pub fn tabulate_ensemble(ensemble: &EnsembleEstimate) -> Table {
    let mut table = tabulate_probs(&ensemble.probs);
    let sources: Vec<_> = ensemble.sources.iter().map(ToString::to_string).collect();
    push_pair(&mut table, "Sources", sources.join(", "));
    push_pair(&mut table, "Confidence", ensemble.confidence.to_string());
    table
}

pub fn tabulate_forms(analysis: &MatchAnalysis) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(16)).with(Left)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(5)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Team".into(), "P".into(), "Pts".into(), "GF/m".into(), "GA/m".into()],
        ));
    let mut push_form = |team: &str, form: &TeamForm| {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                team.into(),
                form.matches.to_string().into(),
                form.points.to_string().into(),
                format!("{:.2}", form.avg_goals_for).into(),
                format!("{:.2}", form.avg_goals_against).into(),
            ],
        ));
    };
    push_form(&analysis.fixture.home, &analysis.home_form);
    push_form(&analysis.fixture.away, &analysis.away_form);
    table
}

pub fn tabulate_analysis(analysis: &MatchAnalysis) -> Table {
    let mut table = tabulate_estimate(&analysis.estimate);
    let h2h = &analysis.head_to_head;
    push_pair(
        &mut table,
        "Head to head",
        format!("{}-{}-{} in {}", h2h.wins_a, h2h.draws, h2h.wins_b, h2h.games),
    );
    push_pair(&mut table, "H2H goals/m", format!("{:.2}", h2h.avg_goals));
    push_pair(&mut table, "Primary", analysis.recommendation.primary.to_string());
    push_pair(&mut table, "Risk", analysis.recommendation.risk.to_string());
    table
}

pub fn tabulate_tips(tips: &[Tip]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(24)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Fixture".into(), "Best bet".into(), "Prob".into(), "Confidence".into()],
        ));
    for tip in tips {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                tip.fixture.to_string().into(),
                tip.best_bet.bet.to_string().into(),
                format!("{:.3}", tip.best_bet.probability).into(),
                tip.ensemble.confidence.to_string().into(),
            ],
        ));
    }
    table
}

pub fn tabulate_combo(slip: &ComboSlip) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(24)).with(Left)),
            Col::new(Styles::default().with(MinWidth(10)).with(Left)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)),
            vec!["Fixture".into(), "Bet".into(), "Prob".into(), "Odds".into()],
        ));
    for leg in &slip.legs {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                leg.fixture.to_string().into(),
                leg.recommendation.bet.to_string().into(),
                format!("{:.3}", leg.probability()).into(),
                format!("{:.2}", leg.odds()).into(),
            ],
        ));
    }
    table.push_row(Row::new(
        Styles::default().with(Header(true)),
        vec![
            format!("{} legs, {} risk", slip.legs.len(), slip.risk).into(),
            format!("{} confidence", slip.confidence).into(),
            format!("{:.3}", slip.combined_probability).into(),
            format!("{:.2}", slip.total_odds).into(),
        ],
    ));
    table
}

#[cfg(test)]
mod tests {
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    use super::*;
    use crate::domain::Confidence;
    use crate::testing::{estimate, probs};

    #[test]
    fn renders_estimate() {
        let estimate = estimate(probs(0.65, 0.2, 0.15, 0.875), Confidence::High);
        let rendered = Console::default().render(&tabulate_estimate(&estimate)).to_string();
        assert!(rendered.contains("0.650"), "{rendered}");
        assert!(rendered.contains("0.125"), "{rendered}");
        assert!(rendered.contains("High"), "{rendered}");
        assert!(!rendered.contains("Exp. goals"), "{rendered}");
    }

    #[test]
    fn renders_empty_combo() {
        let rendered = Console::default().render(&tabulate_combo(&ComboSlip::empty())).to_string();
        assert!(rendered.contains("0 legs, Low risk"), "{rendered}");
    }
}
