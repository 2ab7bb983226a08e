use serde::Serialize;

use crate::model::tip::{InvalidationReason, TipId};
use crate::rules::engine::{PredicateResult, Presentation};
use crate::rules::input::RuleInput;
use crate::rules::presenter::{TipPresenter, TipState};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TipStatusJson {
    pub id: TipId,
    pub title: &'static str,
    pub presentation: Presentation,
    pub eligible: bool,
    pub state: TipState,
    pub already_shown: bool,
    pub display_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalidated: Option<InvalidationReason>,
    pub rules: Vec<PredicateResult>,
}

#[derive(Serialize)]
pub struct TipReportJson {
    pub input: RuleInput,
    pub tips: Vec<TipStatusJson>,
}

/// Collect the status of every tip the presenter knows about
pub fn tip_report(presenter: &TipPresenter, input: &RuleInput) -> TipReportJson {
    let engine = presenter.engine();
    let tips = engine
        .tips()
        .iter()
        .map(|tip| {
            let record = presenter.record(tip.id);
            TipStatusJson {
                id: tip.id,
                title: tip.title,
                presentation: tip.presentation,
                eligible: engine.is_eligible(tip.id, input),
                state: presenter.state(tip.id),
                already_shown: presenter.already_shown(tip.id),
                display_count: record.map_or(0, |r| r.display_count),
                invalidated: record.and_then(|r| r.invalidation).map(|i| i.reason),
                rules: engine.explain(tip.id, input),
            }
        })
        .collect();
    TipReportJson {
        input: input.clone(),
        tips,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One block per tip:
///
/// ```text
/// add-task  Seed your board
///   eligible  state: hidden  shown: 0x
///   [x] taskCount == 0
/// ```
pub fn format_tip_report(report: &TipReportJson) -> String {
    let mut out = String::new();
    out.push_str(&format!("input: {}\n", report.input));
    for tip in &report.tips {
        out.push('\n');
        out.push_str(&format!("{}  {}\n", tip.id, tip.title));
        let eligibility = if tip.eligible { "eligible" } else { "not eligible" };
        out.push_str(&format!(
            "  {}  state: {}  shown: {}x",
            eligibility,
            state_name(tip.state),
            tip.display_count
        ));
        if let Some(reason) = tip.invalidated {
            out.push_str(&format!("  suppressed: {}", reason_name(reason)));
        }
        out.push('\n');
        for rule in &tip.rules {
            let mark = if rule.holds { "[x]" } else { "[ ]" };
            out.push_str(&format!("  {} {}\n", mark, rule.label));
        }
    }
    out
}

fn state_name(state: TipState) -> &'static str {
    match state {
        TipState::Hidden => "hidden",
        TipState::Shown => "shown",
        TipState::Suppressed => "suppressed",
    }
}

fn reason_name(reason: InvalidationReason) -> &'static str {
    match reason {
        InvalidationReason::TipClosed => "closed",
        InvalidationReason::ActionPerformed => "action performed",
        InvalidationReason::DisplayCountExceeded => "display limit",
    }
}
