use crate::models::{ItemOutcome, OutcomeStatus};

/// One line per outcome, in order, joined with `\n`.
///
/// `action` is a past-tense phrase such as `"added to favorites"`.
pub fn format(result: &[ItemOutcome], action: &str) -> String {
    result
        .iter()
        .map(|outcome| format_line(outcome, action))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_line(outcome: &ItemOutcome, action: &str) -> String {
    let id = outcome.media_id;
    match outcome.status {
        OutcomeStatus::Success => format!("Series with id {id} {action} successfully"),
        OutcomeStatus::Duplicate => format!("Series with id {id} is already in the list"),
        OutcomeStatus::Failure => format!("Error while {action} series {id}: {}", outcome.detail),
        OutcomeStatus::Unreported => format!("Series with id {id} was not reported by the service"),
    }
}
