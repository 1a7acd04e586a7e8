//! Turns mutation responses into one outcome per requested id.
//!
//! Two response shapes exist. The favorites endpoint acknowledges a single
//! item with `{success, status_message, errors}`; the list endpoint answers a
//! batch with `{results: [{media_id, success, error}]}`. Batch results are
//! matched to requested ids by `media_id` because the service does not keep
//! request order.

use std::collections::{HashMap, VecDeque};

use showlink_api::types::{AckResponse, ListItemResult, ListItemsResponse};
use showlink_api::{ApiResponse, SeriesId};

use crate::models::{BatchResult, ItemOutcome, MutationMode};

/// Error text the catalog uses for an item already in the collection.
pub const DUPLICATE_MESSAGE: &str = "Media has already been taken";

const UNSPECIFIED_FAILURE: &str = "request was not successful";

/// Classify the outcome of every id in `requested`, in `requested` order.
pub fn reconcile(
    response: &ApiResponse,
    requested: &[SeriesId],
    mode: MutationMode,
) -> BatchResult {
    if !response.is_success() {
        tracing::error!(
            status = response.status,
            ids = ?requested,
            body = %response.body,
            "mutation rejected"
        );
        return fail_all(requested, &response.body);
    }

    match mode {
        MutationMode::PerItem => match serde_json::from_str::<AckResponse>(&response.body) {
            Ok(ack) => requested
                .iter()
                .map(|&id| {
                    classify(
                        id,
                        ack.success,
                        ack.error_messages(),
                        ack.status_message.as_deref(),
                    )
                })
                .collect(),
            Err(e) => parse_failure(requested, e),
        },
        MutationMode::Batch => match serde_json::from_str::<ListItemsResponse>(&response.body) {
            Ok(list) => reconcile_results(list, requested),
            Err(e) => parse_failure(requested, e),
        },
    }
}

/// A failure outcome for every id, all sharing `detail`.
pub fn fail_all(requested: &[SeriesId], detail: &str) -> BatchResult {
    requested
        .iter()
        .map(|&id| ItemOutcome::failure(id, detail))
        .collect()
}

fn parse_failure(requested: &[SeriesId], err: serde_json::Error) -> BatchResult {
    tracing::error!(ids = ?requested, error = %err, "unreadable mutation response");
    fail_all(requested, &err.to_string())
}

fn reconcile_results(list: ListItemsResponse, requested: &[SeriesId]) -> BatchResult {
    // A whole-call refusal sometimes arrives as 2xx with no per-item results.
    if list.results.is_empty() && list.success == Some(false) {
        let detail = list.status_message.as_deref().unwrap_or(UNSPECIFIED_FAILURE);
        return fail_all(requested, detail);
    }

    // A repeated id gets one result per occurrence, consumed in reply order.
    let mut by_id: HashMap<SeriesId, VecDeque<&ListItemResult>> = HashMap::new();
    for result in &list.results {
        by_id.entry(result.media_id).or_default().push_back(result);
    }

    for result in &list.results {
        if !requested.contains(&result.media_id) {
            tracing::debug!(media_id = result.media_id, "result for an id that was not requested");
        }
    }

    requested
        .iter()
        .map(|&id| match by_id.get_mut(&id).and_then(VecDeque::pop_front) {
            Some(result) => classify(id, result.success, result.error.as_deref(), None),
            None => {
                tracing::warn!(media_id = id, "id missing from batch results");
                ItemOutcome::unreported(id)
            }
        })
        .collect()
}

/// Success, Duplicate, or Failure for one id.
fn classify(
    id: SeriesId,
    success: bool,
    errors: Option<&[String]>,
    fallback: Option<&str>,
) -> ItemOutcome {
    if success {
        return ItemOutcome::success(id);
    }
    match errors.and_then(|e| e.first()) {
        Some(message) if message == DUPLICATE_MESSAGE => {
            ItemOutcome::duplicate(id, message.as_str())
        }
        Some(message) => ItemOutcome::failure(id, message.as_str()),
        None => ItemOutcome::failure(id, fallback.unwrap_or(UNSPECIFIED_FAILURE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutcomeStatus;

    fn ok(body: &str) -> ApiResponse {
        ApiResponse::new(200, body)
    }

    #[test]
    fn test_ack_success() {
        let resp = ok(r#"{"success":true,"status_code":1,"status_message":"Success."}"#);
        let result = reconcile(&resp, &[42], MutationMode::PerItem);
        assert_eq!(result, vec![ItemOutcome::success(42)]);
    }

    #[test]
    fn test_ack_created_status_is_success() {
        let resp = ApiResponse::new(201, r#"{"success":true}"#);
        let result = reconcile(&resp, &[42], MutationMode::PerItem);
        assert_eq!(result[0].status, OutcomeStatus::Success);
    }

    #[test]
    fn test_ack_duplicate() {
        let resp = ok(r#"{"success":false,"errors":["Media has already been taken"]}"#);
        let result = reconcile(&resp, &[42], MutationMode::PerItem);
        assert_eq!(result[0].status, OutcomeStatus::Duplicate);
    }

    #[test]
    fn test_ack_other_error_is_failure() {
        let resp = ok(r#"{"success":false,"errors":["Invalid id"],"status_message":"nope"}"#);
        let result = reconcile(&resp, &[42], MutationMode::PerItem);
        assert_eq!(result, vec![ItemOutcome::failure(42, "Invalid id")]);
    }

    #[test]
    fn test_ack_without_error_list_uses_status_message() {
        let resp = ok(r#"{"success":false,"status_message":"Session denied."}"#);
        let result = reconcile(&resp, &[42], MutationMode::PerItem);
        assert_eq!(result, vec![ItemOutcome::failure(42, "Session denied.")]);
    }

    #[test]
    fn test_ack_missing_everything_is_generic_failure() {
        let result = reconcile(&ok("{}"), &[42], MutationMode::PerItem);
        assert_eq!(result, vec![ItemOutcome::failure(42, UNSPECIFIED_FAILURE)]);
    }

    #[test]
    fn test_batch_duplicate() {
        let resp = ok(
            r#"{"results":[{"media_id":7,"success":false,"error":["Media has already been taken"]}]}"#,
        );
        let result = reconcile(&resp, &[7], MutationMode::Batch);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].media_id, 7);
        assert_eq!(result[0].status, OutcomeStatus::Duplicate);
    }

    #[test]
    fn test_batch_failure_detail() {
        let resp = ok(r#"{"results":[{"media_id":7,"success":false,"error":["Something else"]}]}"#);
        let result = reconcile(&resp, &[7], MutationMode::Batch);
        assert_eq!(result, vec![ItemOutcome::failure(7, "Something else")]);
    }

    #[test]
    fn test_batch_correlates_by_media_id() {
        let resp = ok(r#"{"results":[
            {"media_id":3,"success":true},
            {"media_id":1,"success":false,"error":["Media has already been taken"]},
            {"media_id":2,"success":false,"error":["Invalid"]}
        ]}"#);
        let result = reconcile(&resp, &[1, 2, 3], MutationMode::Batch);
        let ids: Vec<_> = result.iter().map(|o| o.media_id).collect();
        let statuses: Vec<_> = result.iter().map(|o| o.status).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(
            statuses,
            vec![
                OutcomeStatus::Duplicate,
                OutcomeStatus::Failure,
                OutcomeStatus::Success
            ]
        );
    }

    #[test]
    fn test_batch_missing_id_is_unreported() {
        let resp = ok(r#"{"results":[{"media_id":1,"success":true}]}"#);
        let result = reconcile(&resp, &[1, 2], MutationMode::Batch);
        assert_eq!(
            result,
            vec![ItemOutcome::success(1), ItemOutcome::unreported(2)]
        );
    }

    #[test]
    fn test_batch_repeated_id_uses_each_result_once() {
        let resp = ok(r#"{"results":[
            {"media_id":5,"success":true},
            {"media_id":5,"success":false,"error":["Media has already been taken"]}
        ]}"#);
        let result = reconcile(&resp, &[5, 5], MutationMode::Batch);
        let statuses: Vec<_> = result.iter().map(|o| o.status).collect();
        assert_eq!(statuses, vec![OutcomeStatus::Success, OutcomeStatus::Duplicate]);
        assert!(result.iter().all(|o| o.media_id == 5));
    }

    #[test]
    fn test_batch_repeated_id_with_one_result() {
        let resp = ok(r#"{"results":[{"media_id":5,"success":true}]}"#);
        let result = reconcile(&resp, &[5, 5], MutationMode::Batch);
        assert_eq!(result, vec![ItemOutcome::success(5), ItemOutcome::unreported(5)]);
    }

    #[test]
    fn test_ack_with_both_error_keys_is_duplicate() {
        let resp = ok(
            r#"{"success":false,"errors":["Media has already been taken"],"error":["Media has already been taken"]}"#,
        );
        let result = reconcile(&resp, &[42], MutationMode::PerItem);
        assert_eq!(result[0].status, OutcomeStatus::Duplicate);
    }

    #[test]
    fn test_batch_refused_without_results() {
        let resp = ok(r#"{"success":false,"status_message":"List is locked."}"#);
        let result = reconcile(&resp, &[1, 2], MutationMode::Batch);
        assert_eq!(result, fail_all(&[1, 2], "List is locked."));
    }

    #[test]
    fn test_non_success_status_fails_every_id() {
        let resp = ApiResponse::new(401, r#"{"status_code":3,"status_message":"Authentication failed"}"#);
        let result = reconcile(&resp, &[1, 2, 3], MutationMode::Batch);
        assert_eq!(result.len(), 3);
        for (outcome, id) in result.iter().zip([1, 2, 3]) {
            assert_eq!(outcome.media_id, id);
            assert_eq!(outcome.status, OutcomeStatus::Failure);
            assert_eq!(outcome.detail, resp.body);
        }
    }

    #[test]
    fn test_unparseable_body_fails_every_id() {
        let result = reconcile(&ok("<html>oops</html>"), &[1, 2], MutationMode::Batch);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|o| o.status == OutcomeStatus::Failure));
        assert_eq!(result[0].detail, result[1].detail);
        assert!(!result[0].detail.is_empty());
    }
}
