use super::*;
use serde_json::json;

#[test]
fn status_table_maps_to_kinds() {
    let cases = [
        (401, FailureKind::AuthRequired),
        (403, FailureKind::Forbidden),
        (422, FailureKind::Validation),
        (500, FailureKind::ServerError),
        (502, FailureKind::ServerError),
        (503, FailureKind::ServerError),
        (599, FailureKind::ServerError),
        (400, FailureKind::Unknown),
        (404, FailureKind::Unknown),
        (409, FailureKind::Unknown),
        (429, FailureKind::Unknown),
        (302, FailureKind::Unknown),
        (600, FailureKind::Unknown),
    ];
    for (status, expected) in cases {
        assert_eq!(FailureKind::from_status(status), expected, "status {status}");
    }
}

#[test]
fn default_messages_match_site_wording() {
    assert_eq!(FailureKind::AuthRequired.default_message(), "Please log in to continue.");
    assert_eq!(
        FailureKind::Forbidden.default_message(),
        "You don't have permission to perform this action."
    );
    assert_eq!(FailureKind::Validation.default_message(), "Please check your input and try again.");
    assert_eq!(
        FailureKind::ServerError.default_message(),
        "Something went wrong on our end. Please try again later."
    );
    assert_eq!(
        FailureKind::NetworkUnreachable.default_message(),
        "Unable to connect to the server. Please check your internet connection."
    );
    assert_eq!(FailureKind::Unknown.default_message(), "An unexpected error occurred. Please try again.");
}

#[test]
fn validation_message_comes_from_body() {
    let body = json!({ "error": "email already registered" });
    let failure = ApiFailure::from_response(422, Some(&body));
    assert_eq!(failure.kind(), FailureKind::Validation);
    assert_eq!(failure.message(), "email already registered");
    assert_eq!(failure.status(), Some(422));
    assert_eq!(failure.to_string(), "email already registered");
}

#[test]
fn validation_without_body_error_uses_default() {
    for body in [None, Some(json!({})), Some(json!({ "error": "  " })), Some(json!({ "error": 7 }))] {
        let failure = ApiFailure::from_response(422, body.as_ref());
        assert_eq!(failure.message(), "Please check your input and try again.");
    }
}

#[test]
fn non_validation_kinds_keep_default_message_and_detail() {
    let body = json!({ "error": "Token has expired" });
    let failure = ApiFailure::from_response(401, Some(&body));
    assert_eq!(failure.message(), "Please log in to continue.");
    assert_eq!(failure.detail(), Some("Token has expired"));

    let body = json!({ "error": "database is locked" });
    let failure = ApiFailure::from_response(500, Some(&body));
    assert_eq!(failure.kind(), FailureKind::ServerError);
    assert_eq!(failure.message(), "Something went wrong on our end. Please try again later.");
}

#[test]
fn network_failure_has_no_status() {
    let failure = ApiFailure::network("connection refused");
    assert_eq!(failure.kind(), FailureKind::NetworkUnreachable);
    assert_eq!(failure.status(), None);
    assert_eq!(failure.detail(), Some("connection refused"));
    assert_eq!(
        failure.message(),
        "Unable to connect to the server. Please check your internet connection."
    );
}

#[test]
fn predicates_track_kind() {
    let auth = ApiFailure::from_response(401, None);
    assert!(auth.is_auth_error());
    assert!(!auth.is_forbidden_error());
    assert!(!auth.is_network_error());

    let forbidden = ApiFailure::from_response(403, None);
    assert!(forbidden.is_forbidden_error());
    assert!(!forbidden.is_auth_error());

    let network = ApiFailure::network("timed out");
    assert!(network.is_network_error());
    assert!(!network.is_auth_error());

    let server = ApiFailure::from_response(503, None);
    assert!(!server.is_auth_error() && !server.is_forbidden_error() && !server.is_network_error());
}

#[test]
fn unexpected_payload_is_unknown() {
    let failure = ApiFailure::unexpected_payload(Some(200), "missing field `id`");
    assert_eq!(failure.kind(), FailureKind::Unknown);
    assert_eq!(failure.status(), Some(200));
    assert_eq!(failure.message(), "An unexpected error occurred. Please try again.");
}

#[test]
fn kind_display_is_snake_case() {
    assert_eq!(FailureKind::NetworkUnreachable.to_string(), "network_unreachable");
    assert_eq!(FailureKind::AuthRequired.as_str(), "auth_required");
}
