//! Token counters. No-ops unless the host installs a `metrics` recorder.

use metrics::counter;

pub(crate) fn track_jwt_issued(kind: &'static str) {
    counter!("jwt_tokens_issued_total", "kind" => kind).increment(1);
}

pub(crate) fn track_jwt_validation(status: &'static str) {
    counter!("jwt_validations_total", "status" => status).increment(1);
}
