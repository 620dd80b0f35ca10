//! Shared HTTP constants (headers, problem URIs, limits).

pub(crate) const HEADER_USER_TOKEN: &str = "x-javap-user-token";
pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

pub(crate) const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";
pub(crate) const PROBLEM_INTERNAL: &str = "https://javap.yawk.at/problems/internal";
pub(crate) const PROBLEM_BAD_REQUEST: &str = "https://javap.yawk.at/problems/bad-request";
pub(crate) const PROBLEM_UNAUTHORIZED: &str = "https://javap.yawk.at/problems/unauthorized";
pub(crate) const PROBLEM_NOT_FOUND: &str = "https://javap.yawk.at/problems/not-found";
pub(crate) const PROBLEM_PAYLOAD_TOO_LARGE: &str =
    "https://javap.yawk.at/problems/payload-too-large";

pub(crate) const MAX_BODY_BYTES: usize = 1024 * 1024;
