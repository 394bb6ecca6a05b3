use axum::http::{HeaderMap, header};

/// Whether `headers` carry `Authorization: Bearer <expected>` exactly.
/// An unset secret admits every request.
pub(super) fn is_authorized(expected: Option<&str>, headers: &HeaderMap) -> bool {
    let Some(secret) = expected else {
        return true;
    };
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    constant_time_eq(presented, &format!("Bearer {secret}"))
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
