//! Response body classification for the portal endpoints.
//!
//! The portal replies with loosely structured XML; the tooling it replaces
//! keyed off `SUCCESS`/`FAIL` markers anywhere in the body rather than parsing
//! the document. That behavior is kept, but factored into explicit classifier
//! functions so the precedence is auditable.

/// Three-state classification of a portal response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    Success,
    Failure,
    /// Body carried neither marker. Only the license endpoint distinguishes
    /// this from a plain failure.
    Unknown,
}

fn contains_marker(body: &str, marker: &str) -> bool {
    body.to_uppercase().contains(marker)
}

/// Classify a login response: any body containing `SUCCESS`
/// (case-insensitive) passes, everything else fails.
pub fn classify_login(body: &str) -> ResponseClass {
    if contains_marker(body, "SUCCESS") {
        ResponseClass::Success
    } else {
        ResponseClass::Failure
    }
}

/// Classify a license-request response.
///
/// `FAIL` is checked before `SUCCESS`, so a body carrying both markers is a
/// failure. A body with neither is `Unknown`.
pub fn classify_license(body: &str) -> ResponseClass {
    if contains_marker(body, "FAIL") {
        ResponseClass::Failure
    } else if contains_marker(body, "SUCCESS") {
        ResponseClass::Success
    } else {
        ResponseClass::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_success_marker_anywhere_in_body() {
        let body = r#"<?xml version="1.0"?><Root><Result>SUCCESS</Result></Root>"#;
        assert_eq!(classify_login(body), ResponseClass::Success);
    }

    #[test]
    fn login_marker_is_case_insensitive() {
        assert_eq!(classify_login("result: success"), ResponseClass::Success);
        assert_eq!(classify_login("Success!"), ResponseClass::Success);
    }

    #[test]
    fn login_anything_else_is_failure() {
        assert_eq!(classify_login(""), ResponseClass::Failure);
        assert_eq!(classify_login("FAIL"), ResponseClass::Failure);
        assert_eq!(classify_login("<html>welcome</html>"), ResponseClass::Failure);
    }

    #[test]
    fn license_fail_marker_wins() {
        assert_eq!(classify_license("FAIL"), ResponseClass::Failure);
        assert_eq!(classify_license("request failed"), ResponseClass::Failure);
    }

    #[test]
    fn license_fail_takes_precedence_over_success() {
        // Both markers present: treated as failure.
        assert_eq!(
            classify_license("SUCCESS but also FAIL"),
            ResponseClass::Failure
        );
    }

    #[test]
    fn license_success_without_fail() {
        assert_eq!(classify_license("<Result>SUCCESS</Result>"), ResponseClass::Success);
    }

    #[test]
    fn license_neither_marker_is_unknown() {
        assert_eq!(classify_license(""), ResponseClass::Unknown);
        assert_eq!(classify_license("<html>maintenance</html>"), ResponseClass::Unknown);
    }
}
