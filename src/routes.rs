//! Paths and the admin guard's decisions.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

pub const HOME: &str = "/";
pub const PORTFOLIO: &str = "/portfolio";
pub const CONTACT: &str = "/contact";
pub const LOGIN: &str = "/admin";
pub const DASHBOARD: &str = "/admin/dashboard";

/// What the guard renders for a protected path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session restore still running
    Wait,
    Render,
    Redirect(String),
}

pub fn guard(restoring: bool, authenticated: bool, requested: &str) -> GuardDecision {
    if authenticated {
        GuardDecision::Render
    } else if restoring {
        GuardDecision::Wait
    } else {
        GuardDecision::Redirect(login_url(requested))
    }
}

/// `/admin?from=<path>`
pub fn login_url(from: &str) -> String {
    format!("{}?from={}", LOGIN, utf8_percent_encode(from, NON_ALPHANUMERIC))
}

/// An in-app absolute path, not protocol-relative.
fn is_internal(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') && !path.contains("://")
}

fn path_only(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

/// Where to go after sign-in: `from` when it is a safe internal path other
/// than the login page, else the dashboard.
pub fn post_login_target(from: Option<&str>) -> String {
    match from {
        Some(path) if is_internal(path) && path_only(path).trim_end_matches('/') != LOGIN => path.to_string(),
        _ => DASHBOARD.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard() {
        assert_eq!(guard(true, false, DASHBOARD), GuardDecision::Wait);
        assert_eq!(guard(true, true, DASHBOARD), GuardDecision::Render);
        assert_eq!(guard(false, true, DASHBOARD), GuardDecision::Render);
        assert_eq!(
            guard(false, false, DASHBOARD),
            GuardDecision::Redirect("/admin?from=%2Fadmin%2Fdashboard".into())
        );
    }

    #[test]
    fn test_post_login_target() {
        assert_eq!(post_login_target(None), DASHBOARD);
        assert_eq!(post_login_target(Some(DASHBOARD)), DASHBOARD);
        assert_eq!(post_login_target(Some("/portfolio?x=1")), "/portfolio?x=1");
        assert_eq!(post_login_target(Some("/admin")), DASHBOARD);
        assert_eq!(post_login_target(Some("/admin/?from=/admin")), DASHBOARD);
        assert_eq!(post_login_target(Some("//evil.example")), DASHBOARD);
        assert_eq!(post_login_target(Some("https://evil.example")), DASHBOARD);
        assert_eq!(post_login_target(Some("/\\evil.example")), DASHBOARD);
    }

    #[test]
    fn test_already_signed_in_on_login_goes_to_dashboard() {
        let target = post_login_target(None);
        assert_eq!(target, DASHBOARD);
        assert_eq!(guard(false, true, &target), GuardDecision::Render);
    }
}
