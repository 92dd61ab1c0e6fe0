use super::*;

#[test]
fn safe_redirect_target_keeps_in_app_paths() {
    assert_eq!(safe_redirect_target(Some("/submit")), "/submit");
    assert_eq!(safe_redirect_target(Some("/profile/7?tab=a")), "/profile/7?tab=a");
}

#[test]
fn safe_redirect_target_rejects_other_origins() {
    assert_eq!(safe_redirect_target(Some("https://evil.example/")), "/");
    assert_eq!(safe_redirect_target(Some("//evil.example/")), "/");
    assert_eq!(safe_redirect_target(Some("/\\evil.example")), "/");
    assert_eq!(safe_redirect_target(Some("submit")), "/");
}

#[test]
fn safe_redirect_target_defaults_home() {
    assert_eq!(safe_redirect_target(None), "/");
    assert_eq!(safe_redirect_target(Some("   ")), "/");
}

#[test]
fn signup_href_carries_redirect() {
    assert_eq!(signup_href(Some("/submit")), "/signup?redirect=%2Fsubmit");
    assert_eq!(signup_href(Some("")), "/signup");
    assert_eq!(signup_href(None), "/signup");
}
