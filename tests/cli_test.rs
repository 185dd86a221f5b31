#[path = "common/mod.rs"]
mod common;

use common::AgoraTest;
use serial_test::serial;

// ============================================================================
// Config command tests
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let agora = AgoraTest::new();

    let output = agora.run_success(&["config", "show"]);
    assert!(output.contains("Configuration"));
    assert!(output.contains("paging.page_size"));
    assert!(output.contains("20"));
    assert!(output.contains("(not set)"));
}

#[test]
fn test_config_set_and_show_json() {
    let agora = AgoraTest::new();

    agora.run_success(&["config", "set", "selected_community", "rustaceans"]);
    agora.run_success(&["config", "set", "paging.lookup_page_size", "25"]);

    let output = agora.run_success(&["config", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["selected_community"], "rustaceans");
    assert_eq!(json["paging.lookup_page_size"], "25");
    assert!(agora.read_config().contains("rustaceans"));
}

#[test]
fn test_config_token_is_masked() {
    let agora = AgoraTest::new();

    let output = agora.run_success(&["config", "set", "auth.access_token", "secret-token-1234"]);
    assert!(!output.contains("secret-token"));

    let output = agora.run_success(&["config", "show"]);
    assert!(!output.contains("secret-token"));
    assert!(output.contains("1234"));
}

#[test]
fn test_config_set_invalid_key() {
    let agora = AgoraTest::new();

    let stderr = agora.run_failure(&["config", "set", "invalid.key", "value"]);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_config_set_zero_page_size() {
    let agora = AgoraTest::new();

    let stderr = agora.run_failure(&["config", "set", "paging.page_size", "0"]);
    assert!(stderr.contains("positive number"));
}

#[test]
fn test_invalid_config_file_is_reported() {
    let agora = AgoraTest::new();
    agora.write_config("api_url: not a url\n");

    agora.run_failure(&["config", "show"]);
}

// ============================================================================
// Draft command tests
// ============================================================================

#[test]
#[serial]
fn test_draft_round_trip() {
    let agora = AgoraTest::new();

    let output = agora.run_success(&["draft", "show"]);
    assert!(output.contains("No saved draft"));

    agora.run_success(&[
        "draft", "set", "--title", "Lunch?", "-c", "office", "-o", "Pizza", "-o", "Sushi",
    ]);
    agora.run_success(&["draft", "set", "--type", "multiple"]);

    let output = agora.run_success(&["draft", "show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["title"], "Lunch?");
    assert_eq!(json["community_id"], "office");
    assert_eq!(json["poll_type"], "multiple");
    assert_eq!(json["options"], serde_json::json!(["Pizza", "Sushi"]));

    assert!(agora.read_store().contains("poll-draft"));

    let output = agora.run_success(&["draft", "clear"]);
    assert!(output.contains("Draft discarded"));
    let output = agora.run_success(&["draft", "show"]);
    assert!(output.contains("No saved draft"));
}

#[test]
#[serial]
fn test_draft_submit_without_draft() {
    let agora = AgoraTest::new();

    let stderr = agora.run_failure(&["draft", "submit"]);
    assert!(stderr.contains("no draft"));
}

#[test]
#[serial]
fn test_draft_submit_invalid_draft_keeps_it() {
    let agora = AgoraTest::new();
    agora.run_success(&["draft", "set", "--title", "One option", "-c", "office", "-o", "Only"]);

    let stderr = agora.run_failure(&["draft", "submit"]);
    assert!(stderr.contains("option"));

    let output = agora.run_success(&["draft", "show"]);
    assert!(output.contains("One option"));
}

// ============================================================================
// List command argument handling (no network)
// ============================================================================

#[test]
fn test_polls_without_community() {
    let agora = AgoraTest::new();

    let stderr = agora.run_failure(&["polls"]);
    assert!(stderr.contains("community"));
}

#[test]
fn test_polls_invalid_sort() {
    let agora = AgoraTest::new();

    let stderr = agora.run_failure(&["polls", "-c", "office", "--sort", "random"]);
    assert!(stderr.contains("expected one of"));
}

#[test]
fn test_subcategory_requires_category() {
    let agora = AgoraTest::new();

    let stderr = agora.run_failure(&["services", "--subcategory", "guitar"]);
    assert!(stderr.contains("--category"));
}

#[test]
fn test_chats_require_sign_in() {
    let agora = AgoraTest::new();

    let stderr = agora.run_failure(&["chats"]);
    assert!(stderr.contains("sign in"));
}

#[test]
fn test_unreachable_backend_shows_generic_error() {
    let agora = AgoraTest::new();

    let output = agora.run(&["tags"]);
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Could not load"));
    assert!(stdout.contains("[Try again]"));
}
