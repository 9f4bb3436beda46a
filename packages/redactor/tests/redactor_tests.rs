//! Integration tests for the redactor against a mock completion service.
//!
//! These cover:
//! 1. Construction (credentials, model listing)
//! 2. Detection response handling
//! 3. Redaction with fixed tokens and per-string mappings

use openai_client::{ChatCompletion, OpenAIError, ToolChoice};
use redactor::detect::{SYSTEM_PROMPT, USER_AGENT};
use redactor::testing::{MockCall, MockCompletionService};
use redactor::{
    ConfigError, DetectionError, RedactionError, Redactor, RedactorOptions, ReplacementTable,
    DEFAULT_MODEL, TOOL_NAME,
};

const TEST_MODEL: &str = "gpt-3.5-turbo";

const TEST_TEXT: &str = "This test script was written by a developer named John Doe. You can contact him through his email john.doe@no-such-domain.com or his cellphone number +1 123 456 7890. He is in South Pole, Antarctica right now, but will be back to answer you in a month or so.\n";

fn options() -> RedactorOptions {
    RedactorOptions::new()
        .with_api_keys("sk-test", "org-test")
        .with_model(TEST_MODEL)
}

/// Helper to build a redactor over a mock that lists the test model.
async fn setup_redactor() -> (Redactor<MockCompletionService>, MockCompletionService) {
    let mock = MockCompletionService::with_models(["gpt-4o", TEST_MODEL]);
    let redactor = Redactor::with_service(options(), mock.clone())
        .await
        .unwrap();
    (redactor, mock)
}

// =============================================================================
// Construction
// =============================================================================

#[tokio::test]
async fn test_construction_requires_credentials() {
    let cases = [
        RedactorOptions::new().with_model(TEST_MODEL),
        RedactorOptions::new().with_api_keys("", "org-test").with_model(TEST_MODEL),
        RedactorOptions::new().with_api_keys("sk-test", "").with_model(TEST_MODEL),
        RedactorOptions::new().with_api_keys("", "").with_verbose(true),
    ];

    for options in cases {
        let mock = MockCompletionService::with_models([TEST_MODEL]);
        let err = Redactor::with_service(options, mock.clone()).await.unwrap_err();

        assert!(matches!(err, ConfigError::MissingCredentials));
        assert!(mock.calls().is_empty(), "no service call before credentials check");
    }
}

#[tokio::test]
async fn test_construction_rejects_unlisted_model() {
    let mock = MockCompletionService::with_models(["gpt-4o", "gpt-4o-mini"]);
    let err = Redactor::with_service(options(), mock).await.unwrap_err();

    match err {
        ConfigError::UnsupportedModel { model } => assert_eq!(model, TEST_MODEL),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_construction_uses_default_model() {
    let mock = MockCompletionService::with_models([DEFAULT_MODEL]);
    let redactor = Redactor::with_service(
        RedactorOptions::new().with_api_keys("sk-test", "org-test"),
        mock.clone(),
    )
    .await
    .unwrap();

    assert_eq!(redactor.model(), DEFAULT_MODEL);
    assert!(matches!(mock.calls().as_slice(), [MockCall::ListModels]));
}

#[tokio::test]
async fn test_construction_propagates_listing_failure() {
    let mock = MockCompletionService::with_models([TEST_MODEL]).fail_list_models(OpenAIError::Api {
        status: 401,
        message: "Incorrect API key provided".into(),
    });
    let err = Redactor::with_service(options(), mock).await.unwrap_err();

    match err {
        ConfigError::ListModels(source) => assert_eq!(source.status(), Some(401)),
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Detect
// =============================================================================

#[tokio::test]
async fn test_detect_returns_detected_verbatim() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_detected(["John Doe", "+1 123 456 7890", "John Doe", "South Pole, Antarctica"]);

    let detected = redactor.detect(TEST_TEXT).await.unwrap();

    assert_eq!(
        detected,
        vec!["John Doe", "+1 123 456 7890", "John Doe", "South Pole, Antarctica"]
    );
}

#[tokio::test]
async fn test_detect_sends_detection_request() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_detected(Vec::<String>::new());

    redactor.detect(TEST_TEXT).await.unwrap();

    let requests = mock.chat_requests();
    assert_eq!(requests.len(), 1);

    let request = &requests[0];
    assert_eq!(request.model, TEST_MODEL);
    assert_eq!(request.temperature, Some(0.1));
    assert_eq!(request.user.as_deref(), Some(USER_AGENT));
    assert_eq!(request.messages[0].role, "system");
    assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
    assert_eq!(request.messages[1].role, "user");
    assert_eq!(request.messages[1].content, TEST_TEXT);
    assert_eq!(request.tools.len(), 1);
    assert_eq!(request.tools[0].name(), TOOL_NAME);
    assert_eq!(request.tool_choice, Some(ToolChoice::function(TOOL_NAME)));
}

#[tokio::test]
async fn test_detect_issues_fresh_request_each_call() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_detected(["John Doe"]).push_detected(["John Doe"]);

    redactor.detect(TEST_TEXT).await.unwrap();
    redactor.detect(TEST_TEXT).await.unwrap();

    assert_eq!(mock.chat_requests().len(), 2);
}

#[tokio::test]
async fn test_detect_no_choices() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_completion(ChatCompletion::default());

    let err = redactor.detect(TEST_TEXT).await.unwrap_err();
    assert!(matches!(err, DetectionError::NoChoices));
}

#[tokio::test]
async fn test_detect_no_tool_call() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_completion(redactor::testing::completion(vec![]));

    let err = redactor.detect(TEST_TEXT).await.unwrap_err();
    assert!(matches!(err, DetectionError::NoToolCall));
}

#[tokio::test]
async fn test_detect_tool_name_mismatch() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_tool_call("summarize_text", r#"{"detected": ["John Doe"]}"#);

    let err = redactor.detect(TEST_TEXT).await.unwrap_err();
    assert!(matches!(
        err,
        DetectionError::ToolNameMismatch { ref actual, .. } if actual == "summarize_text"
    ));
}

#[tokio::test]
async fn test_detect_unparsable_arguments() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_tool_call(TOOL_NAME, r#"{"detected": ["John Doe""#);

    let err = redactor.detect(TEST_TEXT).await.unwrap_err();
    assert!(matches!(err, DetectionError::MalformedArguments(_)));
}

#[tokio::test]
async fn test_detect_propagates_service_error() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_error(OpenAIError::Network("connection reset".into()));

    let err = redactor.detect(TEST_TEXT).await.unwrap_err();
    assert!(matches!(err, DetectionError::Service(OpenAIError::Network(_))));
}

// =============================================================================
// Redact
// =============================================================================

#[tokio::test]
async fn test_redact_with_fixed_token() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_detected(["John Doe", "john.doe@no-such-domain.com"]);

    let redacted = redactor.redact(TEST_TEXT, "<<<X>>>").await.unwrap();

    let expected = TEST_TEXT
        .replacen("John Doe", "<<<X>>>", 1)
        .replacen("john.doe@no-such-domain.com", "<<<X>>>", 1);
    assert_eq!(redacted, expected);
    assert!(!redacted.contains("John Doe"));
    assert!(!redacted.contains("john.doe@no-such-domain.com"));
    assert!(redacted.contains("+1 123 456 7890"));
}

#[tokio::test]
async fn test_redact_func_with_mapping_table() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_detected(["John Doe", "+1 123 456 7890", "South Pole"]);

    let table = ReplacementTable::new("<<<REDACTED>>>")
        .with("John Doe", "<<<NAME>>>")
        .with("+1 123 456 7890", "<<<PHONE>>>");

    let redacted = redactor
        .redact_func(TEST_TEXT, |d| table.replacement(d))
        .await
        .unwrap();

    assert_eq!(
        redacted,
        "This test script was written by a developer named <<<NAME>>>. You can contact him through his email john.doe@no-such-domain.com or his cellphone number <<<PHONE>>>. He is in <<<REDACTED>>>, Antarctica right now, but will be back to answer you in a month or so.\n"
    );
}

#[tokio::test]
async fn test_redact_nothing_detected() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_detected(Vec::<String>::new());

    let err = redactor.redact(TEST_TEXT, "<<<X>>>").await.unwrap_err();

    assert!(err.is_nothing_to_redact());
    assert!(matches!(err, RedactionError::NothingToRedact));
}

#[tokio::test]
async fn test_redact_propagates_detection_error() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_completion(ChatCompletion::default());

    let err = redactor
        .redact_func(TEST_TEXT, |_| unreachable!("no replacement on failure"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RedactionError::Detection(DetectionError::NoChoices)
    ));
    assert!(!err.is_nothing_to_redact());
}

#[tokio::test]
async fn test_redact_applies_in_detection_order() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_detected(["Doe", "John Doe"]);

    let redacted = redactor.redact(TEST_TEXT, "<<<X>>>").await.unwrap();

    // "Doe" goes first, so "John Doe" no longer occurs when its turn comes.
    assert!(redacted.contains("named John <<<X>>>."));
    assert_eq!(redacted, TEST_TEXT.replace("Doe", "<<<X>>>"));
}

#[tokio::test]
async fn test_redact_later_detection_matches_inserted_token() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_detected(["John Doe", "<<<NAME>>>"]);

    let table = ReplacementTable::new("[removed]").with("John Doe", "<<<NAME>>>");
    let redacted = redactor
        .redact_func(TEST_TEXT, |d| table.replacement(d))
        .await
        .unwrap();

    assert!(redacted.contains("named [removed]."));
    assert!(!redacted.contains("<<<NAME>>>"));
}

#[tokio::test]
async fn test_redact_empty_detection_matches_every_boundary() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_detected(["", "b"]);

    let redacted = redactor.redact("abc", "-").await.unwrap();

    assert_eq!(redacted, "-a---c-");
}

#[tokio::test]
async fn test_redact_only_empty_detection_is_not_nothing_to_redact() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_detected([""]);

    let redacted = redactor.redact("ab", "*").await.unwrap();

    assert_eq!(redacted, "*a*b*");
}

#[tokio::test]
async fn test_verbose_does_not_change_redaction() {
    let mock = MockCompletionService::with_models([TEST_MODEL]);
    let redactor = Redactor::with_service(options().with_verbose(true), mock.clone())
        .await
        .unwrap();
    mock.push_detected(["John Doe"]);

    let redacted = redactor.redact(TEST_TEXT, "<<<X>>>").await.unwrap();

    assert!(redactor.config().verbose());
    assert_eq!(redacted, TEST_TEXT.replace("John Doe", "<<<X>>>"));
    assert_eq!(mock.chat_requests().len(), 1);
}

#[tokio::test]
async fn test_detect_shape_errors_name_the_service() {
    let (redactor, mock) = setup_redactor().await;
    mock.push_completion(ChatCompletion::default());

    let err = redactor.redact(TEST_TEXT, "<<<X>>>").await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "there was no choice in chat completion from the completion service"
    );
}
