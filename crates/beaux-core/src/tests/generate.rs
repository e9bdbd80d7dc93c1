use crate::Error;
use crate::generate::{
    ChatMessage, Choice, CompletionClient, CompletionResponse, GenerationRequest, Generator,
    ResponseMessage, Role, SYSTEM_PROMPT,
};

/// Scripted client: returns canned contents in order and records requests.
#[derive(Default)]
struct ScriptedClient {
    responses: Vec<Option<String>>,
    requests: Vec<GenerationRequest>,
}

impl ScriptedClient {
    fn with_responses(responses: Vec<Option<String>>) -> Self {
        Self {
            responses,
            requests: Vec::new(),
        }
    }
}

impl CompletionClient for ScriptedClient {
    fn complete(
        &mut self,
        _api_key: &str,
        request: &GenerationRequest,
    ) -> crate::Result<CompletionResponse> {
        self.requests.push(request.clone());
        let content = if self.responses.is_empty() {
            Some("function Generated() { return null; }".to_string())
        } else {
            self.responses.remove(0)
        };
        Ok(CompletionResponse {
            choices: vec![Choice {
                message: ResponseMessage { content },
            }],
        })
    }
}

#[test]
fn empty_prompt_fails_before_any_call() {
    let mut generator = Generator::new(ScriptedClient::default());
    let err = generator.generate("   ", "key", &[]);
    assert!(matches!(err, Err(Error::InvalidInput(_))));
    assert!(generator.client_mut().requests.is_empty());
}

#[test]
fn missing_credential_fails_before_any_call() {
    let mut generator = Generator::new(ScriptedClient::default());
    let err = generator.generate("a login form", "", &[]);
    assert!(matches!(err, Err(Error::MissingCredential)));
    assert!(generator.client_mut().requests.is_empty());
}

#[test]
fn request_carries_system_history_and_user_turns() {
    let mut generator = Generator::new(ScriptedClient::default());
    let history = vec![
        ChatMessage::user("a button"),
        ChatMessage::assistant("function Button() { return null; }"),
    ];
    generator.generate("make it red", "key", &history).unwrap();

    let request = &generator.client_mut().requests[0];
    assert_eq!(request.messages.len(), 4);
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[0].content, SYSTEM_PROMPT);
    assert_eq!(request.messages[1].content, "a button");
    assert_eq!(request.messages[2].role, Role::Assistant);
    assert_eq!(
        request.messages[3].content,
        "Create a React component that: make it red"
    );
}

#[test]
fn generated_content_is_trimmed() {
    let client =
        ScriptedClient::with_responses(vec![Some("  function X() { return 1; }  ".to_string())]);
    let mut generator = Generator::new(client);
    let code = generator.generate("x", "key", &[]).unwrap();
    assert_eq!(code, "function X() { return 1; }");
}

#[test]
fn a_response_with_no_content_is_a_typed_error() {
    let client = ScriptedClient::with_responses(vec![None]);
    let mut generator = Generator::new(client);
    let err = generator.generate("x", "key", &[]);
    assert!(matches!(err, Err(Error::Generation(_))));
}

#[test]
fn a_superseded_response_is_discarded() {
    let mut generator = Generator::new(ScriptedClient::default());
    let (first, _) = generator.prepare("first", "key", &[]).unwrap();
    let (second, _) = generator.prepare("second", "key", &[]).unwrap();

    assert!(!generator.accepts(first));
    assert!(generator.accepts(second));

    let stale = CompletionResponse {
        choices: vec![Choice {
            message: ResponseMessage {
                content: Some("stale".to_string()),
            },
        }],
    };
    // The first request resolves late; its response must not be applied.
    assert_eq!(generator.resolve(first, stale).unwrap(), None);

    let fresh = CompletionResponse {
        choices: vec![Choice {
            message: ResponseMessage {
                content: Some("fresh".to_string()),
            },
        }],
    };
    assert_eq!(
        generator.resolve(second, fresh).unwrap(),
        Some("fresh".to_string())
    );
}

#[test]
fn wire_shapes_match_the_completion_api() {
    let request = GenerationRequest {
        model: "openai/gpt-3.5-turbo".to_string(),
        messages: vec![ChatMessage {
            role: Role::System,
            content: "s".to_string(),
        }],
    };
    let encoded = serde_json::to_value(&request).unwrap();
    assert_eq!(encoded["model"], "openai/gpt-3.5-turbo");
    assert_eq!(encoded["messages"][0]["role"], "system");

    let response: CompletionResponse = serde_json::from_str(
        r#"{"choices": [{"message": {"content": "code"}, "index": 0}], "id": "x", "model": "m", "object": "chat.completion"}"#,
    )
    .unwrap();
    assert_eq!(response.choices[0].message.content.as_deref(), Some("code"));
}
