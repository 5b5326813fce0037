//! Chat completions client.
//!
//! Sends one chat completion request to the inference endpoint and, when the
//! model streams, hands the response body to an [`EventReader`].

use crate::config::ClientConfig;
use crate::error::{http_status_message, ClientError};
use crate::models::{ChatCompletion, ChatCompletionOptions};
use crate::sse::EventReader;
use crate::traits::{Headers, HttpClient};

/// Models that reject `stream: true`.
pub const NON_STREAMING_MODELS: [&str; 3] = ["o1", "o1-mini", "o1-preview"];

/// Whether responses for `model` are requested as an event stream.
pub fn supports_streaming(model: &str) -> bool {
    !NON_STREAMING_MODELS.contains(&model)
}

/// Result of a successful chat completion request.
#[derive(Debug)]
pub struct ChatCompletionResponse {
    /// Decoder over the response body; `None` when the model does not stream.
    ///
    /// The caller owns the reader and should [`close`](EventReader::close) it
    /// when done.
    pub reader: Option<EventReader<ChatCompletion>>,
}

/// Client for the chat completions endpoint.
///
/// # Example
///
/// ```ignore
/// use modelstream::adapters::ReqwestHttpClient;
/// use modelstream::client::ModelsClient;
///
/// let client = ModelsClient::new(ReqwestHttpClient::new(), token, ClientConfig::default());
/// let response = client.get_chat_completion_stream(options).await?;
/// ```
pub struct ModelsClient<H: HttpClient> {
    http: H,
    token: String,
    config: ClientConfig,
}

impl<H: HttpClient> ModelsClient<H> {
    pub fn new(http: H, token: impl Into<String>, config: ClientConfig) -> Self {
        Self {
            http,
            token: token.into(),
            config,
        }
    }

    /// Headers sent with every request.
    fn request_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.token),
        );
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("x-ms-useragent".to_string(), self.config.user_agent.clone());
        headers.insert("x-ms-user-agent".to_string(), self.config.user_agent.clone());
        headers
    }

    /// Send a chat completion request.
    ///
    /// The `stream` flag of `options` is set from the model, overriding the
    /// caller's value. On a non-success status the body is read into
    /// [`ClientError::HttpStatus`] and the connection released; a body that
    /// fails partway contributes whatever arrived before the failure.
    pub async fn get_chat_completion_stream(
        &self,
        mut options: ChatCompletionOptions,
    ) -> Result<ChatCompletionResponse, ClientError> {
        options.stream = supports_streaming(&options.model);
        let body = serde_json::to_string(&options)?;

        tracing::debug!(
            model = %options.model,
            stream = options.stream,
            messages = options.messages.len(),
            "Sending chat completion request to {}",
            self.config.inference_url
        );

        let response = self
            .http
            .post_stream(&self.config.inference_url, &body, &self.request_headers())
            .await?;

        if !response.is_success() {
            let status = response.status;
            let (body, read_error) = response.drain().await;
            if let Some(e) = read_error {
                tracing::debug!("Error body of status {} cut short: {}", status, e);
            }
            tracing::warn!("Chat completion request failed with status {}", status);
            return Err(ClientError::HttpStatus {
                status,
                message: http_status_message(status, &body),
            });
        }

        if !options.stream {
            tracing::debug!("Model {} does not stream; discarding body", options.model);
            return Ok(ChatCompletionResponse { reader: None });
        }

        Ok(ChatCompletionResponse {
            reader: Some(EventReader::new(response.body)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::error::StreamError;
    use crate::models::ChatMessage;
    use crate::traits::HttpError;
    use bytes::Bytes;

    const URL: &str = "https://models.example.com/chat/completions";

    fn client(http: MockHttpClient) -> ModelsClient<MockHttpClient> {
        ModelsClient::new(
            http,
            "secret-token",
            ClientConfig::default().with_inference_url(URL),
        )
    }

    fn hi_options(model: &str) -> ChatCompletionOptions {
        ChatCompletionOptions::new(model, vec![ChatMessage::user("Hi")])
    }

    #[test]
    fn test_supports_streaming() {
        assert!(!supports_streaming("o1"));
        assert!(!supports_streaming("o1-mini"));
        assert!(!supports_streaming("o1-preview"));
        assert!(supports_streaming("openai/gpt-4.1"));
        assert!(supports_streaming("o1-pro"));
        assert!(supports_streaming("openai/o1"));
    }

    #[tokio::test]
    async fn test_streams_deltas() {
        let http = MockHttpClient::new();
        http.set_response(
            URL,
            MockResponse::ok([
                "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hel\"}}]}\n\n",
                "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"lo\"}}]}\n\n",
                "data: [DONE]\n\n",
            ]),
        );
        let client = client(http.clone());

        let response = client
            .get_chat_completion_stream(hi_options("openai/gpt-4.1"))
            .await
            .unwrap();
        let mut reader = response.reader.unwrap();

        let mut text = String::new();
        while let Some(completion) = reader.read().await.unwrap() {
            text.extend(completion.delta_contents());
        }
        reader.close();

        assert_eq!(text, "Hello");
        assert_eq!(http.released_bodies(), 1);

        let sent = http.get_requests()[0].json().unwrap();
        assert_eq!(sent["stream"], serde_json::json!(true));
        assert_eq!(sent["model"], serde_json::json!("openai/gpt-4.1"));
    }

    #[tokio::test]
    async fn test_headers_sent() {
        let http = MockHttpClient::new();
        http.set_response(URL, MockResponse::ok(["data: [DONE]\n"]));
        let client = client(http.clone());

        client
            .get_chat_completion_stream(hi_options("openai/gpt-4.1"))
            .await
            .unwrap();

        let requests = http.get_requests();
        assert_eq!(requests.len(), 1);
        let headers = &requests[0].headers;
        assert_eq!(
            headers.get("Authorization"),
            Some(&"Bearer secret-token".to_string())
        );
        assert_eq!(
            headers.get("Content-Type"),
            Some(&"application/json".to_string())
        );
        assert_eq!(
            headers.get("x-ms-useragent"),
            Some(&"github-cli-models".to_string())
        );
        assert_eq!(
            headers.get("x-ms-user-agent"),
            Some(&"github-cli-models".to_string())
        );
    }

    #[tokio::test]
    async fn test_custom_user_agent() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::ok(["data: [DONE]\n"]));
        let client = ModelsClient::new(
            http.clone(),
            "t",
            ClientConfig::default().with_user_agent("my-agent/1.0"),
        );

        client
            .get_chat_completion_stream(hi_options("m"))
            .await
            .unwrap();

        let requests = http.get_requests();
        assert_eq!(requests[0].url, crate::config::DEFAULT_INFERENCE_URL);
        assert_eq!(
            requests[0].headers.get("x-ms-user-agent"),
            Some(&"my-agent/1.0".to_string())
        );
    }

    #[tokio::test]
    async fn test_o1_request_omits_stream() {
        let http = MockHttpClient::new();
        http.set_response(
            URL,
            MockResponse::ok([r#"{"choices":[{"index":0,"message":{"content":"x"}}]}"#]),
        );
        let client = client(http.clone());

        let mut options = hi_options("o1");
        options.stream = true;
        let response = client.get_chat_completion_stream(options).await.unwrap();

        assert!(response.reader.is_none());
        assert_eq!(http.released_bodies(), 1);

        let sent = http.get_requests()[0].json().unwrap();
        assert!(sent.get("stream").is_none());
        assert_eq!(sent["model"], serde_json::json!("o1"));
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let http = MockHttpClient::new();
        http.set_response(
            URL,
            MockResponse::status(401, r#"{"error":"bad token"}"#),
        );
        let client = client(http.clone());

        let err = client
            .get_chat_completion_stream(hi_options("openai/gpt-4.1"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(err.requires_reauth());
        assert_eq!(err.to_string(), "unauthorized\n{\"error\":\"bad token\"}");
        assert_eq!(http.released_bodies(), 1);
    }

    #[tokio::test]
    async fn test_unauthorized_with_broken_body_keeps_status_message() {
        let http = MockHttpClient::new();
        http.set_response(
            URL,
            MockResponse::BrokenStream {
                status: 401,
                chunks: vec![Bytes::from(r#"{"error":"#)],
                error: HttpError::Io("reset".to_string()),
            },
        );
        let client = client(http.clone());

        let err = client
            .get_chat_completion_stream(hi_options("openai/gpt-4.1"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::HttpStatus { status: 401, .. }));
        assert!(err.requires_reauth());
        assert_eq!(err.to_string(), "unauthorized\n{\"error\":");
        assert_eq!(http.released_bodies(), 1);
    }

    #[tokio::test]
    async fn test_error_body_failing_immediately_still_reports_status() {
        let http = MockHttpClient::new();
        http.set_response(
            URL,
            MockResponse::BrokenStream {
                status: 500,
                chunks: vec![],
                error: HttpError::Timeout("body".to_string()),
            },
        );
        let client = client(http);

        let err = client
            .get_chat_completion_stream(hi_options("openai/gpt-4.1"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "unexpected response from the server: 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_server_error_body_read_across_chunks() {
        let http = MockHttpClient::new();
        http.set_response(
            URL,
            MockResponse::Stream {
                status: 500,
                chunks: vec![Bytes::from("bo"), Bytes::from("om")],
            },
        );
        let client = client(http);

        let err = client
            .get_chat_completion_stream(hi_options("openai/gpt-4.1"))
            .await
            .unwrap_err();

        assert!(!err.requires_reauth());
        assert_eq!(
            err.to_string(),
            "unexpected response from the server: 500 Internal Server Error\nboom"
        );
    }

    #[tokio::test]
    async fn test_bad_request_without_body() {
        let http = MockHttpClient::new();
        http.set_response(URL, MockResponse::status(400, ""));
        let client = client(http);

        let err = client
            .get_chat_completion_stream(hi_options("openai/gpt-4.1"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "bad request");
    }

    #[tokio::test]
    async fn test_transport_error_unchanged() {
        let http = MockHttpClient::new();
        http.set_response(
            URL,
            MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
        );
        let client = client(http);

        let err = client
            .get_chat_completion_stream(hi_options("openai/gpt-4.1"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ClientError::Transport(HttpError::ConnectionFailed(ref m)) if m == "refused"
        ));
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_mid_stream_failure_surfaces_from_reader() {
        let http = MockHttpClient::new();
        http.set_response(
            URL,
            MockResponse::BrokenStream {
                status: 200,
                chunks: vec![Bytes::from(
                    "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"a\"}}]}\n",
                )],
                error: HttpError::Io("connection reset".to_string()),
            },
        );
        let client = client(http);

        let mut reader = client
            .get_chat_completion_stream(hi_options("openai/gpt-4.1"))
            .await
            .unwrap()
            .reader
            .unwrap();

        let first = reader.read().await.unwrap().unwrap();
        assert_eq!(first.choices[0].delta_content(), Some("a"));
        let err = reader.read().await.unwrap_err();
        assert!(matches!(
            err,
            StreamError::Transport(HttpError::Io(ref m)) if m == "connection reset"
        ));
    }
}
