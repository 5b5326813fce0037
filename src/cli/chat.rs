//! The chat command: one prompt in, one streamed reply out.

use std::io::Write;

use color_eyre::eyre::{bail, WrapErr};
use color_eyre::{Result, Section};

use crate::cli::args::ChatArgs;
use crate::client::ModelsClient;
use crate::config::ClientConfig;
use crate::conversation::Conversation;
use crate::error::StreamError;
use crate::models::{ChatCompletion, ChatCompletionOptions, ChatMessageRole};
use crate::sse::EventReader;
use crate::traits::{CredentialsProvider, HttpClient};

/// Apply command-line overrides to `base`.
pub fn resolve_config(args: &ChatArgs, base: ClientConfig) -> ClientConfig {
    let mut config = base;
    if let Some(url) = &args.url {
        config = config.with_inference_url(url.clone());
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(timeout);
    }
    config
}

/// Build the request payload for `args`.
pub fn build_options(args: &ChatArgs) -> ChatCompletionOptions {
    let mut conversation = Conversation::new(args.system_prompt.clone());
    conversation.add_message(ChatMessageRole::User, args.prompt.clone());

    let mut options = ChatCompletionOptions::new(args.model.clone(), conversation.messages());
    options.max_tokens = args.max_tokens;
    options.temperature = args.temperature;
    options.top_p = args.top_p;
    options
}

/// Write every delta fragment to `out` as it arrives.
///
/// Output is flushed after each event. The reader is closed once `[DONE]` is
/// reached; on error it is dropped with the returned error. Returns the full
/// text written.
pub async fn stream_to_writer<W: Write>(
    mut reader: EventReader<ChatCompletion>,
    out: &mut W,
) -> Result<String> {
    let mut text = String::new();

    while let Some(completion) = reader.read().await? {
        for fragment in completion.delta_contents() {
            out.write_all(fragment.as_bytes())
                .wrap_err("Failed to write model output")?;
            text.push_str(fragment);
        }
        out.flush().wrap_err("Failed to flush model output")?;
    }

    reader.close();
    Ok(text)
}

/// Whether `err` came from a body that ended before `[DONE]`.
fn is_truncated(err: &color_eyre::Report) -> bool {
    err.downcast_ref::<StreamError>()
        .is_some_and(StreamError::is_truncation)
}

/// Send `args.prompt` and stream the reply to `out`.
pub async fn run_chat<H, C, W>(
    args: &ChatArgs,
    config: ClientConfig,
    http: H,
    credentials: &C,
    out: &mut W,
) -> Result<String>
where
    H: HttpClient,
    C: CredentialsProvider + ?Sized,
    W: Write,
{
    let token = credentials
        .token_for_host(&args.host)
        .await
        .wrap_err_with(|| format!("Failed to get a token for {}", args.host))
        .suggestion("Run `gh auth login` or set GH_TOKEN")?;

    let client = ModelsClient::new(http, token, config);
    let response = match client.get_chat_completion_stream(build_options(args)).await {
        Ok(response) => response,
        Err(e) if e.requires_reauth() => {
            return Err(e).suggestion("The token was rejected; run `gh auth refresh` or set GH_TOKEN")
        }
        Err(e) => return Err(e.into()),
    };

    let Some(reader) = response.reader else {
        bail!("model {} does not return a streamed response", args.model);
    };

    let text = match stream_to_writer(reader, out).await {
        Ok(text) => text,
        Err(e) if is_truncated(&e) => {
            return Err(e).suggestion("The reply was cut off before it finished; try again")
        }
        Err(e) => return Err(e),
    };
    writeln!(out).wrap_err("Failed to write model output")?;
    Ok(text)
}
