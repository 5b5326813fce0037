//! Command-line argument parsing.
//!
//! This module handles parsing command-line arguments and determining
//! which CLI command to execute.

use std::time::Duration;

/// Model used when `--model` is not given
pub const DEFAULT_MODEL: &str = "openai/gpt-4.1";

/// Host whose token is used when `--host` is not given
pub const DEFAULT_HOST: &str = "github.com";

pub const USAGE: &str = "\
Usage: modelstream [OPTIONS] <PROMPT>...

Send a prompt to a hosted model and stream the reply to stdout.

Options:
  -m, --model <ID>          Model to use [default: openai/gpt-4.1]
  -s, --system <PROMPT>     System prompt
      --url <URL>           Chat completions endpoint
      --host <HOST>         Host whose token is used [default: github.com]
      --max-tokens <N>      Maximum number of tokens to generate
      --temperature <F>     Sampling temperature
      --top-p <F>           Nucleus sampling cutoff
      --timeout <SECS>      Request timeout in seconds
  -h, --help                Print help
  -V, --version             Print version

Environment:
  GH_TOKEN, GITHUB_TOKEN    Token for github.com (falls back to `gh auth token`)
  MODELSTREAM_INFERENCE_URL Chat completions endpoint
  RUST_LOG                  Log filter for stderr diagnostics [default: warn]";

/// Argument parsing errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value for {flag}: {value}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown option: {0}")]
    UnknownFlag(String),
    #[error("no prompt given")]
    MissingPrompt,
}

/// Options for a single chat request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatArgs {
    pub model: String,
    pub system_prompt: String,
    pub prompt: String,
    /// Endpoint override; `None` keeps the configured endpoint
    pub url: Option<String>,
    pub host: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub timeout: Option<Duration>,
}

impl ChatArgs {
    /// Arguments for `prompt` with every option at its default.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: String::new(),
            prompt: prompt.into(),
            url: None,
            host: DEFAULT_HOST.to_string(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout: None,
        }
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Send a prompt and stream the reply
    Chat(ChatArgs),
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, ArgsError> {
    value.parse().map_err(|_| ArgsError::InvalidValue {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

/// Parse command-line arguments and return the appropriate command.
///
/// Flags take their value from the next argument or after `=`
/// (`--model=o1`). Everything else, and everything after `--`, is joined with
/// spaces into the prompt.
///
/// # Examples
///
/// ```
/// use modelstream::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["modelstream".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut chat = ChatArgs::new("");
    let mut words: Vec<String> = Vec::new();
    let mut only_words = false;

    // Skip the program name
    let mut args = args.skip(1);
    while let Some(arg) = args.next() {
        if only_words || !arg.starts_with('-') || arg == "-" {
            words.push(arg);
            continue;
        }

        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (arg.clone(), None),
        };

        let mut value = |flag: &str| -> Result<String, ArgsError> {
            match inline.clone() {
                Some(v) => Ok(v),
                None => args
                    .next()
                    .ok_or_else(|| ArgsError::MissingValue(flag.to_string())),
            }
        };

        match flag.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--" => only_words = true,
            "--model" | "-m" => chat.model = value(&flag)?,
            "--system" | "-s" => chat.system_prompt = value(&flag)?,
            "--url" => chat.url = Some(value(&flag)?),
            "--host" => chat.host = value(&flag)?,
            "--max-tokens" => chat.max_tokens = Some(parse_value(&flag, &value(&flag)?)?),
            "--temperature" => chat.temperature = Some(parse_value(&flag, &value(&flag)?)?),
            "--top-p" => chat.top_p = Some(parse_value(&flag, &value(&flag)?)?),
            "--timeout" => {
                let secs: u64 = parse_value(&flag, &value(&flag)?)?;
                chat.timeout = Some(Duration::from_secs(secs));
            }
            _ => return Err(ArgsError::UnknownFlag(flag.clone())),
        }
    }

    let prompt = words.join(" ");
    if prompt.trim().is_empty() {
        return Err(ArgsError::MissingPrompt);
    }
    chat.prompt = prompt;
    Ok(CliCommand::Chat(chat))
}
