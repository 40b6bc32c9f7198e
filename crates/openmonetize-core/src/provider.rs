//! AI providers and token usage extraction from their responses.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// AI provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provider {
    /// `OpenAI` (GPT models).
    OpenAi,
    /// Anthropic (Claude models).
    Anthropic,
    /// Google (Gemini models).
    Google,
    /// Cohere.
    Cohere,
    /// Mistral.
    Mistral,
    /// Any other provider, named as given.
    Custom(String),
}

impl Provider {
    /// Get the provider name as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::OpenAi => "OPENAI",
            Self::Anthropic => "ANTHROPIC",
            Self::Google => "GOOGLE",
            Self::Cohere => "COHERE",
            Self::Mistral => "MISTRAL",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = Infallible;

    /// Case-insensitive; unrecognized names become [`Provider::Custom`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "OPENAI" => Self::OpenAi,
            "ANTHROPIC" => Self::Anthropic,
            "GOOGLE" | "GEMINI" => Self::Google,
            "COHERE" => Self::Cohere,
            "MISTRAL" => Self::Mistral,
            _ => Self::Custom(s.to_string()),
        })
    }
}

/// Input and output token counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCounts {
    /// Prompt tokens.
    pub input_tokens: u64,
    /// Completion tokens.
    pub output_tokens: u64,
}

/// Extract token counts from a provider's raw response body.
///
/// Missing or malformed counters read as zero. Custom providers are not
/// inspected.
#[must_use]
pub fn normalize_usage(provider: &Provider, response: &Value) -> TokenCounts {
    let (section, input, output) = match provider {
        Provider::OpenAi | Provider::Mistral => ("/usage", "prompt_tokens", "completion_tokens"),
        Provider::Anthropic => ("/usage", "input_tokens", "output_tokens"),
        Provider::Google => ("/usageMetadata", "promptTokenCount", "candidatesTokenCount"),
        Provider::Cohere => ("/meta/billed_units", "input_tokens", "output_tokens"),
        Provider::Custom(_) => return TokenCounts::default(),
    };

    let Some(usage) = response.pointer(section) else {
        return TokenCounts::default();
    };
    let count = |key: &str| usage.get(key).and_then(Value::as_u64).unwrap_or(0);

    TokenCounts {
        input_tokens: count(input),
        output_tokens: count(output),
    }
}
