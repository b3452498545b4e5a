//! Resolve natural-language requests into structured playback actions
//!
//! The LLM is used for translation only: it maps free text onto a fixed
//! action vocabulary plus free-text search queries. It never talks to the
//! streaming service itself; the executor does that.

use crate::core::error::{DjError, Result};
use crate::llm::CompletionClient;
use crate::playback::PlaybackClient;
use serde::{Deserialize, Serialize};

/// A resolved instruction set for one turn
///
/// Every field is optional; the empty object is a valid no-op action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Action {
    /// Coarse transport directives, order-insensitive
    #[serde(default)]
    pub actions: Vec<ActionKind>,
    /// Track to search, enqueue, and start playing next
    #[serde(default, rename = "toPlay")]
    pub to_play: Option<String>,
    /// Tracks to search and enqueue, in order
    #[serde(default, rename = "toQueue")]
    pub to_queue: Vec<String>,
}

impl Action {
    pub fn requests(&self, kind: ActionKind) -> bool {
        self.actions.contains(&kind)
    }

    /// True when executing this action would issue no remote calls
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
            && self.to_play.as_deref().map_or(true, str::is_empty)
            && self.to_queue.is_empty()
    }
}

/// The fixed directive vocabulary the LLM may emit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Play,
    Pause,
    ClearQueue,
}

/// System prompt fixing the assistant's music/DJ context
const SYSTEM_PROMPT: &str = "https://spotify.com\nhttps://reddit.com/r/ListenToThis";

/// Instruction template prepended to the raw utterance
const INSTRUCTION_PROMPT: &str = r#"You are a music recommendation and DJ API bot. All responses should be in the same as this example JSON format:

```json
{
"actions":["pause","play", "clearQueue"],
"toPlay":"Dynamite by Tao Cruz", // optional
"toQueue":["Megalovania by Toby Fox", "Hello by Adelle"]
}
```
I want you to reply only with the JSON object and no other text. All song strings will be sent as a query to spotify.

"#;

/// Resolve one utterance into an `Action`
///
/// Exact "play"/"pause" short-circuit: the transport call is attempted
/// best-effort and an empty action is returned without consulting the
/// model, whether or not the call succeeded. Everything else goes through
/// one completion request whose reply must parse as an `Action` object.
pub async fn resolve(
    llm: &dyn CompletionClient,
    playback: &dyn PlaybackClient,
    input: &str,
) -> Result<Action> {
    println!("{}", input);
    if input == "play" {
        if let Err(err) = playback.play().await {
            tracing::debug!(%err, "literal play failed, ignoring");
        }
        return Ok(Action::default());
    }
    if input == "pause" {
        if let Err(err) = playback.pause().await {
            tracing::debug!(%err, "literal pause failed, ignoring");
        }
        return Ok(Action::default());
    }

    let user_prompt = format!("{}{}", INSTRUCTION_PROMPT, input);
    let response = llm.complete(SYSTEM_PROMPT, &user_prompt).await?;
    let json_str = extract_json(&response)?;

    let action: Action = serde_json::from_str(json_str).map_err(|e| {
        DjError::LlmError(format!(
            "Failed to parse action: {} - Response: {}",
            e, response
        ))
    })?;

    Ok(action)
}

/// Extract the JSON object from the LLM response (handles surrounding text)
fn extract_json(response: &str) -> Result<&str> {
    let start = response
        .find('{')
        .ok_or_else(|| DjError::LlmError("No JSON found in response".into()))?;
    // only braces after the opening one can close the object
    let end = response[start..]
        .rfind('}')
        .ok_or_else(|| DjError::LlmError("No closing brace found in response".into()))?;
    Ok(&response[start..=start + end])
}
