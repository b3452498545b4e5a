//! Deejay - Natural-Language DJ Console
//!
//! Translates free-form requests ("play something chill", "clear the
//! queue") into playback actions on a remote streaming account, using an
//! LLM to map text onto a fixed action vocabulary.

pub mod core;
pub mod intent;
pub mod llm;
pub mod playback;
