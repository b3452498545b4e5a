//! Deejay - Entry Point
//!
//! Sets up the async runtime, constructs the LLM and Spotify clients from
//! the environment, and runs the interactive dj> loop: refresh the access
//! token, dispatch literal commands directly, route everything else
//! through intent resolution and execution.

use deejay::core::error::Result;
use deejay::intent::{execute, resolve};
use deejay::llm::LlmClient;
use deejay::playback::{PlaybackClient, SpotifyClient};

use std::io::{self, Write};
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("deejay=debug")
        .init();

    // Credentials come from the environment; a .env file is optional
    if let Err(err) = dotenvy::dotenv() {
        tracing::debug!(%err, "no .env file loaded");
    }

    tracing::info!("Deejay starting...");

    // Create the async runtime for remote calls
    let rt = Runtime::new()?;

    let spotify = SpotifyClient::from_env()?;
    let llm = LlmClient::from_env()?;

    // Clear screen, same as a fresh DJ booth
    print!("\x1b[2J");

    loop {
        print!("dj> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }
        if input == "exit" {
            break;
        }

        // Tokens are short-lived; refresh once per turn before dispatch
        if let Err(err) = rt.block_on(spotify.refresh_access_token()) {
            println!("Could not refresh access token: {}", err);
            continue;
        }

        if input == "play" {
            if let Err(err) = rt.block_on(spotify.play()) {
                println!("Could not start playback: {}", err);
            }
            continue;
        }
        if input == "pause" {
            if let Err(err) = rt.block_on(spotify.pause()) {
                println!("Could not pause playback: {}", err);
            }
            continue;
        }

        match rt.block_on(run_turn(&llm, &spotify, input)) {
            Ok(()) => {}
            Err(err) => println!("Could not handle request: {}", err),
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

/// One full turn: resolve the utterance, then execute the action
async fn run_turn(llm: &LlmClient, playback: &SpotifyClient, input: &str) -> Result<()> {
    let action = resolve(llm, playback, input).await?;
    execute(playback, &action).await
}
