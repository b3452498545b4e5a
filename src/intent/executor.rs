//! Action execution - realizes a resolved action against the playback client
//!
//! Steps run strictly in order: coarse transport nudges first, then the
//! destructive queue clear, then the "play this now" track, a trailing
//! pause re-check, and finally bulk queue additions. Transport nudges are
//! best-effort; everything else propagates and aborts the turn.

use crate::core::error::{DjError, Result};
use crate::intent::resolver::{Action, ActionKind};
use crate::playback::{PlaybackClient, Track};

/// Execute a resolved action as an ordered sequence of playback calls
pub async fn execute(playback: &dyn PlaybackClient, action: &Action) -> Result<()> {
    if action.requests(ActionKind::Play) {
        if let Err(err) = playback.play().await {
            tracing::debug!(%err, "play nudge failed, ignoring");
        }
    }
    if action.requests(ActionKind::Pause) {
        if let Err(err) = playback.pause().await {
            tracing::debug!(%err, "pause nudge failed, ignoring");
        }
    }

    if action.requests(ActionKind::ClearQueue) {
        clear_queue(playback).await?;
    }

    if let Some(query) = action.to_play.as_deref().filter(|q| !q.is_empty()) {
        let track = search_first(playback, query).await?;
        println!(
            "adding song \"{}\" by {} to queue",
            track.name,
            track.primary_artist()
        );
        playback.add_to_queue(&track.uri).await?;

        println!("playing...");
        let state = playback.current_playback().await?;
        if state.is_playing {
            // skip so the just-queued track becomes current
            playback.skip_to_next().await?;
        } else {
            playback.play().await?;
        }
    }

    // deliberate re-check: pause must win over the play side effects above
    if action.requests(ActionKind::Pause) {
        println!("pausing...");
        playback.pause().await?;
    }

    if !action.to_queue.is_empty() {
        println!("adding songs to queue");
        for query in &action.to_queue {
            let track = search_first(playback, query).await?;
            println!(
                "adding song \"{}\" by {} to queue",
                track.name,
                track.primary_artist()
            );
            playback.add_to_queue(&track.uri).await?;
        }
    }
    println!("done!");

    Ok(())
}

/// Drain the queue by skipping once per item in a snapshot of its contents
///
/// Best-effort by count: tracks enqueued by another client mid-drain are
/// not accounted for.
pub async fn clear_queue(playback: &dyn PlaybackClient) -> Result<()> {
    println!("clearing queue...");
    if let Err(err) = playback.pause().await {
        tracing::debug!(%err, "pre-clear pause failed, ignoring");
    }
    let queued = playback.queue().await?;
    for _ in &queued {
        playback.skip_to_next().await?;
    }
    Ok(())
}

/// Search a query and take the first hit; zero hits fail the turn
async fn search_first(playback: &dyn PlaybackClient, query: &str) -> Result<Track> {
    println!("searching song \"{}\"", query);
    let results = playback.search_tracks(query).await?;
    results
        .into_iter()
        .next()
        .ok_or_else(|| DjError::NoSearchResults(query.into()))
}
