//! # game_app
//!
//! Stands in for the external callers of the engine: it creates one game
//! session, spawns characters, moves them concurrently, applies velocity, and
//! reports the outcome of every action the way a front end would.
//!
//! ## Run Sequence
//!
//! 1. Parse options and initialise logging (`RUST_LOG`, default `game_app=info`).
//! 2. Create the session and spawn the configured entities.
//! 3. Run the movement system on every entity, one blocking task per entity.
//! 4. Apply velocity to every entity.
//! 5. Log final positions.

mod config;
mod session;
mod status;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::{Args, SessionConfig};
use session::GameSession;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("game_app=info".parse()?))
        .init();

    let config = SessionConfig::from(Args::parse());
    let session = Arc::new(GameSession::new(config)?);
    let entities = session.spawn_all()?;
    info!(
        world = %session.world().id(),
        entities = entities.len(),
        "characters spawned"
    );

    let mut tasks = JoinSet::new();
    for &entity in &entities {
        let session = Arc::clone(&session);
        tasks.spawn_blocking(move || (entity, session.move_repeatedly(entity)));
    }
    while let Some(joined) = tasks.join_next().await {
        let (entity, result) = joined?;
        match result {
            Ok(moves) => info!(%entity, moves, status = status::MOVED, "movement done"),
            Err(err) => warn!(%entity, error = %err, status = status::status_message(&err), "movement failed"),
        }
    }

    for &entity in &entities {
        match session.apply_velocity(entity) {
            Ok(_) => info!(%entity, status = status::VELOCITY_APPLIED, "velocity applied"),
            Err(err) => warn!(%entity, error = %err, status = status::status_message(&err), "velocity not applied"),
        }
    }

    for &entity in &entities {
        let position = session.position(entity)?;
        info!(
            %entity,
            x = position.x,
            y = position.y,
            z = position.z,
            description = %position.description,
            "final position"
        );
    }

    info!(world = %session.world().id(), "game session finished");
    Ok(())
}
