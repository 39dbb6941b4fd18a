use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use feedlab::engine::config::SessionConfig;
use feedlab::engine::event::{Event, InputEvent};
use feedlab::engine::pool::ContentListing;
use feedlab::engine::reactor::Reactor;
use feedlab::engine::scheduler::SideEffect;
use feedlab::engine::time::TICK_MS;

/// Stand-in for the storage-listing collaborator: six groups of four.
fn sample_listing() -> Vec<ContentListing> {
    let mut listings = Vec::new();
    for group in [3, 5, 8, 12, 15, 21] {
        for n in 0..4 {
            let label = format!("{group}_post_{n}.jpg");
            listings.push(ContentListing {
                media_ref: format!("https://cdn.example/modules/{label}"),
                label,
            });
        }
    }
    listings
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("feedlab demo session booting...");

    // Optional JSON listing file: [{"label": "...", "media_ref": "..."}]
    let listings: Vec<ContentListing> = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading listing file {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing listing file {path}"))?
        }
        None => sample_listing(),
    };

    let config = SessionConfig::default();
    let like_target = config.like_target as usize;
    let save_target = config.save_target as usize;
    let max_visible = config.max_visible;

    let (tx, rx) = mpsc::channel(100);
    let mut reactor = Reactor::new(rx, config);
    reactor.load_pool(listings);

    // Scripted learner: one action every 400ms, spaced so each slot has
    // settled before it is acted on again.
    tokio::spawn(async move {
        let mut cadence = tokio::time::interval(Duration::from_millis(400));
        let mut sent = 0usize;
        loop {
            cadence.tick().await;
            let event = if sent < like_target {
                InputEvent::like("script", sent % max_visible)
            } else if sent < like_target + save_target {
                InputEvent::save("script", sent % max_visible)
            } else {
                break;
            };
            if tx.send(Event::Input(event)).await.is_err() {
                break;
            }
            sent += 1;
        }
    });

    let mut cadence = tokio::time::interval(Duration::from_millis(TICK_MS));
    cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    'session: loop {
        cadence.tick().await;

        let mut events = Vec::new();
        while let Ok(event) = reactor.receiver.try_recv() {
            events.push(event);
        }

        for effect in reactor.tick_step(events) {
            match effect {
                SideEffect::Log(msg) => tracing::info!("{msg}"),
                SideEffect::ModuleComplete { module_id } => {
                    println!("{module_id}: Complete");
                    break 'session;
                }
            }
        }
    }

    let snapshot = reactor.telemetry.snapshot();
    println!(
        "likes: {}  saves: {}  polarization score: {}%",
        reactor.state.like_count(),
        reactor.state.save_count(),
        reactor.polarization_score()
    );
    println!(
        "replacements served: {} (same-group ratio {:.2})  exhausted: {}",
        snapshot.replacement_stats.served,
        snapshot.replacement_stats.same_group_ratio,
        snapshot.replacement_stats.exhausted
    );

    Ok(())
}
