use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use feedlab::engine::config::SessionConfig;
use feedlab::engine::event::{Event, InputEvent};
use feedlab::engine::pool::ContentListing;
use feedlab::engine::reactor::Reactor;
use feedlab::engine::scheduler::SideEffect;
use feedlab::engine::time::TICK_MS;

// Internal driver requests (never touch the engine)
enum DriverEvent {
    ShowBoard,
    ShowStats,
}

fn sample_listing() -> Vec<ContentListing> {
    let mut listings = Vec::new();
    for group in [3, 5, 8, 12, 15, 21] {
        for n in 0..5 {
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
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    tracing::info!("Starting live feed console...");

    let (tx_input, rx_input) = mpsc::channel(100);
    let (driver_tx, mut driver_rx) = mpsc::channel::<DriverEvent>(16);

    let mut reactor = Reactor::new(rx_input, SessionConfig::default());
    reactor.load_pool(sample_listing());

    // Stdin reader: engine actions go to the reactor channel, console-only
    // requests stay on the driver channel.
    tokio::spawn(async move {
        let stdin = tokio::io::stdin();
        let reader = BufReader::new(stdin);
        let mut lines = reader.lines();

        println!("Commands: like <slot>, save <slot>, board, stats");

        while let Ok(Some(line)) = lines.next_line().await {
            let mut parts = line.split_whitespace();
            let event = match (parts.next(), parts.next().and_then(|n| n.parse::<usize>().ok())) {
                (Some("like"), Some(slot)) => Some(Event::Input(InputEvent::like("console", slot))),
                (Some("save"), Some(slot)) => Some(Event::Input(InputEvent::save("console", slot))),
                (Some("board"), _) => {
                    let _ = driver_tx.send(DriverEvent::ShowBoard).await;
                    None
                }
                (Some("stats"), _) => {
                    let _ = driver_tx.send(DriverEvent::ShowStats).await;
                    None
                }
                (None, _) => None,
                _ => {
                    println!("Commands: like <slot>, save <slot>, board, stats");
                    None
                }
            };

            if let Some(event) = event {
                if let Err(e) = tx_input.send(event).await {
                    tracing::error!("Failed to send input: {}", e);
                    break;
                }
            }
        }
    });

    let mut cadence = tokio::time::interval(std::time::Duration::from_millis(TICK_MS));
    cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!("Session loop active.");

    loop {
        cadence.tick().await;

        while let Ok(request) = driver_rx.try_recv() {
            match request {
                DriverEvent::ShowBoard => {
                    for slot in reactor.state.board.slots() {
                        match &slot.occupant {
                            Some(record) => println!(
                                "  [{}] {:?} {} (group {})",
                                slot.index, slot.transition, record.label, record.group_key
                            ),
                            None => println!("  [{}] {:?} <empty>", slot.index, slot.transition),
                        }
                    }
                }
                DriverEvent::ShowStats => {
                    let snapshot = reactor.telemetry.snapshot();
                    println!(
                        "  likes {}/{}  saves {}/{}  polarization {}%",
                        reactor.state.like_count(),
                        reactor.config.like_target,
                        reactor.state.save_count(),
                        reactor.config.save_target,
                        reactor.polarization_score()
                    );
                    println!(
                        "  replacements {} (same-group {})  exhausted {}",
                        snapshot.replacement_stats.served,
                        snapshot.replacement_stats.same_group,
                        snapshot.replacement_stats.exhausted
                    );
                }
            }
        }

        let mut events = Vec::new();
        while let Ok(event) = reactor.receiver.try_recv() {
            events.push(event);
        }

        for effect in reactor.tick_step(events) {
            match effect {
                SideEffect::Log(msg) => tracing::info!("{msg}"),
                SideEffect::ModuleComplete { module_id } => {
                    println!("{module_id}: Complete");
                    return;
                }
            }
        }
    }
}
