use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use castdex_client::{ClientConfig, HttpCatalogClient};
use castdex_core::{
    EngineConfig, EngineSnapshot, InMemoryBridge, QueryEngine, TracingSink, UrlStateBridge,
    WatchScrollTrigger,
};
use castdex_model::{CatalogFilter, CharacterStatus};
use castdex_observe::{LogConfig, init_logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LogConfig::default())?;
    info!("logger initialized");

    let endpoint = std::env::var("CATALOG_ENDPOINT")
        .unwrap_or_else(|_| ClientConfig::default().endpoint);
    let client = HttpCatalogClient::new(ClientConfig {
        endpoint: endpoint.clone(),
        ..ClientConfig::default()
    })?;
    info!("catalog client configured: endpoint={endpoint}");

    let bridge = Arc::new(InMemoryBridge::new());
    let engine = QueryEngine::spawn(
        Arc::new(client),
        Arc::clone(&bridge) as Arc<dyn UrlStateBridge>,
        Arc::new(TracingSink),
        EngineConfig::default(),
    );
    let mut snapshots = engine.subscribe();

    // Infinite scroll stand-in: the demo publishes intersection events by hand.
    let (intersect, mut trigger) = WatchScrollTrigger::new();
    engine.bind_scroll_trigger(&mut trigger);

    let snap = settled(&mut snapshots).await;
    report("initial page", &snap);

    info!("filtering: name=rick, status=alive");
    engine.set_filter(
        CatalogFilter::empty()
            .with_name("rick")
            .with_status(CharacterStatus::Alive),
    )?;
    let snap = settled(&mut snapshots).await;
    report("filtered", &snap);

    // Scroll until the catalog runs out (bounded for the demo).
    for _ in 0..3 {
        if !snapshots.borrow().has_more {
            break;
        }
        intersect.send(true)?;
        intersect.send(false)?;
        let snap = settled(&mut snapshots).await;
        report("scrolled", &snap);
    }

    info!("resetting filters");
    engine.reset()?;
    let snap = settled(&mut snapshots).await;
    report("reset", &snap);
    info!("persisted query state: {:?}", bridge.pairs());

    engine.shutdown();
    Ok(())
}

/// Wait until the engine goes quiet after the previous command.
async fn settled(
    snapshots: &mut tokio::sync::watch::Receiver<EngineSnapshot>,
) -> EngineSnapshot {
    // Let the debounce window open before sampling quiescence.
    tokio::time::sleep(Duration::from_millis(400)).await;
    loop {
        {
            let snap = snapshots.borrow_and_update();
            if !snap.is_loading() {
                return snap.clone();
            }
        }
        snapshots.changed().await.expect("engine worker gone");
    }
}

fn report(label: &str, snap: &EngineSnapshot) {
    info!(
        "{label}: {} of {} items loaded (page {}/{}, has_more={})",
        snap.items.len(),
        snap.total_count,
        snap.page,
        snap.total_pages,
        snap.has_more,
    );
    for character in snap.items.iter().take(3) {
        info!(
            "  #{} {} [{} / {}] from {}",
            character.id, character.name, character.status, character.species,
            character.origin.name,
        );
    }
}
