// crates/sync-engine/examples/fetch_user.rs
//! Fetches one user and one user list, printing every emitted event
//!
//! ```text
//! RUST_LOG=debug cargo run -p resync-sync-engine --example fetch_user -- https://jsonplaceholder.typicode.com
//! ```

use futures::channel::mpsc;
use futures::StreamExt;
use resync_config::ConfigManager;
use resync_core::Event;
use resync_sync_engine::{ActionOptions, ChannelDispatcher, RequestExecutor, Resource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let base = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://jsonplaceholder.typicode.com".to_string());

    let config = ConfigManager::new()?.load_with_env_overrides()?;
    let executor = RequestExecutor::from_config(&config)?;

    let user = Resource::item("FETCH_USER", format!("{}/users/:id?", base));
    let users = Resource::collection("FETCH_USERS", format!("{}/users", base)).with_progress(true);

    let (tx, mut rx) = mpsc::unbounded::<Event>();
    let mut dispatcher = ChannelDispatcher::new(tx);

    executor
        .execute(&user, ActionOptions::new().with_param("id", 1), &mut dispatcher)
        .await?;
    executor
        .execute(&users, ActionOptions::new(), &mut dispatcher)
        .await?;
    drop(dispatcher);

    while let Some(event) = rx.next().await {
        match &event {
            Event::Progress(update) => println!(
                "{:>8} {:?} {} bytes",
                "progress",
                update.progress.direction,
                update.progress.loaded
            ),
            Event::Success(success) if success.collection.is_some() => println!(
                "{:>8} {} items, {} positions",
                "success",
                success.items.as_ref().map(|items| items.len()).unwrap_or(0),
                success.collection.as_ref().map(|c| c.len()).unwrap_or(0)
            ),
            other => println!("{}", serde_json::to_string_pretty(other)?),
        }
    }

    Ok(())
}
