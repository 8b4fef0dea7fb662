//! Command-line demo of the to-do widget.
//!
//! Each argument is typed into the widget and submitted, one after another,
//! against an in-memory creation service. The rendered HTML is printed after
//! every step. Without arguments a few sample items are used.
//!
//! ```text
//! TODO_LOG=debug TODO_API_LATENCY_MS=200 cargo run -p todo-app -- "Buy milk" "Walk the dog"
//! ```

use anyhow::{Context, Result};
use std::sync::Arc;
use todo_app::{Config, InMemoryItemsApi, TodoAction, TodoEnvironment, TodoReducer, TodoState, TodoView};
use todo_widget_core::view::View;
use todo_widget_runtime::Store;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type TodoStore = Store<TodoState, TodoAction, TodoEnvironment<InMemoryItemsApi>, TodoReducer<InMemoryItemsApi>>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Invalid configuration")?;

    tracing_subscriber::registry()
        .with(config.log_filter()?)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    tracing::info!(?config, "Starting to-do widget demo");

    let api = Arc::new(InMemoryItemsApi::with_latency(config.api_latency()));
    let store: TodoStore = Store::with_config(
        TodoState::new(),
        TodoReducer::new(),
        TodoEnvironment::new(api),
        config.store_config(),
    );

    let mut drafts: Vec<String> = std::env::args().skip(1).collect();
    if drafts.is_empty() {
        drafts = vec!["Buy milk".into(), "Write documentation".into(), "   ".into()];
    }

    println!("=== To-do widget ===\n");
    print_view(&store).await;

    for draft in drafts {
        println!("\n> type {draft:?}, press submit");
        submit(&store, draft, &config).await?;
        print_view(&store).await;
    }

    let state = store.state(Clone::clone).await;
    println!("\nItems created: {}", state.items.len());
    for item in &state.items {
        println!("  [{}] {}", item.id, item.text);
    }

    store
        .shutdown(config.shutdown_timeout())
        .await
        .context("Shutdown timed out")?;

    println!("\n=== Demo Complete ===");
    Ok(())
}

/// Type `draft` into the input, press submit, and wait for the outcome
async fn submit(store: &TodoStore, draft: String, config: &Config) -> Result<()> {
    store.send(TodoAction::DraftChanged { value: draft }).await?;
    let mut handle = store.send(TodoAction::Submit).await?;
    handle
        .wait_with_timeout(config.api_latency().saturating_add(config.shutdown_timeout()))
        .await
        .context("Creation call did not resolve")?;
    Ok(())
}

async fn print_view(store: &TodoStore) {
    let html = store.state(|state| TodoView.render(state).to_html()).await;
    println!("{html}");
}
