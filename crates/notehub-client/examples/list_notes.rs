//! Lists the first page of notes from the configured NoteHub endpoint.
//!
//! ```bash
//! NOTEHUB_TOKEN=... cargo run --package notehub-client --example list_notes
//! ```
//!
//! Reads `.env` if present; see `NoteHubConfig::from_env` for the full
//! variable table. Pass a search term as the first argument to filter.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notehub_client::{ListNotesRequest, NoteHubClient, NotesApi};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = NoteHubClient::from_env()?;

    let mut request = ListNotesRequest::default();
    if let Some(term) = std::env::args().nth(1) {
        request = request.with_search(term);
    }

    let page = client.list_notes(request).await?;

    println!(
        "{} note(s), {} page(s) total",
        page.notes.len(),
        page.total_pages
    );
    for note in &page.notes {
        println!("  [{}] {}: {}", note.tag, note.id, note.title);
    }

    Ok(())
}
