//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tagurit_core` linkage.
//! - Exercise one catalog round-trip so wiring breaks fail loudly.
//! - Keep output deterministic for quick local sanity checks.

use std::collections::BTreeSet;
use std::error::Error;
use tagurit_core::{Catalog, FilterEngine, Item, MemoryStore};

fn main() {
    println!("tagurit_core ping={}", tagurit_core::ping());
    println!("tagurit_core version={}", tagurit_core::core_version());

    if let Err(err) = smoke() {
        eprintln!("tagurit_core smoke failed: {err}");
        std::process::exit(1);
    }
}

/// Loads two items, filters for one, and reports the counts.
fn smoke() -> Result<(), Box<dyn Error>> {
    let mut catalog = Catalog::new(MemoryStore::new());

    let mut example = Item::new("Example", "http://www.example.com/");
    example.tags = ["news", "fave"].iter().map(|s| s.to_string()).collect();
    catalog.upsert(example)?;
    catalog.upsert(Item::new("Plain", "http://plain.org"))?;

    let mut engine = FilterEngine::new();
    let required: BTreeSet<String> = ["fave".to_string()].into_iter().collect();
    engine.set_filter(required, "example")?;

    println!(
        "tagurit_core smoke items={} visible={}",
        catalog.len(),
        engine.count_visible(catalog.items())
    );
    Ok(())
}
