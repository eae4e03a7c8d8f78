//! Walks through each eviction policy on the same small workload.
//!
//! Run with: cargo run --example policies
//!
//! Set `EVICTKIT_CAPACITY` / `EVICTKIT_POLICY` to change the last section,
//! and `RUST_LOG=evictkit=debug` to see more of the tracing output.

use evictkit::builder::{CacheBuilder, CachePolicy};
use evictkit::config::CacheConfig;
use evictkit::listener::StdoutListener;
use evictkit::traits::{CoreCache, EvictingCache};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "evictkit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Eviction Policies ===\n");

    // Same sequence for every policy: fill four slots, read A and C, then
    // overflow with E and F.
    for (n, policy) in CachePolicy::ALL.into_iter().enumerate() {
        println!("{}. {} Cache", n + 1, policy);
        let mut cache = CacheBuilder::new(4)
            .listener(StdoutListener)
            .build::<&str, &str>(policy);

        cache.put(Some("A"), Some("Hello"));
        cache.put(Some("B"), Some("World"));
        cache.put(Some("C"), Some("Foo"));
        cache.put(Some("D"), Some("Bar"));
        cache.get(&"A");
        cache.get(&"C");

        print!("   ");
        cache.put(Some("E"), Some("Baz"));
        print!("   ");
        cache.put(Some("F"), Some("Qux"));

        let mut keys: Vec<_> = ["A", "B", "C", "D", "E", "F"]
            .into_iter()
            .filter(|k| cache.contains(k))
            .collect();
        keys.sort_unstable();
        println!("   kept: {:?}, next victim: {:?}", keys, cache.peek_victim());
        println!();
    }

    // Absent keys or values are ignored.
    println!("{}. Absent arguments", CachePolicy::ALL.len() + 1);
    let mut cache = CacheBuilder::new(2)
        .listener(StdoutListener)
        .build::<&str, &str>(CachePolicy::Lru);
    cache.put(None, Some("no key"));
    cache.put(Some("A"), None);
    println!("   len after two ignored puts: {}", cache.len());
    println!("   lookup(None): {:?}", cache.lookup(None));
    println!();

    // Default listener logs through tracing.
    println!("{}. Configured from environment", CachePolicy::ALL.len() + 2);
    let config = match CacheConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("   invalid configuration: {e}");
            return;
        }
    };
    let mut cache = match CacheBuilder::build_from_config::<u32, u32>(&config) {
        Ok(cache) => cache,
        Err(e) => {
            eprintln!("   cannot build cache: {e}");
            return;
        }
    };
    for i in 0..config.capacity as u32 + 2 {
        cache.insert(i, i * i);
    }
    println!(
        "   {} cache, capacity {}, len {}",
        cache.policy(),
        cache.capacity(),
        cache.len()
    );
}
