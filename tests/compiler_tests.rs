//! Backend query compilation through the strategy trait

mod fixtures;

use fixtures::{init_tracing, watch_config};
use serde_json::json;
use sieve::prelude::*;

fn strategies() -> Vec<Box<dyn QueryCompiler>> {
    vec![
        Box::new(FlatQueryStrategy::new()),
        Box::new(SuffixedQueryStrategy::new()),
    ]
}

fn strategy(name: &str) -> Box<dyn QueryCompiler> {
    strategies()
        .into_iter()
        .find(|s| s.name() == name)
        .expect("strategy is registered")
}

fn listing_values() -> FilterValues {
    watch_config()
        .default_values()
        .with_search("red")
        .with_filter("price_min", 100)
        .with_filter("price_max", 500)
        .with_filter("brand", "Sei")
        .with_date_range(Some(DateRange::new(
            "created_at",
            Some("2024-01-01"),
            Some("2024-01-31"),
        )))
}

fn pairs(params: &QueryParams) -> Vec<(String, String)> {
    params.to_pairs()
}

fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

#[test]
fn test_flat_strategy_full_listing() {
    init_tracing();
    let params = strategy("flat").compile(&listing_values(), &watch_config());
    assert_eq!(
        pairs(&params),
        vec![
            pair("name", "red"),
            pair("variant.color.name", "red"),
            pair("price", "100:500"),
            pair("brand", "Sei"),
            pair("created_at", "20240101000000:20240131235959"),
            pair("sort", "created_at:desc"),
        ]
    );
}

#[test]
fn test_suffixed_strategy_full_listing() {
    init_tracing();
    let params = strategy("suffixed").compile(&listing_values(), &watch_config());
    assert_eq!(
        pairs(&params),
        vec![
            pair("name__like", "red"),
            pair("variant.color.name__like", "red"),
            pair("price__gte", "100"),
            pair("price__lte", "500"),
            pair("brand__like", "Sei"),
            pair("created_at__gte", "2024-01-01"),
            pair("created_at__lte", "2024-01-31"),
            pair("sort", "created_at:desc"),
        ]
    );
}

#[test]
fn test_min_max_merge_emits_one_entry() {
    let values = FilterValues::default()
        .with_filter("price_min", 100)
        .with_filter("price_max", 500);
    let params = strategy("flat").compile(&values, &watch_config());
    assert_eq!(params.len(), 1);
    assert_eq!(params.get("price"), Some(&QueryValue::from("100:500")));
    assert!(!params.contains_key("price_min"));
    assert!(!params.contains_key("price_max"));
}

#[test]
fn test_params_serialize_with_numbers_typed() {
    let values = FilterValues::default()
        .with_filter("price", "250")
        .with_filter("in_stock", true);
    let params = strategy("flat").compile(&values, &watch_config());
    assert_eq!(
        serde_json::to_value(&params).unwrap(),
        json!({"price": 250.0, "in_stock": "true"})
    );
}

#[test]
fn test_empty_state_compiles_to_nothing() {
    for strategy in strategies() {
        let params = strategy.compile(&FilterValues::default(), &watch_config());
        assert!(params.is_empty(), "{} emitted {:?}", strategy.name(), params);
    }
}

#[test]
fn test_unknown_keys_are_skipped_by_every_strategy() {
    let values = FilterValues::default().with_filter("colour", "Blue");
    for strategy in strategies() {
        assert!(strategy.compile(&values, &watch_config()).is_empty());
    }
}

#[test]
fn test_compilers_are_shareable_across_threads() {
    let config = std::sync::Arc::new(watch_config());
    let handles: Vec<_> = strategies()
        .into_iter()
        .map(|strategy| {
            let config = std::sync::Arc::clone(&config);
            std::thread::spawn(move || strategy.compile(&listing_values(), &config).len())
        })
        .collect();
    let lens: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(lens, vec![6, 8]);
}
