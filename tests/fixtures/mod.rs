//! Shared fixtures: a watch-shop listing schema and a small catalogue

#![allow(dead_code)]

use serde::Serialize;
use sieve::prelude::*;
use tracing_subscriber::EnvFilter;

pub const WATCH_CONFIG_YAML: &str = r#"
searchFields:
  - key: name
  - key: variant.color.name
filterFields:
  - key: brand
    label: Brand
    type: string
    operator: like
  - key: price
    type: number
  - key: status
    type: select
    options:
      - value: active
        label: Active
      - value: archived
        label: Archived
  - key: material
    type: multiselect
    operator: in
  - key: in_stock
    type: boolean
  - key: diameter
    type: number
    operator: between
  - key: reference
    type: string
    operator: startsWith
  - key: movement
    type: select
    operator: in
    options:
      - value: automatic
        label: Automatic
      - value: quartz
        label: Quartz
      - value: manual
        label: Manual
sortOptions:
  - value: "created_at:desc"
    label: Newest
  - value: "price:asc"
    label: Cheapest
  - value: "brand:asc,price:desc"
    label: Brand
dateRangeFields:
  - key: created_at
    label: Listed
  - key: shipped_at
"#;

/// Route library logs to the test harness; `RUST_LOG=sieve=debug` shows skipped filters.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn watch_config() -> FilterConfig {
    FilterConfig::from_yaml_str(WATCH_CONFIG_YAML).expect("fixture schema parses")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Color {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variant {
    pub color: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Watch {
    pub id: u32,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub status: String,
    pub material: String,
    pub in_stock: bool,
    pub diameter: f64,
    pub reference: String,
    pub movement: String,
    pub created_at: String,
    pub shipped_at: Option<String>,
    pub variant: Option<Variant>,
}

impl Watch {
    pub fn new(id: u32, name: &str, brand: &str, price: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            price,
            status: "active".to_string(),
            material: "steel".to_string(),
            in_stock: true,
            diameter: 40.0,
            reference: format!("REF-{:03}", id),
            movement: "automatic".to_string(),
            created_at: "2024-06-01T00:00:00".to_string(),
            shipped_at: None,
            variant: None,
        }
    }

    pub fn color(mut self, color: &str) -> Self {
        self.variant = Some(Variant {
            color: Some(Color {
                name: color.to_string(),
            }),
        });
        self
    }

    pub fn material(mut self, material: &str) -> Self {
        self.material = material.to_string();
        self
    }

    pub fn created(mut self, at: &str) -> Self {
        self.created_at = at.to_string();
        self
    }

    pub fn shipped(mut self, at: &str) -> Self {
        self.shipped_at = Some(at.to_string());
        self
    }

    pub fn archived(mut self) -> Self {
        self.status = "archived".to_string();
        self.in_stock = false;
        self
    }

    pub fn movement(mut self, movement: &str) -> Self {
        self.movement = movement.to_string();
        self
    }

    pub fn diameter(mut self, diameter: f64) -> Self {
        self.diameter = diameter;
        self
    }
}

pub fn watches() -> Vec<Watch> {
    vec![
        Watch::new(1, "Presage Cocktail Time", "Seiko", 450.0)
            .color("Blue")
            .created("2024-06-15T23:00:00")
            .diameter(40.5),
        Watch::new(2, "Bambino", "Orient", 180.0)
            .color("Red")
            .movement("quartz")
            .created("2024-06-16T08:00:00")
            .diameter(38.0),
        Watch::new(3, "Red Sea Diver", "Seiko", 320.0)
            .material("titanium")
            .created("2024-05-01T12:00:00")
            .shipped("2024-05-03T09:00:00")
            .diameter(42.0),
        Watch::new(4, "Khaki Field", "Hamilton", 495.0)
            .color("Green")
            .movement("manual")
            .created("2024-06-01T00:00:00")
            .archived(),
        Watch::new(5, "Seamaster", "Omega", 5200.0)
            .color("Black")
            .material("gold")
            .created("2023-12-24T18:30:00")
            .shipped("2024-01-02T10:00:00")
            .diameter(42.0),
    ]
}

pub fn ids(items: &[Watch]) -> Vec<u32> {
    items.iter().map(|w| w.id).collect()
}
