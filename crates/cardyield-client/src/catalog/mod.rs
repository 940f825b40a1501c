mod types;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ClientError, ClientResult};

pub use types::{BonusRate, FeeWaiverRule, Instrument, RateTier, SpecialBonus, TieredRate};

const BUNDLED_DEMO_CATALOG: &str = include_str!("../../data/demo_catalog.json");

/// Read-only list of instruments, in publication order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub cards: Vec<Instrument>,
}

impl Catalog {
    pub fn new(cards: Vec<Instrument>) -> Self {
        Self { cards }
    }

    pub fn from_json(body: &str, source: &str) -> ClientResult<Self> {
        serde_json::from_str::<Catalog>(body)
            .map_err(|error| ClientError::catalog_invalid(source, &error.to_string()))
    }

    pub fn load(path: &Path) -> ClientResult<Self> {
        let body = fs::read_to_string(path)
            .map_err(|error| ClientError::catalog_unreadable(path, &error.to_string()))?;
        let source = format!("`{}`", path.display());
        Self::from_json(&body, &source)
    }

    pub fn bundled_demo() -> ClientResult<Self> {
        Self::from_json(BUNDLED_DEMO_CATALOG, "the bundled demo catalog")
    }

    pub fn all(&self) -> &[Instrument] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn by_id(&self, id: &str) -> Option<&Instrument> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn by_name(&self, name: &str) -> Option<&Instrument> {
        self.cards.iter().find(|card| card.name == name)
    }

    pub fn by_issuer<'a>(&'a self, issuer: &'a str) -> impl Iterator<Item = &'a Instrument> {
        self.cards.iter().filter(move |card| card.issuer == issuer)
    }

    pub fn with_max_fee(&self, max_fee: f64) -> impl Iterator<Item = &Instrument> {
        self.cards
            .iter()
            .filter(move |card| card.annual_fee <= max_fee)
    }

    pub fn free_cards(&self) -> impl Iterator<Item = &Instrument> {
        self.with_max_fee(0.0)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.cards.iter().map(|card| card.id.as_str()).collect()
    }
}
