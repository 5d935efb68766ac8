//! The lookup port and an in-memory implementation.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LookupError;
use crate::stage::LookupStage;

/// Source of make/model/year options and seat row counts.
#[async_trait]
pub trait LookupApi: Send + Sync {
    /// All makes.
    async fn makes(&self) -> Result<Vec<String>, LookupError>;

    /// Models for a make.
    async fn models(&self, make: &str) -> Result<Vec<String>, LookupError>;

    /// Years for a make and model.
    async fn years(&self, make: &str, model: &str) -> Result<Vec<String>, LookupError>;

    /// Seat rows for a vehicle. May be 0 when the API does not know.
    async fn seat_rows(&self, make: &str, model: &str, year: &str) -> Result<u32, LookupError>;
}

#[async_trait]
impl<T: LookupApi + ?Sized> LookupApi for Arc<T> {
    async fn makes(&self) -> Result<Vec<String>, LookupError> {
        (**self).makes().await
    }

    async fn models(&self, make: &str) -> Result<Vec<String>, LookupError> {
        (**self).models(make).await
    }

    async fn years(&self, make: &str, model: &str) -> Result<Vec<String>, LookupError> {
        (**self).years(make, model).await
    }

    async fn seat_rows(&self, make: &str, model: &str, year: &str) -> Result<u32, LookupError> {
        (**self).seat_rows(make, model, year).await
    }
}

/// Fixed catalogue, for tests and offline use.
///
/// Stages can be marked as failing to exercise degraded paths.
#[derive(Debug, Clone, Default)]
pub struct StaticLookup {
    catalog: BTreeMap<String, BTreeMap<String, BTreeMap<String, u32>>>,
    failing: HashSet<LookupStage>,
}

impl StaticLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vehicle with its seat row count.
    pub fn vehicle(mut self, make: &str, model: &str, year: &str, seat_rows: u32) -> Self {
        self.catalog
            .entry(make.to_string())
            .or_default()
            .entry(model.to_string())
            .or_default()
            .insert(year.to_string(), seat_rows);
        self
    }

    /// Make every request for a stage fail with a connection error.
    pub fn failing(mut self, stage: LookupStage) -> Self {
        self.failing.insert(stage);
        self
    }

    fn check(&self, stage: LookupStage) -> Result<(), LookupError> {
        if self.failing.contains(&stage) {
            return Err(LookupError::Connection(format!("{} lookup unavailable", stage)));
        }
        Ok(())
    }
}

#[async_trait]
impl LookupApi for StaticLookup {
    async fn makes(&self) -> Result<Vec<String>, LookupError> {
        self.check(LookupStage::Makes)?;
        Ok(self.catalog.keys().cloned().collect())
    }

    async fn models(&self, make: &str) -> Result<Vec<String>, LookupError> {
        self.check(LookupStage::Models)?;
        Ok(self
            .catalog
            .get(make)
            .map(|models| models.keys().cloned().collect())
            .unwrap_or_default())
    }

    async fn years(&self, make: &str, model: &str) -> Result<Vec<String>, LookupError> {
        self.check(LookupStage::Years)?;
        Ok(self
            .catalog
            .get(make)
            .and_then(|models| models.get(model))
            .map(|years| years.keys().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn seat_rows(&self, make: &str, model: &str, year: &str) -> Result<u32, LookupError> {
        self.check(LookupStage::SeatRows)?;
        self.catalog
            .get(make)
            .and_then(|models| models.get(model))
            .and_then(|years| years.get(year))
            .copied()
            .ok_or(LookupError::Unsuccessful(LookupStage::SeatRows))
    }
}
