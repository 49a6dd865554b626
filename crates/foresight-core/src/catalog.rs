//! Sector catalog and per-sector driver templates.
//!
//! Both registries are plain values; callers own them and pass them where
//! needed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Driver;

/// Driver templates keyed by sector name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverRegistry {
    drivers: BTreeMap<String, Vec<Driver>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any templates previously registered for `sector`.
    pub fn register_drivers(&mut self, sector: impl Into<String>, drivers: Vec<Driver>) {
        self.drivers.insert(sector.into(), drivers);
    }

    /// Templates for `sector`; empty when the sector is unknown.
    pub fn drivers(&self, sector: &str) -> &[Driver] {
        self.drivers.get(sector).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn sectors(&self) -> impl Iterator<Item = &str> {
        self.drivers.keys().map(String::as_str)
    }
}

/// Describes an industry vertical and its usual forecast shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorConfig {
    pub name: String,
    pub description: String,
    pub default_drivers: Vec<String>,
    pub typical_metrics: Vec<String>,
}

impl SectorConfig {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        default_drivers: &[&str],
        typical_metrics: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            default_drivers: default_drivers.iter().map(|d| (*d).to_owned()).collect(),
            typical_metrics: typical_metrics.iter().map(|m| (*m).to_owned()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorRegistry {
    sectors: BTreeMap<String, SectorConfig>,
}

impl SectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the built-in `space`, `saas`, and `fintech` sectors.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(SectorConfig::new(
            "space",
            "Space & Aerospace companies",
            &["subscriber_count", "arpu", "service_availability"],
            &["revenue", "market_cap"],
        ));
        registry.register(SectorConfig::new(
            "saas",
            "Software as a Service companies",
            &["arr", "retention", "expansion"],
            &["revenue", "arr", "profitability"],
        ));
        registry.register(SectorConfig::new(
            "fintech",
            "Financial Technology companies",
            &["transaction_volume", "take_rate", "user_growth"],
            &["revenue", "profitability"],
        ));
        registry
    }

    pub fn register(&mut self, sector: SectorConfig) {
        self.sectors.insert(sector.name.clone(), sector);
    }

    pub fn get(&self, name: &str) -> Option<&SectorConfig> {
        self.sectors.get(name)
    }

    /// All sectors ordered by name.
    pub fn all(&self) -> impl Iterator<Item = &SectorConfig> {
        self.sectors.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Distribution;

    #[test]
    fn unknown_sector_has_no_templates() {
        let registry = DriverRegistry::new();
        assert!(registry.drivers("space").is_empty());
        assert_eq!(registry.sectors().count(), 0);
    }

    #[test]
    fn registering_twice_replaces_templates() {
        let arpu = Driver::new(
            "ARPU",
            "Average revenue per user",
            "USD/month",
            Distribution::normal(15.0, 3.0).expect("valid"),
        )
        .expect("valid");
        let months = Driver::new(
            "Service Months",
            "",
            "months",
            Distribution::uniform(6.0, 12.0).expect("valid"),
        )
        .expect("valid");

        let mut registry = DriverRegistry::new();
        registry.register_drivers("space", vec![arpu.clone(), months]);
        registry.register_drivers("space", vec![arpu]);

        assert_eq!(registry.drivers("space").len(), 1);
        assert_eq!(registry.drivers("space")[0].name(), "ARPU");
        assert_eq!(registry.sectors().collect::<Vec<_>>(), vec!["space"]);
    }

    #[test]
    fn defaults_cover_three_sectors_in_name_order() {
        let registry = SectorRegistry::with_defaults();
        let names = registry.all().map(|s| s.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["fintech", "saas", "space"]);

        let space = registry.get("space").expect("seeded");
        assert_eq!(space.default_drivers[1], "arpu");
        assert!(registry.get("biotech").is_none());
    }
}
