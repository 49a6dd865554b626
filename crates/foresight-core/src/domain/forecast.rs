use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Driver, Probability, TargetDate, Ticker, ValidationError};

/// Business metric a forecast target refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetMetric {
    Revenue,
    #[serde(alias = "marketCap")]
    MarketCap,
    Profitability,
}

impl TargetMetric {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "revenue" => Ok(Self::Revenue),
            "market_cap" | "marketcap" => Ok(Self::MarketCap),
            "profitability" => Ok(Self::Profitability),
            _ => Err(ValidationError::InvalidTargetMetric {
                value: input.to_owned(),
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Revenue => "revenue",
            Self::MarketCap => "market_cap",
            Self::Profitability => "profitability",
        }
    }
}

impl Display for TargetMetric {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order of magnitude a number is expressed in.
///
/// Targets are conventionally entered in millions while the driver product
/// is usually in raw units; both are declared on [`ForecastConfig`] so the
/// conversion is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Units,
    Thousands,
    Millions,
    Billions,
}

impl Scale {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "units" | "unit" | "1" => Ok(Self::Units),
            "thousands" | "k" => Ok(Self::Thousands),
            "millions" | "m" => Ok(Self::Millions),
            "billions" | "b" => Ok(Self::Billions),
            _ => Err(ValidationError::InvalidScale {
                value: input.to_owned(),
            }),
        }
    }

    pub const fn factor(self) -> f64 {
        match self {
            Self::Units => 1.0,
            Self::Thousands => 1e3,
            Self::Millions => 1e6,
            Self::Billions => 1e9,
        }
    }

    /// Re-express `value` given in `self` in the `target` scale.
    pub fn convert(self, value: f64, target: Scale) -> f64 {
        if self == target {
            return value;
        }
        value * self.factor() / target.factor()
    }
}

/// Historical reference probability carried as metadata only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRate {
    pub description: String,
    pub probability: Probability,
    pub source: String,
}

impl Default for BaseRate {
    fn default() -> Self {
        Self {
            description: String::from("No base rate provided"),
            probability: Probability::HALF,
            source: String::from("default"),
        }
    }
}

/// Named way the forecast could fail; informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremortemScenario {
    pub scenario: String,
    #[serde(alias = "failureMode")]
    pub failure_mode: String,
}

fn default_target_scale() -> Scale {
    Scale::Millions
}

fn default_driver_scale() -> Scale {
    Scale::Units
}

/// Complete description of one forecast question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    pub ticker: Ticker,
    #[serde(alias = "targetMetric")]
    pub target_metric: TargetMetric,
    #[serde(alias = "targetValue")]
    pub target_value: f64,
    #[serde(default = "default_target_scale", alias = "targetScale")]
    pub target_scale: Scale,
    #[serde(default = "default_driver_scale", alias = "driverScale")]
    pub driver_scale: Scale,
    #[serde(alias = "targetDate")]
    pub target_date: TargetDate,
    pub drivers: Vec<Driver>,
    #[serde(default, alias = "baserate")]
    pub base_rate: BaseRate,
    #[serde(default)]
    pub premortem: Vec<PremortemScenario>,
}

impl ForecastConfig {
    pub fn builder() -> ForecastConfigBuilder {
        ForecastConfigBuilder::default()
    }

    /// Re-check invariants that plain field access could have broken.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.target_value.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "target_value",
            });
        }
        if self.drivers.is_empty() {
            return Err(ValidationError::NoDrivers);
        }
        for driver in &self.drivers {
            driver.distribution().validate()?;
        }
        Ok(())
    }

    /// Target re-expressed in the unit of the driver product.
    pub fn target_in_driver_units(&self) -> f64 {
        self.target_scale
            .convert(self.target_value, self.driver_scale)
    }
}

/// Fluent builder mirroring how collaborators assemble a forecast from a form.
#[derive(Debug, Clone, Default)]
pub struct ForecastConfigBuilder {
    ticker: Option<Ticker>,
    target_metric: Option<TargetMetric>,
    target_value: Option<f64>,
    target_scale: Option<Scale>,
    driver_scale: Option<Scale>,
    target_date: Option<TargetDate>,
    drivers: Vec<Driver>,
    base_rate: Option<BaseRate>,
    premortem: Vec<PremortemScenario>,
}

impl ForecastConfigBuilder {
    pub fn ticker(mut self, ticker: Ticker) -> Self {
        self.ticker = Some(ticker);
        self
    }

    pub fn target(mut self, metric: TargetMetric, value: f64, scale: Scale) -> Self {
        self.target_metric = Some(metric);
        self.target_value = Some(value);
        self.target_scale = Some(scale);
        self
    }

    pub fn target_date(mut self, date: TargetDate) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn driver_scale(mut self, scale: Scale) -> Self {
        self.driver_scale = Some(scale);
        self
    }

    pub fn driver(mut self, driver: Driver) -> Self {
        self.drivers.push(driver);
        self
    }

    pub fn drivers(mut self, drivers: impl IntoIterator<Item = Driver>) -> Self {
        self.drivers.extend(drivers);
        self
    }

    pub fn base_rate(mut self, base_rate: BaseRate) -> Self {
        self.base_rate = Some(base_rate);
        self
    }

    pub fn premortem(mut self, scenario: impl Into<String>, failure_mode: impl Into<String>) -> Self {
        self.premortem.push(PremortemScenario {
            scenario: scenario.into(),
            failure_mode: failure_mode.into(),
        });
        self
    }

    pub fn build(self) -> Result<ForecastConfig, ValidationError> {
        let config = ForecastConfig {
            ticker: self
                .ticker
                .ok_or(ValidationError::MissingField { field: "ticker" })?,
            target_metric: self.target_metric.ok_or(ValidationError::MissingField {
                field: "target_metric",
            })?,
            target_value: self.target_value.ok_or(ValidationError::MissingField {
                field: "target_value",
            })?,
            target_scale: self.target_scale.unwrap_or_else(default_target_scale),
            driver_scale: self.driver_scale.unwrap_or_else(default_driver_scale),
            target_date: self.target_date.ok_or(ValidationError::MissingField {
                field: "target_date",
            })?,
            drivers: self.drivers,
            base_rate: self.base_rate.unwrap_or_default(),
            premortem: self.premortem,
        };
        config.validate()?;
        Ok(config)
    }
}
