use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Supported parametric distribution families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionKind {
    Triangular,
    Normal,
    Uniform,
    Beta,
}

impl DistributionKind {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input.trim().to_ascii_lowercase().as_str() {
            "triangular" => Ok(Self::Triangular),
            "normal" => Ok(Self::Normal),
            "uniform" => Ok(Self::Uniform),
            "beta" => Ok(Self::Beta),
            _ => Err(ValidationError::UnknownDistribution {
                value: input.to_owned(),
            }),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Triangular => "triangular",
            Self::Normal => "normal",
            Self::Uniform => "uniform",
            Self::Beta => "beta",
        }
    }
}

impl Display for DistributionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parametric distribution with the parameters its family requires.
///
/// Variant fields are public, so values built by hand are re-checked with
/// [`Distribution::validate`] before any sampling happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Distribution {
    Triangular { low: f64, mode: f64, high: f64 },
    Normal { mean: f64, std_dev: f64 },
    Uniform { low: f64, high: f64 },
    Beta { alpha: f64, beta: f64 },
}

impl Distribution {
    pub fn triangular(low: f64, mode: f64, high: f64) -> Result<Self, ValidationError> {
        let distribution = Self::Triangular { low, mode, high };
        distribution.validate()?;
        Ok(distribution)
    }

    pub fn normal(mean: f64, std_dev: f64) -> Result<Self, ValidationError> {
        let distribution = Self::Normal { mean, std_dev };
        distribution.validate()?;
        Ok(distribution)
    }

    pub fn uniform(low: f64, high: f64) -> Result<Self, ValidationError> {
        let distribution = Self::Uniform { low, high };
        distribution.validate()?;
        Ok(distribution)
    }

    pub fn beta(alpha: f64, beta: f64) -> Result<Self, ValidationError> {
        let distribution = Self::Beta { alpha, beta };
        distribution.validate()?;
        Ok(distribution)
    }

    pub const fn kind(&self) -> DistributionKind {
        match self {
            Self::Triangular { .. } => DistributionKind::Triangular,
            Self::Normal { .. } => DistributionKind::Normal,
            Self::Uniform { .. } => DistributionKind::Uniform,
            Self::Beta { .. } => DistributionKind::Beta,
        }
    }

    /// Check finiteness and the ordering constraints of the family.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match *self {
            Self::Triangular { low, mode, high } => {
                validate_finite("low", low)?;
                validate_finite("mode", mode)?;
                validate_finite("high", high)?;
                if !(low <= mode && mode <= high) {
                    return Err(ValidationError::InvalidTriangular { low, mode, high });
                }
            }
            Self::Normal { mean, std_dev } => {
                validate_finite("mean", mean)?;
                validate_finite("std_dev", std_dev)?;
                if std_dev < 0.0 {
                    return Err(ValidationError::NegativeStdDev { value: std_dev });
                }
            }
            Self::Uniform { low, high } => {
                validate_finite("low", low)?;
                validate_finite("high", high)?;
                if low > high {
                    return Err(ValidationError::InvalidUniform { low, high });
                }
            }
            Self::Beta { alpha, beta } => {
                validate_finite("alpha", alpha)?;
                validate_finite("beta", beta)?;
                if alpha <= 0.0 {
                    return Err(ValidationError::NonPositiveShape {
                        field: "alpha",
                        value: alpha,
                    });
                }
                if beta <= 0.0 {
                    return Err(ValidationError::NonPositiveShape {
                        field: "beta",
                        value: beta,
                    });
                }
            }
        }
        Ok(())
    }

    /// Build from a declared kind and an untyped parameter record.
    pub fn from_parameters(
        kind: DistributionKind,
        parameters: &DistributionParameters,
    ) -> Result<Self, ValidationError> {
        let require = |value: Option<f64>, parameter: &'static str| {
            value.ok_or(ValidationError::MissingParameter {
                distribution: kind.as_str(),
                parameter,
            })
        };

        match kind {
            DistributionKind::Triangular => Self::triangular(
                require(parameters.low, "low")?,
                require(parameters.mode, "mode")?,
                require(parameters.high, "high")?,
            ),
            DistributionKind::Normal => Self::normal(
                require(parameters.mean, "mean")?,
                require(parameters.std_dev, "std_dev")?,
            ),
            DistributionKind::Uniform => Self::uniform(
                require(parameters.low, "low")?,
                require(parameters.high, "high")?,
            ),
            DistributionKind::Beta => Self::beta(
                require(parameters.alpha, "alpha")?,
                require(parameters.beta, "beta")?,
            ),
        }
    }
}

/// Untyped parameter record as supplied by collaborators.
///
/// Which fields are required depends on the declared kind; extra fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, alias = "stdDev", skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
}

impl From<Distribution> for DistributionParameters {
    fn from(value: Distribution) -> Self {
        match value {
            Distribution::Triangular { low, mode, high } => Self {
                low: Some(low),
                mode: Some(mode),
                high: Some(high),
                ..Self::default()
            },
            Distribution::Normal { mean, std_dev } => Self {
                mean: Some(mean),
                std_dev: Some(std_dev),
                ..Self::default()
            },
            Distribution::Uniform { low, high } => Self {
                low: Some(low),
                high: Some(high),
                ..Self::default()
            },
            Distribution::Beta { alpha, beta } => Self {
                alpha: Some(alpha),
                beta: Some(beta),
                ..Self::default()
            },
        }
    }
}

/// One independent uncertain factor of a Fermi decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DriverDraft", into = "DriverDraft")]
pub struct Driver {
    name: String,
    description: String,
    unit: String,
    distribution: Distribution,
}

impl Driver {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        unit: impl Into<String>,
        distribution: Distribution,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyDriverName);
        }
        distribution.validate()?;

        Ok(Self {
            name,
            description: description.into(),
            unit: unit.into(),
            distribution,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    pub fn kind(&self) -> DistributionKind {
        self.distribution.kind()
    }
}

/// Wire shape of a driver before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit: String,
    #[serde(alias = "distributionType", alias = "distributionKind")]
    pub distribution_kind: String,
    #[serde(default)]
    pub parameters: DistributionParameters,
}

impl TryFrom<DriverDraft> for Driver {
    type Error = ValidationError;

    fn try_from(value: DriverDraft) -> Result<Self, Self::Error> {
        let kind = DistributionKind::parse(&value.distribution_kind)?;
        let distribution = Distribution::from_parameters(kind, &value.parameters)?;
        Self::new(value.name, value.description, value.unit, distribution)
    }
}

impl From<Driver> for DriverDraft {
    fn from(value: Driver) -> Self {
        Self {
            name: value.name,
            description: value.description,
            unit: value.unit,
            distribution_kind: value.distribution.kind().as_str().to_owned(),
            parameters: value.distribution.into(),
        }
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_misordered_triangular() {
        let err = Distribution::triangular(10.0, 5.0, 20.0).expect_err("mode below low");
        assert!(matches!(err, ValidationError::InvalidTriangular { .. }));
    }

    #[test]
    fn accepts_point_mass_triangular() {
        let point = Distribution::triangular(7.0, 7.0, 7.0).expect("degenerate is valid");
        assert_eq!(
            point,
            Distribution::Triangular {
                low: 7.0,
                mode: 7.0,
                high: 7.0
            }
        );
    }

    #[test]
    fn rejects_invalid_normal_uniform_and_beta() {
        assert!(matches!(
            Distribution::normal(0.0, -1.0),
            Err(ValidationError::NegativeStdDev { .. })
        ));
        assert!(matches!(
            Distribution::uniform(3.0, 1.0),
            Err(ValidationError::InvalidUniform { .. })
        ));
        assert!(matches!(
            Distribution::beta(0.0, 2.0),
            Err(ValidationError::NonPositiveShape { field: "alpha", .. })
        ));
        assert!(matches!(
            Distribution::normal(f64::NAN, 1.0),
            Err(ValidationError::NonFiniteValue { field: "mean" })
        ));
    }

    #[test]
    fn unknown_kind_is_a_configuration_error() {
        let draft = DriverDraft {
            name: String::from("Churn"),
            description: String::new(),
            unit: String::from("%"),
            distribution_kind: String::from("lognormal"),
            parameters: DistributionParameters::default(),
        };
        let err = Driver::try_from(draft).expect_err("must reject");
        assert!(matches!(err, ValidationError::UnknownDistribution { value } if value == "lognormal"));
    }

    #[test]
    fn missing_parameter_is_named() {
        let draft = DriverDraft {
            name: String::from("ARPU"),
            description: String::new(),
            unit: String::from("USD/month"),
            distribution_kind: String::from("normal"),
            parameters: DistributionParameters {
                mean: Some(15.0),
                ..DistributionParameters::default()
            },
        };
        let err = Driver::try_from(draft).expect_err("must reject");
        assert_eq!(
            err,
            ValidationError::MissingParameter {
                distribution: "normal",
                parameter: "std_dev",
            }
        );
    }

    #[test]
    fn deserializes_legacy_camel_case_driver() {
        let json = r#"{
            "name": "ARPU",
            "description": "Average revenue per user per month",
            "distributionType": "normal",
            "parameters": { "mean": 15, "stdDev": 3 },
            "unit": "USD/month"
        }"#;
        let driver: Driver = serde_json::from_str(json).expect("legacy shape parses");
        assert_eq!(driver.kind(), DistributionKind::Normal);
        assert_eq!(
            *driver.distribution(),
            Distribution::Normal {
                mean: 15.0,
                std_dev: 3.0
            }
        );
    }

    #[test]
    fn serializes_to_snake_case_draft() {
        let driver = Driver::new(
            "Service Months",
            "",
            "months",
            Distribution::uniform(6.0, 12.0).expect("valid"),
        )
        .expect("valid driver");
        let value = serde_json::to_value(&driver).expect("serializes");
        assert_eq!(value["distribution_kind"], "uniform");
        assert_eq!(value["parameters"]["low"], 6.0);
        assert!(value["parameters"].get("mode").is_none());
    }
}
