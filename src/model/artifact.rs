use crate::domain::model::PassengerRecord;
use crate::utils::error::{AppError, Result};
use serde::{Deserialize, Serialize};

pub const SUPPORTED_FORMAT_VERSION: u32 = 1;

fn default_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategory {
    #[default]
    Ignore,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    pub feature: String,
    pub mean: f64,
    pub scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    pub feature: String,
    pub categories: Vec<String>,
}

/// Serialized form of a fitted scaler + one-hot encoder + logistic regression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub name: String,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub numeric: Vec<NumericColumn>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumn>,
    #[serde(default)]
    pub handle_unknown: UnknownCategory,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

fn format_error(message: impl Into<String>) -> AppError {
    AppError::ModelFormatError {
        message: message.into(),
    }
}

impl ModelArtifact {
    /// 從 JSON 位元組解析並檢查模型檔
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let artifact: ModelArtifact =
            serde_json::from_slice(bytes).map_err(|e| format_error(e.to_string()))?;
        artifact.check()?;
        Ok(artifact)
    }

    /// Number of encoded features the coefficients must cover.
    pub fn encoded_width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|c| c.categories.len())
                .sum::<usize>()
    }

    fn check(&self) -> Result<()> {
        if self.format_version != SUPPORTED_FORMAT_VERSION {
            return Err(format_error(format!(
                "unsupported format_version {} (expected {})",
                self.format_version, SUPPORTED_FORMAT_VERSION
            )));
        }

        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(format_error(format!(
                "threshold {} must lie strictly between 0 and 1",
                self.threshold
            )));
        }

        let features = self
            .numeric
            .iter()
            .map(|c| c.feature.as_str())
            .chain(self.categorical.iter().map(|c| c.feature.as_str()));
        for feature in features {
            if !PassengerRecord::FIELDS.contains(&feature) {
                return Err(format_error(format!(
                    "feature '{}' is not part of the passenger schema",
                    feature
                )));
            }
        }

        for column in &self.numeric {
            if !column.mean.is_finite() || !column.scale.is_finite() || column.scale == 0.0 {
                return Err(format_error(format!(
                    "numeric column '{}' has an unusable mean/scale",
                    column.feature
                )));
            }
        }

        if let Some(empty) = self.categorical.iter().find(|c| c.categories.is_empty()) {
            return Err(format_error(format!(
                "categorical column '{}' has no categories",
                empty.feature
            )));
        }

        if self.coefficients.len() != self.encoded_width() {
            return Err(format_error(format!(
                "expected {} coefficients, found {}",
                self.encoded_width(),
                self.coefficients.len()
            )));
        }

        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(format_error("coefficients must be finite"));
        }

        Ok(())
    }
}
