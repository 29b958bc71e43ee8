use crate::domain::model::PassengerRecord;
use crate::domain::ports::Classifier;
use crate::model::artifact::{ModelArtifact, UnknownCategory};
use crate::utils::error::{AppError, Result};

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn inference_error(message: String) -> AppError {
    AppError::Inference { message }
}

/// Logistic regression over standardised numeric and one-hot categorical columns.
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    artifact: ModelArtifact,
}

impl LogisticClassifier {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    /// 依模型檔的欄位順序編碼成特徵向量
    pub fn encode(&self, record: &PassengerRecord) -> Result<Vec<f64>> {
        let mut features = Vec::with_capacity(self.artifact.encoded_width());

        for column in &self.artifact.numeric {
            let value = record
                .feature(&column.feature)
                .ok_or_else(|| inference_error(format!("unknown feature '{}'", column.feature)))?;
            let x = value.as_f64().ok_or_else(|| {
                inference_error(format!(
                    "feature '{}' is not numeric (got '{}')",
                    column.feature, value
                ))
            })?;
            if !x.is_finite() {
                return Err(inference_error(format!(
                    "feature '{}' is not a finite number",
                    column.feature
                )));
            }
            features.push((x - column.mean) / column.scale);
        }

        for column in &self.artifact.categorical {
            let value = record
                .feature(&column.feature)
                .ok_or_else(|| inference_error(format!("unknown feature '{}'", column.feature)))?
                .as_category();
            let hit = column.categories.iter().position(|c| *c == value);
            if hit.is_none() && self.artifact.handle_unknown == UnknownCategory::Error {
                return Err(inference_error(format!(
                    "unknown category '{}' for feature '{}'",
                    value, column.feature
                )));
            }
            features.extend((0..column.categories.len()).map(|i| {
                if Some(i) == hit {
                    1.0
                } else {
                    0.0
                }
            }));
        }

        Ok(features)
    }

    fn positive_probability(&self, record: &PassengerRecord) -> Result<f64> {
        let features = self.encode(record)?;
        let z = features
            .iter()
            .zip(&self.artifact.coefficients)
            .map(|(x, w)| x * w)
            .sum::<f64>()
            + self.artifact.intercept;

        let p = sigmoid(z);
        if !p.is_finite() {
            return Err(inference_error(format!("decision value {} is not finite", z)));
        }
        Ok(p)
    }
}

impl Classifier for LogisticClassifier {
    fn predict(&self, record: &PassengerRecord) -> Result<u8> {
        let p = self.positive_probability(record)?;
        Ok(u8::from(p > self.artifact.threshold))
    }

    fn predict_proba(&self, record: &PassengerRecord) -> Result<[f64; 2]> {
        let p = self.positive_probability(record)?;
        Ok([1.0 - p, p])
    }

    fn name(&self) -> &str {
        &self.artifact.name
    }
}
