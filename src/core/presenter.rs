use crate::domain::model::{
    BarColor, PassengerRecord, PredictionResult, Presentation, ProbabilityBar, SurvivalLabel,
    Verdict,
};
use crate::domain::ports::Classifier;
use crate::utils::error::{AppError, Result};
use std::sync::Arc;

/// Bar height (on the 0-100 axis) above which the bar takes the positive colour.
pub const COLOR_THRESHOLD: f64 = 50.0;

pub fn probability_bar(probability: f64) -> ProbabilityBar {
    let height = probability * 100.0;
    let color = if height > COLOR_THRESHOLD {
        BarColor::Positive
    } else {
        BarColor::Negative
    };
    ProbabilityBar { height, color }
}

pub fn format_percent(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// 文字訊息依預測標籤決定，與長條圖顏色的 50% 門檻各自獨立
pub fn verdict(result: &PredictionResult) -> Verdict {
    let percent = format_percent(result.probability);
    match result.label {
        SurvivalLabel::Survived => Verdict {
            survived: true,
            message: format!("✅ The passenger survived (probability: {})", percent),
        },
        SurvivalLabel::DidNotSurvive => Verdict {
            survived: false,
            message: format!(
                "❌ The passenger did not survive (survival probability: {})",
                percent
            ),
        },
    }
}

pub struct InferencePresenter<C: Classifier + ?Sized> {
    classifier: Arc<C>,
}

impl<C: Classifier + ?Sized> Clone for InferencePresenter<C> {
    fn clone(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
        }
    }
}

impl<C: Classifier + ?Sized> InferencePresenter<C> {
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn predict(&self, record: &PassengerRecord) -> Result<PredictionResult> {
        let raw_label = self.classifier.predict(record)?;
        let proba = self.classifier.predict_proba(record)?;

        let label = SurvivalLabel::from_class(raw_label).ok_or_else(|| AppError::Inference {
            message: format!("classifier returned label {} outside {{0, 1}}", raw_label),
        })?;

        let probability = proba[1];
        if !probability.is_finite() || !(0.0..=1.0).contains(&probability) {
            return Err(AppError::Inference {
                message: format!(
                    "classifier returned probability {} outside [0, 1]",
                    probability
                ),
            });
        }

        Ok(PredictionResult { label, probability })
    }

    /// Runs one prediction and maps it to what the page shows.
    ///
    /// Inference faults never escape: they become an inline error so the
    /// page stays usable for the next submission.
    pub fn present(&self, record: &PassengerRecord) -> Presentation {
        match self.predict(record) {
            Ok(result) => {
                tracing::info!(
                    "🔮 Prediction: label={}, probability={:.4}",
                    result.label.as_class(),
                    result.probability
                );
                Presentation::Prediction {
                    bar: probability_bar(result.probability),
                    verdict: verdict(&result),
                    result,
                }
            }
            Err(e) => {
                tracing::warn!("❌ Prediction failed: {} (Category: {:?})", e, e.category());
                let reason = match e {
                    AppError::Inference { message } => message,
                    other => other.to_string(),
                };
                Presentation::Error {
                    message: format!("❌ Prediction failed: {}", reason),
                }
            }
        }
    }
}
