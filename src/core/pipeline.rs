use crate::core::assembler::assemble;
use crate::core::presenter::InferencePresenter;
use crate::domain::model::{PassengerForm, PassengerRecord, Presentation};
use crate::domain::ports::Classifier;
use serde::Serialize;

/// One row of the raw-input table shown under the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputRow {
    pub field: &'static str,
    pub value: String,
}

/// 一次送出的完整結果：原始表單、組裝後的紀錄與呈現內容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub form: PassengerForm,
    pub record: Option<PassengerRecord>,
    pub presentation: Presentation,
}

impl Submission {
    pub fn input_table(&self) -> Vec<InputRow> {
        self.record
            .as_ref()
            .map(|record| {
                record
                    .columns()
                    .into_iter()
                    .map(|(field, value)| InputRow {
                        field,
                        value: value.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_error(&self) -> bool {
        matches!(self.presentation, Presentation::Error { .. })
    }
}

/// Input → inference → presentation, one submission at a time.
pub struct PredictionPipeline<C: Classifier + ?Sized> {
    presenter: InferencePresenter<C>,
}

impl<C: Classifier + ?Sized> PredictionPipeline<C> {
    pub fn new(presenter: InferencePresenter<C>) -> Self {
        Self { presenter }
    }

    pub fn presenter(&self) -> &InferencePresenter<C> {
        &self.presenter
    }

    pub fn submit(&self, form: PassengerForm) -> Submission {
        match assemble(&form) {
            Ok(record) => {
                let presentation = self.presenter.present(&record);
                Submission {
                    form,
                    record: Some(record),
                    presentation,
                }
            }
            Err(e) => {
                tracing::warn!("⚠️ Rejected passenger input: {}", e);
                Submission {
                    form,
                    record: None,
                    presentation: Presentation::Error {
                        message: format!("❌ {}", e.user_friendly_message()),
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SurvivalLabel;
    use crate::utils::error::{AppError, Result};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    /// 第一次呼叫失敗，之後正常回傳
    struct FlakyClassifier {
        failed_once: AtomicBool,
    }

    impl Classifier for FlakyClassifier {
        fn predict(&self, _record: &PassengerRecord) -> Result<u8> {
            if !self.failed_once.swap(true, Ordering::SeqCst) {
                return Err(AppError::Inference {
                    message: "malformed record".to_string(),
                });
            }
            Ok(1)
        }

        fn predict_proba(&self, _record: &PassengerRecord) -> Result<[f64; 2]> {
            Ok([0.2, 0.8])
        }
    }

    fn pipeline() -> PredictionPipeline<FlakyClassifier> {
        PredictionPipeline::new(InferencePresenter::new(Arc::new(FlakyClassifier {
            failed_once: AtomicBool::new(false),
        })))
    }

    #[test]
    fn test_fault_then_successful_submission() {
        let pipeline = pipeline();

        let first = pipeline.submit(PassengerForm::defaults());
        assert!(first.is_error());
        // 紀錄已組裝完成，表格仍可顯示
        assert_eq!(first.input_table().len(), 10);

        let second = pipeline.submit(PassengerForm::defaults());
        match second.presentation {
            Presentation::Prediction { result, .. } => {
                assert_eq!(result.label, SurvivalLabel::Survived);
                assert_eq!(result.probability, 0.8);
            }
            other => panic!("expected prediction, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_input_skips_inference() {
        let pipeline = pipeline();
        let mut form = PassengerForm::defaults();
        form.age = Some("250".to_string());

        let submission = pipeline.submit(form.clone());
        assert!(submission.is_error());
        assert!(submission.record.is_none());
        assert!(submission.input_table().is_empty());
        assert_eq!(submission.form, form);

        // 分類器未被呼叫，因此第一次推論仍會失敗
        assert!(pipeline.submit(PassengerForm::defaults()).is_error());
    }

    #[test]
    fn test_input_table_rows() {
        let mut form = PassengerForm::defaults();
        form.fare = Some("7.25".to_string());
        let submission = pipeline().submit(form);

        let table = submission.input_table();
        let fields: Vec<&str> = table.iter().map(|row| row.field).collect();
        assert_eq!(fields, PassengerRecord::FIELDS.to_vec());
        assert_eq!(table[0].value, "1");
        assert_eq!(table[5].value, "7.25");
        assert_eq!(table[8].value, "true");
    }
}
