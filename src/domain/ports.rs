use crate::domain::model::PassengerRecord;
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>>;
}

pub trait ConfigProvider: Send + Sync {
    fn model_path(&self) -> &str;
    fn bind_address(&self) -> &str;
    fn verbose(&self) -> bool;
    fn json_logs(&self) -> bool;
}

/// Capability boundary of a trained binary classifier.
///
/// Implementations are loaded once and only ever read afterwards, so the
/// same handle is shared by every request.
pub trait Classifier: Send + Sync {
    /// Predicted class label, `0` or `1`.
    fn predict(&self, record: &PassengerRecord) -> Result<u8>;

    /// Probability distribution over `[class 0, class 1]`.
    fn predict_proba(&self, record: &PassengerRecord) -> Result<[f64; 2]>;

    fn name(&self) -> &str {
        "classifier"
    }
}
