pub mod artifact;
pub mod logistic;

pub use artifact::ModelArtifact;
pub use logistic::LogisticClassifier;

use crate::domain::ports::Storage;
use crate::utils::error::{AppError, Result};

/// Loads the classifier artifact once at startup.
///
/// A missing file is reported as [`AppError::ModelNotFound`] naming the
/// path. Any other read or parse failure is a [`AppError::ModelFormatError`],
/// so every load failure stays fatal.
pub async fn load_classifier<S: Storage + ?Sized>(
    storage: &S,
    path: &str,
) -> Result<LogisticClassifier> {
    tracing::info!("📦 Loading model artifact from: {}", path);

    let bytes = storage.read_file(path).await.map_err(|e| match e {
        AppError::IoError(io) if io.kind() == std::io::ErrorKind::NotFound => {
            AppError::ModelNotFound {
                path: path.to_string(),
            }
        }
        other => AppError::ModelFormatError {
            message: format!("cannot read {}: {}", path, other),
        },
    })?;

    let artifact = ModelArtifact::from_slice(&bytes)?;
    tracing::info!(
        "✅ Model '{}' loaded ({} encoded features, threshold {})",
        artifact.name,
        artifact.encoded_width(),
        artifact.threshold
    );

    Ok(LogisticClassifier::new(artifact))
}
