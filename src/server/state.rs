use crate::core::pipeline::PredictionPipeline;
use crate::core::presenter::InferencePresenter;
use crate::domain::ports::Classifier;
use crate::server::page::PageRenderer;
use crate::utils::error::Result;
use std::sync::Arc;

/// Process-wide context shared by every request.
///
/// The classifier inside the pipeline is loaded once at startup and never
/// mutated, so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PredictionPipeline<dyn Classifier>>,
    pub page: Arc<PageRenderer>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn Classifier>) -> Result<Self> {
        let presenter = InferencePresenter::new(classifier);
        Ok(Self {
            pipeline: Arc::new(PredictionPipeline::new(presenter)),
            page: Arc::new(PageRenderer::new()?),
        })
    }

    pub fn model_name(&self) -> &str {
        self.pipeline.presenter().classifier().name()
    }
}
