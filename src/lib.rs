pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod model;
pub mod server;
pub mod utils;

pub use adapters::LocalStorage;
pub use config::{AppConfig, CliConfig};
pub use core::{assembler::assemble, pipeline::PredictionPipeline, presenter::InferencePresenter};
pub use model::{load_classifier, LogisticClassifier};
pub use server::{construct_router, serve, AppState};
pub use utils::error::{AppError, Result};
