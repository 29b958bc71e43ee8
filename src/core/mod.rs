pub mod assembler;
pub mod pipeline;
pub mod presenter;

pub use crate::domain::model::{PassengerForm, PassengerRecord, PredictionResult, Presentation};
pub use crate::domain::ports::{Classifier, ConfigProvider, Storage};
pub use crate::utils::error::Result;
