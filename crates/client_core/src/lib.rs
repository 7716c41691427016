//! Client core for crop yield predictions: the editable input model, the
//! single-flight request controller, and the HTTP transport it talks through.

pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod transport;

pub use controller::{interpret_response, RequestController, RequestState};
pub use error::{PredictionError, TransportError, ValidationError};
pub use input::{coerce_number, validate, Field, InputModel, PredictionInput, ValidatedRecord};
pub use transport::{HttpPredictionTransport, PredictionTransport, TransportResponse};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
