use super::*;

/// Failures of a single analysis request.
///
/// Every variant is terminal for the request it belongs to and is turned
/// into a [`DisplayMessage`] rather than propagated to the user as a crash.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub(crate) enum Error {
  #[error("failed to process image: {reason}")]
  Preprocessing { reason: String },
  #[error("failed to load model from {}: {message}", path.display())]
  ModelLoad { path: PathBuf, message: String },
  #[error("model inference failed: {message}")]
  Inference { message: String },
}

impl Error {
  pub(crate) fn preprocessing(reason: impl Into<String>) -> Self {
    Self::Preprocessing {
      reason: reason.into(),
    }
  }

  pub(crate) fn inference(message: impl Into<String>) -> Self {
    Self::Inference {
      message: message.into(),
    }
  }

  /// The text shown in place of a disposal instruction.
  pub(crate) fn user_message(&self) -> String {
    match self {
      Self::Preprocessing { .. } => PROCESSING_FAILURE.into(),
      Self::ModelLoad { .. } | Self::Inference { .. } => {
        format!("Error: {self}")
      }
    }
  }
}
