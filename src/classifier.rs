use super::*;

/// Owns the model handle and loads it at most once.
///
/// A failed load is remembered and reported on every later request.
pub(crate) struct Classifier {
  path: PathBuf,
  model: OnceLock<Result<Box<dyn Model>, String>>,
}

impl Classifier {
  pub(crate) fn new(path: PathBuf) -> Self {
    Self {
      path,
      model: OnceLock::new(),
    }
  }

  #[cfg(test)]
  pub(crate) fn with_model(model: impl Model + 'static) -> Self {
    Self {
      path: PathBuf::new(),
      model: OnceLock::from(Ok(Box::new(model) as Box<dyn Model>)),
    }
  }

  pub(crate) fn model(&self) -> Result<&dyn Model, Error> {
    self
      .model
      .get_or_init(|| {
        info!(path = %self.path.display(), "loading model");

        let model =
          model::load(&self.path).map_err(|error| format!("{error:#}"));

        match &model {
          Ok(model) => info!(labels = ?model.labels(), "model loaded"),
          Err(message) => warn!("{message}"),
        }

        model
      })
      .as_ref()
      .map(|model| &**model)
      .map_err(|message| Error::ModelLoad {
        path: self.path.clone(),
        message: message.clone(),
      })
  }

  pub(crate) fn input(&self) -> Result<InputSpec, Error> {
    Ok(self.model()?.input())
  }

  pub(crate) fn classify(&self, buffer: PixelBuffer) -> Result<String, Error> {
    let model = self.model()?;

    if buffer.spec() != model.input() {
      return Err(Error::inference(format!(
        "pixel buffer {:?} does not match model input {:?}",
        buffer.spec(),
        model.input()
      )));
    }

    let label = model
      .predict(&buffer)
      .map_err(|error| Error::inference(format!("{error:#}")))?;

    debug!(%label, "classified image");

    Ok(label)
  }
}
