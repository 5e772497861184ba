use super::*;

/// Turns one image into one message.
pub(crate) struct Pipeline {
  classifier: Arc<Classifier>,
}

impl Pipeline {
  pub(crate) fn new(classifier: Arc<Classifier>) -> Self {
    Self { classifier }
  }

  /// Runs preprocessing, inference and resolution for one image.
  ///
  /// A panic anywhere in those steps is contained and reported as an
  /// inference error.
  pub(crate) fn analyze(
    &self,
    image: RawImage,
  ) -> Result<DisplayMessage, Error> {
    panic::catch_unwind(AssertUnwindSafe(|| self.steps(image)))
      .unwrap_or_else(|payload| {
        Err(Error::inference(format!(
          "analysis panicked: {}",
          panic_message(payload.as_ref())
        )))
      })
  }

  fn steps(&self, image: RawImage) -> Result<DisplayMessage, Error> {
    let spec = self.classifier.input()?;
    let buffer = Preprocessor::new(spec).process(image)?;
    let label = self.classifier.classify(buffer)?;
    Ok(resolve(&label))
  }

  /// Like [`Pipeline::analyze`], with failures rendered as messages.
  pub(crate) fn run(&self, image: RawImage) -> DisplayMessage {
    match self.analyze(image) {
      Ok(message) => {
        info!(category = ?message.category, "analysis complete");
        message
      }
      Err(error) => {
        warn!("analysis failed: {error}");
        DisplayMessage::error(&error)
      }
    }
  }

  /// Runs the analysis on the background pool, delivering exactly one
  /// message.
  pub(crate) fn submit(
    self: &Arc<Self>,
    image: RawImage,
  ) -> Receiver<DisplayMessage> {
    let (sender, receiver) = mpsc::channel();

    let pipeline = Arc::clone(self);

    rayon::spawn(move || {
      if sender.send(pipeline.run(image)).is_err() {
        debug!("analysis result dropped");
      }
    });

    receiver
  }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
  payload
    .downcast_ref::<&str>()
    .map(|message| (*message).to_owned())
    .or_else(|| payload.downcast_ref::<String>().cloned())
    .unwrap_or_else(|| "unknown panic".into())
}
