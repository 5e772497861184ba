use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
  Prompt,
  Capturing,
  Result(DisplayMessage),
}

/// Screen state machine.
///
/// Events that do not apply to the current screen are ignored.
pub(crate) struct Controller {
  screen: Screen,
  pipeline: Arc<Pipeline>,
  pending: Option<Receiver<DisplayMessage>>,
}

impl Controller {
  pub(crate) fn new(pipeline: Arc<Pipeline>) -> Self {
    Self {
      screen: Screen::Prompt,
      pipeline,
      pending: None,
    }
  }

  pub(crate) fn screen(&self) -> &Screen {
    &self.screen
  }

  pub(crate) fn is_analyzing(&self) -> bool {
    self.pending.is_some()
  }

  /// Whether an image source may be invoked right now.
  pub(crate) fn can_acquire(&self) -> bool {
    self.screen == Screen::Capturing && !self.is_analyzing()
  }

  pub(crate) fn start(&mut self) {
    if self.screen == Screen::Prompt {
      debug!("prompt -> capturing");
      self.screen = Screen::Capturing;
    }
  }

  pub(crate) fn acquire(&mut self, source: &mut dyn ImageSource) {
    if self.can_acquire() {
      let acquisition = source.acquire();
      self.acquired(acquisition);
    }
  }

  pub(crate) fn acquired(&mut self, acquisition: Acquisition) {
    if !self.can_acquire() {
      return;
    }

    match acquisition {
      Acquisition::Cancelled => debug!("acquisition cancelled"),
      Acquisition::Image(image) => {
        debug!("submitting image for analysis");
        self.pending = Some(self.pipeline.submit(image));
      }
    }
  }

  /// Checks for a finished analysis without blocking. Returns whether the
  /// screen changed.
  pub(crate) fn poll(&mut self) -> bool {
    let Some(receiver) = &self.pending else {
      return false;
    };

    let message = match receiver.try_recv() {
      Ok(message) => message,
      Err(TryRecvError::Empty) => return false,
      Err(TryRecvError::Disconnected) => DisplayMessage::error(
        &Error::inference("analysis stopped without a result"),
      ),
    };

    self.finish(message);

    true
  }

  pub(crate) fn back(&mut self) {
    if matches!(self.screen, Screen::Result(_)) {
      debug!("result -> capturing");
      self.screen = Screen::Capturing;
    }
  }

  fn finish(&mut self, message: DisplayMessage) {
    self.pending = None;
    debug!("capturing -> result");
    self.screen = Screen::Result(message);
  }

  /// Blocks until the analysis in flight, if any, completes.
  #[cfg(test)]
  fn settle(&mut self) {
    if let Some(receiver) = self.pending.take() {
      let message = receiver.recv().unwrap_or_else(|_| {
        DisplayMessage::error(&Error::inference(
          "analysis stopped without a result",
        ))
      });

      self.finish(message);
    }
  }
}
