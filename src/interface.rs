use super::*;

const EMPHASIS: Color32 = Color32::from_rgb(0, 200, 0);

enum Action {
  Start,
  Choose,
  #[cfg(feature = "camera")]
  Capture,
  Back,
}

pub(crate) struct Interface {
  controller: Controller,
  #[cfg(feature = "camera")]
  camera: Option<CameraCapture>,
}

impl eframe::App for Interface {
  fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
    self.controller.poll();

    if self.controller.is_analyzing() {
      ctx.request_repaint_after(Duration::from_millis(50));
    }

    egui::CentralPanel::default().show(ctx, |ui| {
      self.ui(ui);
    });
  }
}

impl Interface {
  pub(crate) fn new(controller: Controller) -> Self {
    Self {
      controller,
      #[cfg(feature = "camera")]
      camera: None,
    }
  }

  #[cfg(feature = "camera")]
  pub(crate) fn with_camera(mut self, camera: Option<CameraCapture>) -> Self {
    self.camera = camera;
    self
  }

  pub(crate) fn ui(&mut self, ui: &mut egui::Ui) {
    let action = match self.controller.screen() {
      Screen::Prompt => Self::prompt(ui),
      Screen::Capturing => self.capturing(ui),
      Screen::Result(message) => Self::result(ui, message),
    };

    if let Some(action) = action {
      self.apply(action);
    }
  }

  fn apply(&mut self, action: Action) {
    match action {
      Action::Start => {
        self.controller.start();
        self.choose();
      }
      Action::Choose => self.choose(),
      #[cfg(feature = "camera")]
      Action::Capture => {
        if let Some(camera) = &mut self.camera {
          self.controller.acquire(camera);
        }
      }
      Action::Back => {
        self.controller.back();
        self.choose();
      }
    }
  }

  fn choose(&mut self) {
    self.controller.acquire(&mut LibraryPicker);
  }

  fn prompt(ui: &mut egui::Ui) -> Option<Action> {
    let mut action = None;

    ui.vertical_centered(|ui| {
      ui.add_space(ui.available_height() / 3.0);

      ui.label(RichText::new("Take a Photo").size(40.0).strong());

      ui.add_space(20.0);

      if ui
        .button(RichText::new("Go to Photo Capture").size(20.0))
        .clicked()
      {
        action = Some(Action::Start);
      }
    });

    action
  }

  fn capturing(&self, ui: &mut egui::Ui) -> Option<Action> {
    let mut action = None;

    ui.vertical_centered(|ui| {
      ui.add_space(ui.available_height() / 3.0);

      if self.controller.is_analyzing() {
        ui.spinner();
        ui.label(RichText::new("Analyzing photo...").size(20.0));
        return;
      }

      if ui.button(RichText::new("Choose Photo").size(20.0)).clicked() {
        action = Some(Action::Choose);
      }

      #[cfg(feature = "camera")]
      if self.camera.is_some() {
        ui.add_space(10.0);

        if ui.button(RichText::new("Take Photo").size(20.0)).clicked() {
          action = Some(Action::Capture);
        }
      }
    });

    action
  }

  fn result(ui: &mut egui::Ui, message: &DisplayMessage) -> Option<Action> {
    let mut action = None;

    ui.vertical_centered(|ui| {
      ui.add_space(ui.available_height() / 4.0);

      let job =
        Self::layout(message, ui.available_width(), ui.visuals().text_color());

      ui.label(job);

      ui.add_space(20.0);

      if ui.button(RichText::new("Back").size(18.0).strong()).clicked() {
        action = Some(Action::Back);
      }
    });

    action
  }

  fn layout(message: &DisplayMessage, width: f32, color: Color32) -> LayoutJob {
    let regular = TextFormat {
      font_id: FontId::proportional(20.0),
      color,
      ..Default::default()
    };

    let emphasized = TextFormat {
      font_id: FontId::proportional(30.0),
      color: EMPHASIS,
      ..Default::default()
    };

    let mut job = LayoutJob {
      halign: Align::Center,
      ..Default::default()
    };

    job.wrap.max_width = width;

    for (text, emphasis) in message.segments() {
      let format = if emphasis { &emphasized } else { &regular };
      job.append(text, 0.0, format.clone());
    }

    job
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn layout_emphasizes_keyword() {
    let message = resolve("trash");

    let job = Interface::layout(&message, 400.0, Color32::WHITE);

    assert_eq!(job.text, message.text);
    assert_eq!(job.sections.len(), 3);
    assert_eq!(job.sections[1].byte_range, 15..20);
    assert_eq!(job.sections[1].format.color, EMPHASIS);
    assert_eq!(job.sections[0].format.color, Color32::WHITE);
  }

  #[test]
  fn layout_of_error_is_plain() {
    let message = DisplayMessage::error(&Error::preprocessing("corrupt"));

    let job = Interface::layout(&message, 400.0, Color32::WHITE);

    assert_eq!(job.sections.len(), 1);
    assert_eq!(job.sections[0].format.color, Color32::WHITE);
  }
}
