use super::*;

#[derive(Debug, Parser)]
pub(crate) struct App {
  #[clap(short, long, help = "Model manifest")]
  model: PathBuf,
  #[cfg(feature = "camera")]
  #[clap(
    long,
    value_name = "INDEX",
    help = "Enable photo capture from a camera"
  )]
  camera: Option<u32>,
}

impl App {
  pub(crate) fn run(self) -> Result {
    let classifier = Arc::new(Classifier::new(self.model));

    {
      let classifier = Arc::clone(&classifier);
      rayon::spawn(move || {
        if let Err(error) = classifier.model() {
          debug!("model preload failed: {error}");
        }
      });
    }

    let controller = Controller::new(Arc::new(Pipeline::new(classifier)));

    let interface = Interface::new(controller);

    #[cfg(feature = "camera")]
    let interface = interface.with_camera(self.camera.map(CameraCapture::new));

    let native_options = NativeOptions {
      centered: true,
      hardware_acceleration: HardwareAcceleration::Preferred,
      viewport: ViewportBuilder::default()
        .with_title("Trash Tracker")
        .with_inner_size([420.0, 640.0]),
      ..Default::default()
    };

    eframe::run_native(
      env!("CARGO_PKG_NAME"),
      native_options,
      Box::new(|_| Ok(Box::new(interface))),
    )
    .map_err(|error| anyhow!("failed to run application: {error}"))?;

    Ok(())
  }
}
