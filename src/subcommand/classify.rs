use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Classify {
  #[clap(short, long, help = "Model manifest")]
  model: PathBuf,
  #[clap(
    short,
    long,
    help = "Photo to classify, `-` for standard input, chosen interactively \
            if omitted"
  )]
  image: Option<PathBuf>,
  #[cfg(feature = "camera")]
  #[clap(
    long,
    value_name = "INDEX",
    conflicts_with = "image",
    help = "Capture the photo from a camera"
  )]
  camera: Option<u32>,
  #[clap(long, help = "Print the message as JSON")]
  json: bool,
}

impl Classify {
  /// Prints the message for one photo. Failed analyses still print their
  /// message, then fail the command.
  pub(crate) fn run(self) -> Result {
    let mut source = self.source();

    let Acquisition::Image(image) = source.acquire() else {
      info!("no photo selected");
      return Ok(());
    };

    let pipeline =
      Pipeline::new(Arc::new(Classifier::new(self.model.clone())));

    match pipeline.analyze(image) {
      Ok(message) => self.print(&message),
      Err(error) => {
        self.print(&DisplayMessage::error(&error))?;
        Err(error.into())
      }
    }
  }

  fn print(&self, message: &DisplayMessage) -> Result {
    if self.json {
      println!(
        "{}",
        serde_json::to_string_pretty(message)
          .context("failed to serialize message")?
      );
    } else {
      println!("{}", message.text);
    }

    Ok(())
  }

  fn source(&self) -> Box<dyn ImageSource> {
    #[cfg(feature = "camera")]
    if let Some(index) = self.camera {
      return Box::new(CameraCapture::new(index));
    }

    match &self.image {
      Some(path) if path.as_path() == Path::new("-") => {
        Box::new(ReaderSource::new(io::stdin()))
      }
      Some(path) => Box::new(PathSource::new(path.clone())),
      None => Box::new(LibraryPicker),
    }
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::model::tests::write_network_manifest,
    image::{Rgb, RgbImage},
    tempdir::TempDir,
  };

  fn classify(model: &Path, image: &Path) -> Classify {
    Classify::try_parse_from([
      Path::new("classify"),
      Path::new("--model"),
      model,
      Path::new("--image"),
      image,
    ])
    .unwrap()
  }

  #[test]
  fn classifies_photo() {
    let dir = TempDir::new("test").unwrap();

    let model = write_network_manifest(dir.path());

    let image = dir.path().join("photo.png");

    RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]))
      .save(&image)
      .unwrap();

    assert!(classify(&model, &image).run().is_ok());
  }

  #[test]
  fn corrupt_photo_fails() {
    let dir = TempDir::new("test").unwrap();

    let model = write_network_manifest(dir.path());

    let image = dir.path().join("photo.jpg");

    fs::write(&image, "not a jpeg").unwrap();

    let error = classify(&model, &image).run().unwrap_err();

    assert!(matches!(
      error.downcast_ref::<Error>(),
      Some(Error::Preprocessing { .. })
    ));
  }

  #[test]
  fn missing_model_fails() {
    let dir = TempDir::new("test").unwrap();

    let image = dir.path().join("photo.png");

    RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])).save(&image).unwrap();

    let error = classify(&dir.path().join("missing.json"), &image)
      .run()
      .unwrap_err();

    assert!(matches!(
      error.downcast_ref::<Error>(),
      Some(Error::ModelLoad { .. })
    ));
  }

  #[test]
  fn dash_reads_standard_input() {
    let classify = classify(Path::new("model.json"), Path::new("-"));
    assert_eq!(classify.image.as_deref(), Some(Path::new("-")));
  }
}
