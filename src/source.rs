use super::*;

const IMAGE_EXTENSIONS: &[&str] =
  &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tif", "tiff"];

/// An image as handed over by an acquisition surface.
#[derive(Clone, Debug)]
pub(crate) enum RawImage {
  /// A file on disk, read during preprocessing.
  File(PathBuf),
  Encoded(Vec<u8>),
  #[cfg(any(test, feature = "camera"))]
  Bitmap(DynamicImage),
}

#[derive(Debug)]
pub(crate) enum Acquisition {
  Image(RawImage),
  Cancelled,
}

pub(crate) trait ImageSource {
  fn acquire(&mut self) -> Acquisition;
}

/// Native photo picker.
#[derive(Debug, Default)]
pub(crate) struct LibraryPicker;

impl ImageSource for LibraryPicker {
  fn acquire(&mut self) -> Acquisition {
    match rfd::FileDialog::new()
      .set_title("Choose a photo")
      .add_filter("Images", IMAGE_EXTENSIONS)
      .pick_file()
    {
      Some(path) => {
        info!(path = %path.display(), "selected image");
        Acquisition::Image(RawImage::File(path))
      }
      None => {
        debug!("image selection cancelled");
        Acquisition::Cancelled
      }
    }
  }
}

/// Yields a fixed path once.
#[derive(Debug)]
pub(crate) struct PathSource {
  path: Option<PathBuf>,
}

impl PathSource {
  pub(crate) fn new(path: PathBuf) -> Self {
    Self { path: Some(path) }
  }
}

impl ImageSource for PathSource {
  fn acquire(&mut self) -> Acquisition {
    match self.path.take() {
      Some(path) => Acquisition::Image(RawImage::File(path)),
      None => Acquisition::Cancelled,
    }
  }
}

/// Reads one encoded photo from a stream, such as standard input.
#[derive(Debug)]
pub(crate) struct ReaderSource<R> {
  reader: Option<R>,
}

impl<R: Read> ReaderSource<R> {
  pub(crate) fn new(reader: R) -> Self {
    Self {
      reader: Some(reader),
    }
  }
}

impl<R: Read> ImageSource for ReaderSource<R> {
  fn acquire(&mut self) -> Acquisition {
    let Some(mut reader) = self.reader.take() else {
      return Acquisition::Cancelled;
    };

    let mut bytes = Vec::new();

    match reader.read_to_end(&mut bytes) {
      Ok(read) => {
        info!(bytes = read, "read image from stream");
        Acquisition::Image(RawImage::Encoded(bytes))
      }
      Err(error) => {
        warn!("failed to read image: {error}");
        Acquisition::Cancelled
      }
    }
  }
}

#[cfg(feature = "camera")]
#[derive(Debug)]
pub(crate) struct CameraCapture {
  index: u32,
}

#[cfg(feature = "camera")]
impl CameraCapture {
  pub(crate) fn new(index: u32) -> Self {
    Self { index }
  }

  fn capture(&self) -> Result<DynamicImage> {
    use nokhwa::{
      pixel_format::RgbFormat,
      utils::{CameraIndex, RequestedFormat, RequestedFormatType},
      Camera,
    };

    let format = RequestedFormat::new::<RgbFormat>(
      RequestedFormatType::AbsoluteHighestResolution,
    );

    let mut camera = Camera::new(CameraIndex::Index(self.index), format)
      .context("failed to open camera")?;

    camera.open_stream().context("failed to start camera stream")?;

    let frame = camera.frame().context("failed to capture frame")?;

    let decoded = frame
      .decode_image::<RgbFormat>()
      .context("failed to decode camera frame")?;

    if let Err(error) = camera.stop_stream() {
      warn!("failed to stop camera stream: {error}");
    }

    let (width, height) = decoded.dimensions();

    let image = image::RgbImage::from_raw(width, height, decoded.into_raw())
      .ok_or_else(|| anyhow!("camera frame does not match its dimensions"))?;

    Ok(DynamicImage::ImageRgb8(image))
  }
}

#[cfg(feature = "camera")]
impl ImageSource for CameraCapture {
  fn acquire(&mut self) -> Acquisition {
    match self.capture() {
      Ok(image) => {
        info!(
          width = image.width(),
          height = image.height(),
          "captured camera frame"
        );
        Acquisition::Image(RawImage::Bitmap(image))
      }
      Err(error) => {
        warn!("camera capture failed: {error:#}");
        Acquisition::Cancelled
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use {super::*, std::io::Cursor};

  struct Broken;

  impl Read for Broken {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
      Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
    }
  }

  #[test]
  fn path_source_yields_once() {
    let mut source = PathSource::new(PathBuf::from("photo.jpg"));

    assert!(matches!(
      source.acquire(),
      Acquisition::Image(RawImage::File(ref path))
        if path.as_path() == Path::new("photo.jpg")
    ));

    assert!(matches!(source.acquire(), Acquisition::Cancelled));
  }

  #[test]
  fn reader_source_yields_bytes_once() {
    let mut source = ReaderSource::new(Cursor::new(b"jpeg bytes".to_vec()));

    assert!(matches!(
      source.acquire(),
      Acquisition::Image(RawImage::Encoded(ref bytes))
        if bytes.as_slice() == b"jpeg bytes"
    ));

    assert!(matches!(source.acquire(), Acquisition::Cancelled));
  }

  #[test]
  fn reader_failure_is_cancellation() {
    let mut source = ReaderSource::new(Broken);
    assert!(matches!(source.acquire(), Acquisition::Cancelled));
  }

  #[test]
  fn encoded_stream_is_classified() {
    let mut bytes = Vec::new();

    DynamicImage::new_rgb8(4, 4)
      .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
      .unwrap();

    let mut source = ReaderSource::new(bytes.as_slice());

    let Acquisition::Image(image) = source.acquire() else {
      panic!("expected an image");
    };

    let buffer = Preprocessor::new(InputSpec::default())
      .process(image)
      .unwrap();

    assert_eq!(buffer.spec(), InputSpec::default());
  }
}
