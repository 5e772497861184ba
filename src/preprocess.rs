use super::*;

/// Model input produced from a single [`RawImage`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PixelBuffer {
  spec: InputSpec,
  data: Array4<f32>,
}

impl PixelBuffer {
  pub(crate) fn spec(&self) -> InputSpec {
    self.spec
  }

  /// Pixel values laid out as `(1, channels, height, width)`.
  pub(crate) fn data(&self) -> &Array4<f32> {
    &self.data
  }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Preprocessor {
  spec: InputSpec,
}

impl Preprocessor {
  pub(crate) fn new(spec: InputSpec) -> Self {
    Self { spec }
  }

  pub(crate) fn process(&self, image: RawImage) -> Result<PixelBuffer, Error> {
    let image = Self::decode(image)?;

    if image.width() == 0 || image.height() == 0 {
      return Err(Error::preprocessing(format!(
        "image has no pixels ({}x{})",
        image.width(),
        image.height()
      )));
    }

    debug!(
      width = image.width(),
      height = image.height(),
      target_width = self.spec.width,
      target_height = self.spec.height,
      "resizing image"
    );

    let resized = image.resize_exact(
      self.spec.width,
      self.spec.height,
      FilterType::Triangle,
    );

    let normalization = self.spec.normalization;

    let data = match self.spec.format {
      PixelFormat::Rgb => {
        let rgb = resized.to_rgb8();
        Array4::from_shape_fn(self.spec.shape(), |(_, c, y, x)| {
          normalization.apply(rgb.get_pixel(x as u32, y as u32)[c])
        })
      }
      PixelFormat::Luma => {
        let luma = resized.to_luma8();
        Array4::from_shape_fn(self.spec.shape(), |(_, _, y, x)| {
          normalization.apply(luma.get_pixel(x as u32, y as u32)[0])
        })
      }
    };

    Ok(PixelBuffer {
      spec: self.spec,
      data,
    })
  }

  fn decode(image: RawImage) -> Result<DynamicImage, Error> {
    let bytes = match image {
      #[cfg(any(test, feature = "camera"))]
      RawImage::Bitmap(image) => return Ok(image),
      RawImage::Encoded(bytes) => bytes,
      RawImage::File(path) => fs::read(&path).map_err(|error| {
        Error::preprocessing(format!(
          "failed to read {}: {error}",
          path.display()
        ))
      })?,
    };

    if bytes.is_empty() {
      return Err(Error::preprocessing("image is empty"));
    }

    image::load_from_memory(&bytes)
      .map_err(|error| Error::preprocessing(error.to_string()))
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    approx::assert_relative_eq,
    image::{ImageFormat, Rgb, RgbImage},
    std::io::Cursor,
  };

  fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
  }

  fn png(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
      .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
      .unwrap();
    bytes
  }

  #[test]
  fn resizes_to_declared_input() {
    let preprocessor = Preprocessor::new(InputSpec::default());

    let buffer = preprocessor
      .process(RawImage::Bitmap(solid(640, 480, [10, 20, 30])))
      .unwrap();

    assert_eq!(buffer.data().dim(), (1, 3, 224, 224));
    assert_eq!(buffer.spec(), InputSpec::default());
  }

  #[test]
  fn normalizes_channels_in_order() {
    let preprocessor = Preprocessor::new(InputSpec {
      width: 4,
      height: 4,
      format: PixelFormat::Rgb,
      normalization: Normalization::Unit,
    });

    let buffer = preprocessor
      .process(RawImage::Bitmap(solid(8, 8, [255, 0, 51])))
      .unwrap();

    assert_relative_eq!(buffer.data()[[0, 0, 1, 1]], 1.0);
    assert_relative_eq!(buffer.data()[[0, 1, 1, 1]], 0.0);
    assert_relative_eq!(buffer.data()[[0, 2, 1, 1]], 0.2);
  }

  #[test]
  fn converts_to_luma() {
    let preprocessor = Preprocessor::new(InputSpec {
      width: 2,
      height: 3,
      format: PixelFormat::Luma,
      normalization: Normalization::Symmetric,
    });

    let buffer = preprocessor
      .process(RawImage::Bitmap(solid(5, 5, [0, 0, 0])))
      .unwrap();

    assert_eq!(buffer.data().dim(), (1, 1, 3, 2));
    assert!(buffer.data().iter().all(|&value| value == -1.0));
  }

  #[test]
  fn decodes_encoded_images() {
    let preprocessor = Preprocessor::new(InputSpec::default());

    let buffer = preprocessor
      .process(RawImage::Encoded(png(&solid(3, 3, [255, 255, 255]))))
      .unwrap();

    assert!(buffer.data().iter().all(|&value| value == 1.0));
  }

  #[test]
  fn processing_is_deterministic() {
    let preprocessor = Preprocessor::new(InputSpec::default());

    let image = DynamicImage::ImageRgb8(RgbImage::from_fn(31, 17, |x, y| {
      Rgb([(x * 8) as u8, (y * 15) as u8, ((x + y) * 3) as u8])
    }));

    assert_eq!(
      preprocessor.process(RawImage::Bitmap(image.clone())).unwrap(),
      preprocessor.process(RawImage::Bitmap(image)).unwrap()
    );
  }

  #[test]
  fn empty_input_fails() {
    let preprocessor = Preprocessor::new(InputSpec::default());

    assert!(matches!(
      preprocessor.process(RawImage::Encoded(Vec::new())),
      Err(Error::Preprocessing { .. })
    ));
  }

  #[test]
  fn zero_sized_bitmap_fails() {
    let preprocessor = Preprocessor::new(InputSpec::default());

    assert!(matches!(
      preprocessor.process(RawImage::Bitmap(DynamicImage::new_rgb8(0, 0))),
      Err(Error::Preprocessing { .. })
    ));
  }

  #[test]
  fn corrupt_input_fails() {
    let preprocessor = Preprocessor::new(InputSpec::default());

    let mut bytes = png(&solid(4, 4, [1, 2, 3]));
    bytes.truncate(bytes.len() / 2);

    assert!(matches!(
      preprocessor.process(RawImage::Encoded(bytes)),
      Err(Error::Preprocessing { .. })
    ));

    assert!(matches!(
      preprocessor.process(RawImage::Encoded(b"not an image".to_vec())),
      Err(Error::Preprocessing { .. })
    ));
  }

  #[test]
  fn missing_file_fails() {
    let preprocessor = Preprocessor::new(InputSpec::default());

    assert!(matches!(
      preprocessor.process(RawImage::File(PathBuf::from("does/not/exist.png"))),
      Err(Error::Preprocessing { .. })
    ));
  }
}
