use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum PixelFormat {
  Rgb,
  Luma,
}

impl PixelFormat {
  pub(crate) fn channels(self) -> usize {
    match self {
      Self::Rgb => 3,
      Self::Luma => 1,
    }
  }
}

#[derive(
  Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Normalization {
  /// `[0, 1]`
  #[default]
  Unit,
  /// `[-1, 1]`
  Symmetric,
}

impl Normalization {
  pub(crate) fn apply(self, value: u8) -> f32 {
    match self {
      Self::Unit => f32::from(value) / 255.0,
      Self::Symmetric => f32::from(value) / 127.5 - 1.0,
    }
  }
}

/// Input contract declared by a model.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct InputSpec {
  pub(crate) width: u32,
  pub(crate) height: u32,
  pub(crate) format: PixelFormat,
  #[serde(default)]
  pub(crate) normalization: Normalization,
}

impl Default for InputSpec {
  fn default() -> Self {
    Self {
      width: 224,
      height: 224,
      format: PixelFormat::Rgb,
      normalization: Normalization::Unit,
    }
  }
}

impl InputSpec {
  /// Tensor shape, `(batch, channels, height, width)`.
  pub(crate) fn shape(&self) -> (usize, usize, usize, usize) {
    (
      1,
      self.format.channels(),
      self.height as usize,
      self.width as usize,
    )
  }

  /// Element count, or `None` if it does not fit in a `usize`.
  pub(crate) fn checked_len(&self) -> Option<usize> {
    let (batch, channels, height, width) = self.shape();
    batch
      .checked_mul(channels)?
      .checked_mul(height)?
      .checked_mul(width)
  }

  /// Element count of a spec that passed manifest validation.
  pub(crate) fn len(&self) -> usize {
    let (batch, channels, height, width) = self.shape();
    batch * channels * height * width
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Manifest {
  #[serde(default)]
  pub(crate) input: InputSpec,
  pub(crate) labels: Vec<String>,
  pub(crate) model: Weights,
}

impl Manifest {
  pub(crate) fn load(path: &Path) -> Result<Self> {
    let file = File::open(path).context("failed to open model manifest")?;

    let manifest: Self = serde_json::from_reader(BufReader::new(file))
      .context("failed to deserialize model manifest")?;

    manifest.validate()?;

    Ok(manifest)
  }

  fn validate(&self) -> Result {
    if self.input.width == 0 || self.input.height == 0 {
      bail!(
        "model input must not be empty, got {}x{}",
        self.input.width,
        self.input.height
      );
    }

    if self.input.checked_len().is_none() {
      bail!(
        "model input {}x{} is too large",
        self.input.width,
        self.input.height
      );
    }

    if self.labels.is_empty() {
      bail!("model manifest declares no labels");
    }

    Ok(())
  }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(crate) enum Weights {
  Network(SerializableNetworkConfig),
  Onnx { path: PathBuf },
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct SerializableNetworkConfig {
  weight_input_hidden: Vec<f64>,
  weight_hidden_output: Vec<f64>,
  input_hidden_shape: (usize, usize),
  hidden_output_shape: (usize, usize),
}

#[derive(Clone, Debug)]
pub(crate) struct NetworkConfig {
  pub(crate) weight_input_hidden: Array2<f64>,
  pub(crate) weight_hidden_output: Array2<f64>,
}

impl TryFrom<SerializableNetworkConfig> for NetworkConfig {
  type Error = anyhow::Error;

  fn try_from(config: SerializableNetworkConfig) -> Result<Self> {
    Ok(Self {
      weight_input_hidden: Array2::from_shape_vec(
        config.input_hidden_shape,
        config.weight_input_hidden,
      )
      .context("input-hidden weights do not match their shape")?,
      weight_hidden_output: Array2::from_shape_vec(
        config.hidden_output_shape,
        config.weight_hidden_output,
      )
      .context("hidden-output weights do not match their shape")?,
    })
  }
}
