use super::*;

/// A loaded, read-only image classifier.
pub(crate) trait Model: Send + Sync {
  fn input(&self) -> InputSpec;

  fn labels(&self) -> &[String];

  fn predict(&self, buffer: &PixelBuffer) -> Result<String>;
}

/// Loads the model described by the manifest at `path`.
///
/// Relative backend paths are resolved against the manifest's directory.
pub(crate) fn load(path: &Path) -> Result<Box<dyn Model>> {
  let manifest = Manifest::load(path)?;

  match manifest.model {
    Weights::Network(config) => Ok(Box::new(Network::new(
      NetworkConfig::try_from(config)?,
      manifest.input,
      manifest.labels,
    )?)),
    Weights::Onnx { path: graph } => {
      let graph = path.parent().unwrap_or(Path::new("")).join(graph);
      load_onnx(&graph, manifest.input, manifest.labels)
    }
  }
}

#[cfg(feature = "onnx")]
fn load_onnx(
  path: &Path,
  input: InputSpec,
  labels: Vec<String>,
) -> Result<Box<dyn Model>> {
  Ok(Box::new(OnnxModel::load(path, input, labels)?))
}

#[cfg(not(feature = "onnx"))]
fn load_onnx(
  path: &Path,
  _input: InputSpec,
  _labels: Vec<String>,
) -> Result<Box<dyn Model>> {
  bail!(
    "cannot load {}: built without ONNX support",
    path.display()
  )
}
