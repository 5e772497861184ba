use {
  super::{
    anyhow, argmax, info, Context, InputSpec, Model, Path, PixelBuffer,
    Result,
  },
  tract_onnx::prelude::*,
};

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>;

pub(crate) struct OnnxModel {
  plan: Plan,
  input: InputSpec,
  labels: Vec<String>,
}

impl OnnxModel {
  pub(crate) fn load(
    path: &Path,
    input: InputSpec,
    labels: Vec<String>,
  ) -> Result<Self> {
    let (batch, channels, height, width) = input.shape();

    info!(path = %path.display(), "loading ONNX model");

    let plan = tract_onnx::onnx()
      .model_for_path(path)
      .with_context(|| format!("failed to read {}", path.display()))?
      .with_input_fact(0, f32::fact([batch, channels, height, width]).into())?
      .into_optimized()?
      .into_runnable()?;

    Ok(Self {
      plan,
      input,
      labels,
    })
  }
}

impl Model for OnnxModel {
  fn input(&self) -> InputSpec {
    self.input
  }

  fn labels(&self) -> &[String] {
    &self.labels
  }

  fn predict(&self, buffer: &PixelBuffer) -> Result<String> {
    let (batch, channels, height, width) = self.input.shape();

    let values: Vec<f32> = buffer.data().iter().copied().collect();

    let tensor =
      Tensor::from_shape(&[batch, channels, height, width], &values)?;

    let outputs = self.plan.run(tvec!(tensor.into()))?;

    let scores = outputs
      .first()
      .ok_or_else(|| anyhow!("model produced no outputs"))?
      .to_array_view::<f32>()?;

    let index = argmax(scores.iter())
      .ok_or_else(|| anyhow!("model produced an empty output"))?;

    self.labels.get(index).cloned().ok_or_else(|| {
      anyhow!(
        "model predicted class {index} but only {} labels are declared",
        self.labels.len()
      )
    })
  }
}
