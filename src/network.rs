use super::*;

/// Dense two-layer network stored inline in a model manifest.
#[derive(Clone, Debug)]
pub(crate) struct Network {
  config: NetworkConfig,
  input: InputSpec,
  labels: Vec<String>,
}

impl Network {
  pub(crate) fn new(
    config: NetworkConfig,
    input: InputSpec,
    labels: Vec<String>,
  ) -> Result<Self> {
    let (hidden, inputs) = config.weight_input_hidden.dim();
    let (outputs, hidden_inputs) = config.weight_hidden_output.dim();

    if inputs != input.len() {
      bail!(
        "network expects {inputs} inputs but the declared input has {} values",
        input.len()
      );
    }

    if hidden_inputs != hidden {
      bail!(
        "hidden-output weights expect {hidden_inputs} hidden units, \
         found {hidden}"
      );
    }

    if outputs != labels.len() {
      bail!(
        "network has {outputs} outputs but {} labels are declared",
        labels.len()
      );
    }

    Ok(Self {
      config,
      input,
      labels,
    })
  }

  pub(crate) fn forward(&self, input: ArrayView2<f64>) -> Array2<f64> {
    let hidden = self.config.weight_input_hidden.dot(&input.t()).mapv(relu);
    self.config.weight_hidden_output.dot(&hidden).mapv(sigmoid)
  }
}

impl Model for Network {
  fn input(&self) -> InputSpec {
    self.input
  }

  fn labels(&self) -> &[String] {
    &self.labels
  }

  fn predict(&self, buffer: &PixelBuffer) -> Result<String> {
    let input = buffer
      .data()
      .mapv(f64::from)
      .into_shape_with_order((1, self.input.len()))
      .context("pixel buffer does not match the network input")?;

    let output = self.forward(input.view());

    let index = argmax(output.index_axis(Axis(1), 0).iter())
      .ok_or_else(|| anyhow!("network produced no output"))?;

    Ok(self.labels[index].clone())
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    approx::assert_relative_eq,
    image::{Rgb, RgbImage},
    ndarray::array,
  };

  fn tiny_input() -> InputSpec {
    InputSpec {
      width: 2,
      height: 1,
      format: PixelFormat::Luma,
      normalization: Normalization::Unit,
    }
  }

  fn labels() -> Vec<String> {
    vec!["a".into(), "b".into()]
  }

  #[test]
  fn network_forward() {
    let config = NetworkConfig {
      weight_input_hidden: array![[0.1, 0.2], [0.3, 0.4]],
      weight_hidden_output: array![[0.5, 0.6], [0.7, 0.8]],
    };

    let network = Network::new(config, tiny_input(), labels()).unwrap();

    let input = array![[1.0, 1.0]];
    let output = network.forward(input.view());

    let expected_output = array![
      [sigmoid(0.5 * 0.3 + 0.6 * 0.7)],
      [sigmoid(0.7 * 0.3 + 0.8 * 0.7)]
    ];

    assert_eq!(
      output.shape(),
      expected_output.shape(),
      "Output shape mismatch"
    );

    assert_relative_eq!(
      output[[0, 0]],
      expected_output[[0, 0]],
      epsilon = 1e-6
    );

    assert_relative_eq!(
      output[[1, 0]],
      expected_output[[1, 0]],
      epsilon = 1e-6
    );
  }

  #[test]
  fn network_predicts_label() {
    let config = NetworkConfig {
      weight_input_hidden: array![[1.0, 1.0]],
      weight_hidden_output: array![[-1.0], [1.0]],
    };

    let network = Network::new(config, tiny_input(), labels()).unwrap();

    let buffer = Preprocessor::new(tiny_input())
      .process(RawImage::Bitmap(DynamicImage::ImageRgb8(
        RgbImage::from_pixel(4, 4, Rgb([255, 255, 255])),
      )))
      .unwrap();

    assert_eq!(network.predict(&buffer).unwrap(), "b");
  }

  #[test]
  fn network_rejects_wrong_input_length() {
    let config = NetworkConfig {
      weight_input_hidden: array![[0.1, 0.2, 0.3]],
      weight_hidden_output: array![[0.5], [0.6]],
    };

    assert!(Network::new(config, tiny_input(), labels()).is_err());
  }

  #[test]
  fn network_rejects_label_count_mismatch() {
    let config = NetworkConfig {
      weight_input_hidden: array![[0.1, 0.2]],
      weight_hidden_output: array![[0.5], [0.6], [0.7]],
    };

    assert!(Network::new(config, tiny_input(), labels()).is_err());
  }

  #[test]
  fn network_rejects_inconsistent_hidden_layer() {
    let config = NetworkConfig {
      weight_input_hidden: array![[0.1, 0.2], [0.3, 0.4]],
      weight_hidden_output: array![[0.5], [0.6]],
    };

    assert!(Network::new(config, tiny_input(), labels()).is_err());
  }
}
