use super::*;

#[derive(Debug, Parser)]
pub(crate) struct Inspect {
  #[clap(short, long, help = "Model manifest")]
  model: PathBuf,
}

impl Inspect {
  pub(crate) fn run(self) -> Result {
    let model = model::load(&self.model)
      .with_context(|| format!("failed to load {}", self.model.display()))?;

    let input = model.input();

    println!(
      "Input: {}x{} {:?} ({:?})",
      input.width, input.height, input.format, input.normalization
    );

    println!("Labels:");

    for label in model.labels() {
      match Category::from_label(label) {
        Some(category) => println!("  {label} -> {}", category.label()),
        None => {
          println!("  {label}");
          warn!(%label, "label has no disposal instruction");
        }
      }
    }

    for category in Category::ALL {
      if !model
        .labels()
        .iter()
        .any(|label| Category::from_label(label) == Some(category))
      {
        warn!("model never predicts {}", category.label());
      }
    }

    Ok(())
  }
}
