use {super::*, app::App, classify::Classify, inspect::Inspect};

mod app;
mod classify;
mod inspect;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  #[clap(name = "app", about = "Run the interactive application")]
  App(App),
  #[clap(name = "classify", about = "Classify a single photo")]
  Classify(Classify),
  #[clap(name = "inspect", about = "Show a model's input contract and labels")]
  Inspect(Inspect),
}

impl Subcommand {
  pub(crate) fn run(self) -> Result {
    match self {
      Self::App(app) => app.run(),
      Self::Classify(classify) => classify.run(),
      Self::Inspect(inspect) => inspect.run(),
    }
  }
}
