use super::*;

#[derive(Debug, Parser)]
#[clap(
  version,
  about = "Tells you whether an object is trash, recycling or compost"
)]
pub(crate) struct Arguments {
  #[clap(short, long, global = true, help = "Enable debug logging")]
  verbose: bool,
  #[clap(subcommand)]
  subcommand: Subcommand,
}

impl Arguments {
  pub(crate) fn init_tracing(&self) {
    let level = if self.verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
      .with(
        EnvFilter::try_from_default_env()
          .unwrap_or_else(|_| format!("trash_tracker={level}").into()),
      )
      .with(tracing_subscriber::fmt::layer().with_target(false))
      .init();
  }

  pub(crate) fn run(self) -> Result {
    self.subcommand.run()
  }
}
