use {
  crate::{
    arguments::Arguments,
    classifier::Classifier,
    config::*,
    controller::{Controller, Screen},
    error::Error,
    interface::Interface,
    math::*,
    message::{resolve, Category, DisplayMessage, PROCESSING_FAILURE},
    model::Model,
    network::Network,
    pipeline::Pipeline,
    preprocess::{PixelBuffer, Preprocessor},
    source::{
      Acquisition, ImageSource, LibraryPicker, PathSource, RawImage,
      ReaderSource,
    },
    subcommand::Subcommand,
  },
  anyhow::{anyhow, bail, Context},
  clap::Parser,
  eframe::{
    egui::{
      self, text::LayoutJob, Align, Color32, FontId, RichText, TextFormat,
      ViewportBuilder,
    },
    HardwareAcceleration, NativeOptions,
  },
  image::{imageops::FilterType, DynamicImage},
  ndarray::{Array2, Array4, ArrayView2, Axis},
  serde::{Deserialize, Serialize},
  std::{
    any::Any,
    cmp::Ordering,
    fs::{self, File},
    io::{self, BufReader, Read},
    ops::Range,
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
    process,
    sync::{
      mpsc::{self, Receiver, TryRecvError},
      Arc, OnceLock,
    },
    time::Duration,
  },
  tracing::{debug, info, warn},
  tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
  },
};

#[cfg(feature = "onnx")]
use crate::onnx::OnnxModel;

#[cfg(feature = "camera")]
use crate::source::CameraCapture;

mod arguments;
mod classifier;
mod config;
mod controller;
mod error;
mod interface;
mod math;
mod message;
mod model;
mod network;
#[cfg(feature = "onnx")]
mod onnx;
mod pipeline;
mod preprocess;
mod source;
mod subcommand;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn main() {
  let arguments = Arguments::parse();

  arguments.init_tracing();

  if let Err(error) = arguments.run() {
    eprintln!("error: {error:#}");
    process::exit(1);
  }
}
