//! Trains a One-vs-Rest logistic regression model on a labelled CSV dataset
//! and writes the fitted parameters to a JSON model file.

use clap::Parser;
use dslr::backend::CpuBackend;
use dslr::dataset::{read_csv, DatasetSchema};
use dslr::error::ModelError;
use dslr::logging;
use dslr::model::OneVsRestClassifier;
use dslr::optimizer::{GradientDescent, Optimizer, OptimizerKind};
use dslr::parallel::run_with_threads;
use dslr::preprocessing::{LabelBinarizer, MaxAbsScaler, Transformer};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "logreg_train", version, about = "Train a One-vs-Rest logistic regression model")]
struct Args {
    /// Training dataset (CSV with a header row)
    dataset: PathBuf,

    /// Gradient descent variant
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = OptimizerKind::Batch)]
    model: OptimizerKind,

    /// Where to write the model file
    #[arg(short, long, default_value = "model.json")]
    output: PathBuf,

    /// Learning rate (defaults depend on the variant)
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Epochs for batch, single-sample updates for stochastic
    #[arg(long)]
    epochs: Option<usize>,

    /// Worker threads for per-class training: 0 = all cores, 1 = sequential
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let schema = DatasetSchema::default();
    let table = read_csv(&args.dataset, &schema)?.drop_incomplete();
    let labels = table.required_labels()?;

    let x = MaxAbsScaler::<CpuBackend>::new().fit_transform(&table.feature_matrix())?;
    let binarizer = LabelBinarizer::new(schema.classes.iter().cloned());
    let y = binarizer.transform::<CpuBackend, _>(&labels)?;

    let optimizer = GradientDescent::from_kind(args.model, args.learning_rate, args.epochs);
    info!(
        optimizer = %args.model,
        learning_rate = Optimizer::<CpuBackend>::learning_rate(&optimizer),
        epochs = Optimizer::<CpuBackend>::epochs(&optimizer),
        rows = table.len(),
        "training"
    );

    let model = run_with_threads(args.threads, |parallelism| {
        let mut model = OneVsRestClassifier::new(optimizer).with_parallelism(parallelism);
        model.fit(&x, &y)?;
        Ok::<_, ModelError>(model)
    })??;

    let accuracy = model.accuracy_with_labels(&x, &y, binarizer.classes())?;
    info!(accuracy = format_args!("{accuracy:.4}"), "training accuracy");

    model.save(&args.output)?;
    info!(path = %args.output.display(), "model saved");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logging::init(args.verbose) {
        eprintln!("{e}");
    }
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
