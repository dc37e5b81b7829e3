//! Scores a saved model against a labelled CSV dataset.

use clap::Parser;
use dslr::backend::CpuBackend;
use dslr::dataset::{read_csv, DatasetSchema};
use dslr::logging;
use dslr::model::OneVsRestClassifier;
use dslr::optimizer::GradientDescent;
use dslr::preprocessing::{LabelBinarizer, MaxAbsScaler, MeanImputer, Transformer};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "logreg_accuracy", version, about = "Measure model accuracy on a labelled dataset")]
struct Args {
    /// Labelled dataset (CSV with a header row)
    dataset: PathBuf,

    /// Model file written by logreg_train
    model: PathBuf,

    /// Log every prediction
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<f64, Box<dyn Error>> {
    let schema = DatasetSchema::default();
    let table = read_csv(&args.dataset, &schema)?;
    let labels = table.required_labels()?;

    let filled = MeanImputer::<CpuBackend>::new().fit_transform(&table.feature_matrix())?;
    let x = MaxAbsScaler::new().fit_transform(&filled)?;
    let binarizer = LabelBinarizer::new(schema.classes.iter().cloned());
    let y = binarizer.transform::<CpuBackend, _>(&labels)?;

    let model = OneVsRestClassifier::<CpuBackend, _>::from_file(GradientDescent::default(), &args.model)?;
    let accuracy = model.accuracy_with_labels(&x, &y, binarizer.classes())?;
    info!(rows = table.len(), accuracy = format_args!("{accuracy:.4}"), "evaluated");
    Ok(accuracy)
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logging::init(args.verbose) {
        eprintln!("{e}");
    }
    match run(&args) {
        Ok(accuracy) => {
            println!("{accuracy:.4}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
