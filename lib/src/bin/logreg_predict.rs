//! Predicts the class of every row in a CSV dataset with a saved model and
//! writes an `Index,<label column>` CSV.

use clap::Parser;
use dslr::backend::CpuBackend;
use dslr::dataset::{read_csv, write_predictions, DatasetSchema};
use dslr::logging;
use dslr::model::OneVsRestClassifier;
use dslr::optimizer::GradientDescent;
use dslr::preprocessing::{LabelBinarizer, MaxAbsScaler, MeanImputer, Transformer};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

#[derive(Parser, Debug)]
#[command(name = "logreg_predict", version, about = "Predict classes with a trained model")]
struct Args {
    /// Dataset to classify (CSV with a header row)
    dataset: PathBuf,

    /// Model file written by logreg_train
    model: PathBuf,

    /// Where to write the predictions
    #[arg(short, long, default_value = "houses.csv")]
    output: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let schema = DatasetSchema::default();
    let table = read_csv(&args.dataset, &schema)?;

    let filled = MeanImputer::<CpuBackend>::new().fit_transform(&table.feature_matrix())?;
    let x = MaxAbsScaler::new().fit_transform(&filled)?;

    let model = OneVsRestClassifier::<CpuBackend, _>::from_file(GradientDescent::default(), &args.model)?;
    let binarizer = LabelBinarizer::new(schema.classes.iter().cloned());
    if model.n_classes() != binarizer.n_classes() {
        return Err(format!(
            "model has {} classes, expected {}",
            model.n_classes(),
            binarizer.n_classes()
        )
        .into());
    }

    let mut names = Vec::with_capacity(table.len());
    for (i, index) in table.indices().iter().enumerate() {
        let class = model.predict_class(&x.row(i))?;
        let name = binarizer
            .class_name(class)
            .ok_or_else(|| format!("no class name for index {class}"))?;
        debug!(index, class = name, "prediction");
        names.push(name);
    }
    write_predictions(&args.output, &schema, table.indices(), &names)?;

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
