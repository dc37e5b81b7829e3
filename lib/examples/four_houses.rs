//! One-vs-Rest on four synthetic clusters.
//!
//! Generates one point cloud per quadrant of the plane, trains the classifier
//! with both gradient descent variants, and round-trips the batch model through
//! a model file.
//!
//! Run with: cargo run --example four_houses

use dslr::{
    backend::{CpuBackend, Tensor1D, Tensor2D},
    model::{InferenceModel, OneVsRestClassifier},
    optimizer::{GradientDescent, OptimizerKind},
    parallel::Parallelism,
    preprocessing::LabelBinarizer,
};
use std::error::Error;

const HOUSES: [&str; 4] = ["Gryffindor", "Hufflepuff", "Ravenclaw", "Slytherin"];
const CENTERS: [[f64; 2]; 4] = [[1.0, 1.0], [-1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]];

/// Points around each center, offset on a small deterministic grid.
fn clusters(per_class: usize) -> (Vec<Vec<f64>>, Vec<&'static str>) {
    let mut x = Vec::new();
    let mut labels = Vec::new();
    for (house, center) in HOUSES.iter().zip(CENTERS) {
        for i in 0..per_class {
            let dx = (i % 5) as f64 * 0.1 - 0.2;
            let dy = (i / 5 % 5) as f64 * 0.1 - 0.2;
            x.push(vec![center[0] + dx, center[1] + dy]);
            labels.push(*house);
        }
    }
    (x, labels)
}

fn main() -> Result<(), Box<dyn Error>> {
    let (rows, labels) = clusters(25);
    let x = Tensor2D::<CpuBackend>::from_rows(&rows)?;
    let binarizer = LabelBinarizer::new(HOUSES);
    let y = binarizer.transform(&labels)?;

    for kind in [OptimizerKind::Batch, OptimizerKind::Stochastic] {
        let optimizer = GradientDescent::from_kind(kind, Some(0.1), Some(2_000));
        let mut model = OneVsRestClassifier::new(optimizer).with_parallelism(Parallelism::Parallel);
        model.fit(&x, &y)?;
        println!("{kind}: training accuracy {:.4}", model.accuracy(&x, &y)?);
    }

    let mut model = OneVsRestClassifier::new(GradientDescent::from_kind(
        OptimizerKind::Batch,
        Some(0.5),
        Some(1_000),
    ));
    model.fit(&x, &y)?;

    let path = std::env::temp_dir().join("four_houses_model.json");
    model.save(&path)?;
    let loaded = OneVsRestClassifier::<CpuBackend, _>::from_file(GradientDescent::default(), &path)?;

    let student = Tensor1D::new(vec![-0.9, 1.1]);
    let probabilities = loaded.predict(&student)?;
    let house = loaded.predict_class(&student)?;
    println!("probabilities: {probabilities:.3?}");
    println!("sorted into {}", binarizer.class_name(house).unwrap_or("?"));

    std::fs::remove_file(&path)?;
    Ok(())
}
