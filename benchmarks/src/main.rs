fn main() {
    println!("dslr benchmark suite");
    println!();
    println!("Usage:");
    println!("  cargo bench --package benchmarks --bench training");
    println!();
    println!("Benchmark groups:");
    println!("  - batch: full-batch gradient descent, one binary unit");
    println!("  - stochastic: single-sample gradient descent, one binary unit");
    println!("  - ovr_fit: four-class One-vs-Rest, sequential vs parallel");
    println!("  - ovr_predict: per-row class prediction");
}
