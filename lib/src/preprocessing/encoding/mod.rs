//! Class label encoding.
//!
//! [`LabelBinarizer`] turns string labels into the one-hot target matrix used to
//! train one binary unit per class, and maps class indices back to names.

mod label_binarizer;

pub use label_binarizer::LabelBinarizer;
