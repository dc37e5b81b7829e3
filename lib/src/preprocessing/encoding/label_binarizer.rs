use crate::backend::{Backend, Tensor2D};
use crate::preprocessing::error::PreprocessingError;

/// One-hot encoder over a fixed, ordered list of class names.
///
/// Column `c` of the encoded matrix is 1.0 where the label equals `classes[c]`
/// and 0.0 elsewhere, so the class order here is the order of the classifier's
/// outputs.
///
/// # Example
/// ```
/// use dslr::backend::CpuBackend;
/// use dslr::preprocessing::LabelBinarizer;
///
/// let binarizer = LabelBinarizer::new(["cat", "dog"]);
/// let y = binarizer.transform::<CpuBackend, _>(&["dog", "cat", "dog"]).unwrap();
/// assert_eq!(y.row(0).to_vec(), vec![0.0, 1.0]);
/// assert_eq!(binarizer.class_name(1), Some("dog"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelBinarizer {
    classes: Vec<String>,
}

impl LabelBinarizer {
    pub fn new<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            classes: classes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    pub fn class_name(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }

    /// Encodes `labels` as an `labels.len() × n_classes` one-hot matrix.
    ///
    /// # Errors
    /// - [`PreprocessingError::EmptyData`] if there are no classes
    /// - [`PreprocessingError::UnknownClass`] for a label not in the class list
    pub fn transform<B: Backend, S: AsRef<str>>(
        &self,
        labels: &[S],
    ) -> Result<Tensor2D<B>, PreprocessingError> {
        let k = self.n_classes();
        if k == 0 {
            return Err(PreprocessingError::EmptyData(
                "label binarizer has no classes".to_string(),
            ));
        }
        let mut data = vec![0.0; labels.len() * k];
        for (i, label) in labels.iter().enumerate() {
            let label = label.as_ref();
            let c = self
                .index_of(label)
                .ok_or_else(|| PreprocessingError::UnknownClass {
                    class: label.to_string(),
                })?;
            data[i * k + c] = 1.0;
        }
        Ok(Tensor2D::new(data, labels.len(), k))
    }
}
