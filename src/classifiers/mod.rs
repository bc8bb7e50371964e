pub mod bayes;
pub mod classifier;
pub mod linear;

pub use bayes::{ComplementNaiveBayes, NaiveBayes};
pub use classifier::Classifier;
pub use linear::LogisticRegression;
