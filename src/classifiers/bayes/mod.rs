mod complement_naive_bayes;
mod naive_bayes;

pub use complement_naive_bayes::ComplementNaiveBayes;
pub use naive_bayes::NaiveBayes;
