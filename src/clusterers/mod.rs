pub mod clusterer;
mod k_means;

pub use clusterer::Clusterer;
pub use k_means::KMeans;
