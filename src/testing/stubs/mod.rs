mod counting_clusterer;
mod recording_regressor;

pub use counting_clusterer::CountingClusterer;
pub use recording_regressor::RecordingRegressor;
