use crate::clusterers::Clusterer;
use crate::core::{Estimator, Features};
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::any::Any;
use std::collections::HashMap;
use std::f64::consts::PI;

/// Online k-means.
///
/// Each update moves the closest center a fraction `halflife` of the way
/// towards the sample. Center coordinates are drawn from `Normal(mu, sigma)`
/// the first time a feature is learned; until then a center sits at `mu`
/// along that feature.
#[derive(Debug, Clone)]
pub struct KMeans {
    halflife: f64,
    mu: f64,
    sigma: f64,
    p: f64,
    rng: StdRng,
    centers: Vec<HashMap<String, f64>>,
}

impl Default for KMeans {
    fn default() -> Self {
        Self::build(5, 0.5, 0.0, 1.0, 2.0, 42)
    }
}

impl KMeans {
    pub fn new(
        n_clusters: usize,
        halflife: f64,
        mu: f64,
        sigma: f64,
        p: f64,
        seed: u64,
    ) -> Result<Self> {
        if n_clusters == 0 {
            return Err(Error::Configuration("n_clusters must be > 0".into()));
        }
        if !(halflife > 0.0 && halflife <= 1.0) {
            return Err(Error::Configuration(format!(
                "halflife must be in (0, 1], got {halflife}"
            )));
        }
        if !mu.is_finite() || !sigma.is_finite() || sigma < 0.0 {
            return Err(Error::Configuration(format!(
                "mu must be finite and sigma finite and >= 0, got mu={mu}, sigma={sigma}"
            )));
        }
        if !p.is_finite() || p <= 0.0 {
            return Err(Error::Configuration(format!("p must be > 0, got {p}")));
        }
        Ok(Self::build(n_clusters, halflife, mu, sigma, p, seed))
    }

    fn build(n_clusters: usize, halflife: f64, mu: f64, sigma: f64, p: f64, seed: u64) -> Self {
        Self {
            halflife,
            mu,
            sigma,
            p,
            rng: StdRng::seed_from_u64(seed),
            centers: vec![HashMap::new(); n_clusters],
        }
    }

    pub fn n_clusters(&self) -> usize {
        self.centers.len()
    }

    pub fn centers(&self) -> &[HashMap<String, f64>] {
        &self.centers
    }

    // Box-Muller
    fn gaussian(&mut self) -> f64 {
        let u1: f64 = 1.0 - self.rng.random::<f64>();
        let u2: f64 = self.rng.random::<f64>();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        self.mu + self.sigma * z
    }

    fn seed_missing_coordinates(&mut self, x: &Features) {
        for c in 0..self.centers.len() {
            for f in x.keys() {
                if !self.centers[c].contains_key(f) {
                    let v = self.gaussian();
                    self.centers[c].insert(f.clone(), v);
                }
            }
        }
    }

    /// Minkowski distance raised to the power `p`.
    fn distance(&self, center: &HashMap<String, f64>, x: &Features) -> f64 {
        let from_x: f64 = x
            .iter()
            .map(|(f, v)| (center.get(f).copied().unwrap_or(self.mu) - v).abs().powf(self.p))
            .sum();
        let center_only: f64 = center
            .iter()
            .filter(|(f, _)| !x.contains_key(*f))
            .map(|(_, c)| c.abs().powf(self.p))
            .sum();
        from_x + center_only
    }
}

impl Clusterer for KMeans {
    fn learn_one(&mut self, x: &Features) {
        self.seed_missing_coordinates(x);
        let closest = self.predict_one(x);
        let halflife = self.halflife;
        let center = &mut self.centers[closest];
        for (f, &v) in x {
            let c = center.entry(f.clone()).or_insert(v);
            *c += halflife * (v - *c);
        }
    }

    fn predict_one(&self, x: &Features) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, center) in self.centers.iter().enumerate() {
            let d = self.distance(center, x);
            if d < best_distance {
                best = i;
                best_distance = d;
            }
        }
        best
    }
}

impl Estimator for KMeans {
    fn clone_estimator(&self) -> Box<dyn Estimator> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> &'static str {
        "KMeans"
    }

    fn as_clusterer(&self) -> Option<&dyn Clusterer> {
        Some(self)
    }

    fn as_clusterer_mut(&mut self) -> Option<&mut dyn Clusterer> {
        Some(self)
    }
}
