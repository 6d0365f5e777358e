pub mod brute_force;
pub mod kd_tree;

use serde::{Deserialize, Serialize};

use crate::{errors::IdwError, norm::DistanceNorm, sample::Sample};

use self::{brute_force::BruteForceNeighbours, kd_tree::KdTreeNeighbours};

///
/// k-nearest-neighbour search over a fixed reference sample.
///
pub trait NearestNeighbour: Send + Sync
{
    /// Number of reference points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool
    {
        self.len() == 0
    }

    /// Dimension of the reference points.
    fn dim(&self) -> usize;

    ///
    /// Indices of the `min(k, len())` reference points closest to `point`,
    /// ordered by increasing distance.
    ///
    fn query(&self, point: &[f64], k: usize) -> Result<Vec<usize>, IdwError>;
}

///
/// Search structure used to locate neighbours during evaluation.
///
#[derive(Default, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NearestNeighbourAlgorithm
{
    #[default]
    KdTree,
    BruteForce,
}

impl NearestNeighbourAlgorithm
{
    pub fn build(&self, sample: &Sample, norm: DistanceNorm) -> Result<Neighbours, IdwError>
    {
        tracing::debug!(algorithm = ?self, ?norm, points = sample.len(), dim = sample.dim(), "building neighbour locator");
        Ok(match self
        {
            NearestNeighbourAlgorithm::KdTree => Neighbours::KdTree(KdTreeNeighbours::new(sample, norm)?),
            NearestNeighbourAlgorithm::BruteForce => Neighbours::BruteForce(BruteForceNeighbours::new(sample, norm)?),
        })
    }
}

///
/// Locator built by a `NearestNeighbourAlgorithm`. Cloning is cheap: the
/// underlying index is shared.
///
#[derive(Clone, Debug)]
pub enum Neighbours
{
    KdTree(KdTreeNeighbours),
    BruteForce(BruteForceNeighbours),
}

impl Neighbours
{
    pub fn algorithm(&self) -> NearestNeighbourAlgorithm
    {
        match self
        {
            Neighbours::KdTree(_) => NearestNeighbourAlgorithm::KdTree,
            Neighbours::BruteForce(_) => NearestNeighbourAlgorithm::BruteForce,
        }
    }

    pub fn norm(&self) -> DistanceNorm
    {
        match self
        {
            Neighbours::KdTree(tree) => tree.norm(),
            Neighbours::BruteForce(scan) => scan.norm(),
        }
    }
}

impl Default for Neighbours
{
    fn default() -> Self {
        Neighbours::KdTree(KdTreeNeighbours::default())
    }
}

impl NearestNeighbour for Neighbours
{
    fn len(&self) -> usize {
        match self
        {
            Neighbours::KdTree(tree) => tree.len(),
            Neighbours::BruteForce(scan) => scan.len(),
        }
    }

    fn dim(&self) -> usize {
        match self
        {
            Neighbours::KdTree(tree) => tree.dim(),
            Neighbours::BruteForce(scan) => scan.dim(),
        }
    }

    fn query(&self, point: &[f64], k: usize) -> Result<Vec<usize>, IdwError> {
        match self
        {
            Neighbours::KdTree(tree) => tree.query(point, k),
            Neighbours::BruteForce(scan) => scan.query(point, k),
        }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    fn scattered() -> Sample
    {
        let mut sample = Sample::new(2);
        for i in 0..40
        {
            let t = i as f64;
            sample.push(&[libm::sin(1.3 * t) * 5.0, libm::cos(0.7 * t) * 3.0 + 0.01 * t]).unwrap();
        }
        sample
    }

    #[test]
    fn kd_tree_and_brute_force_agree()
    {
        let sample = scattered();
        for norm in [DistanceNorm::Euclidean, DistanceNorm::Manhattan, DistanceNorm::Chebyshev]
        {
            let tree = NearestNeighbourAlgorithm::KdTree.build(&sample, norm).unwrap();
            let scan = NearestNeighbourAlgorithm::BruteForce.build(&sample, norm).unwrap();
            for query in [[0.1, 0.2], [-4.0, 2.5], [3.3, -1.7]]
            {
                let a = tree.query(&query, 5).unwrap();
                let b = scan.query(&query, 5).unwrap();
                let da: Vec<f64> = a.iter().map(|&i| norm.distance(sample.row(i), &query)).collect();
                let db: Vec<f64> = b.iter().map(|&i| norm.distance(sample.row(i), &query)).collect();
                assert_eq!(da, db);
            }
        }
    }

    #[test]
    fn query_is_capped_at_sample_size()
    {
        let sample = Sample::from_rows(&[[0.0], [1.0], [2.0]]).unwrap();
        for algorithm in [NearestNeighbourAlgorithm::KdTree, NearestNeighbourAlgorithm::BruteForce]
        {
            let locator = algorithm.build(&sample, DistanceNorm::Euclidean).unwrap();
            assert_eq!(locator.algorithm(), algorithm);
            assert_eq!(locator.norm(), DistanceNorm::Euclidean);
            assert_eq!(locator.len(), 3);
            assert_eq!(locator.dim(), 1);
            assert_eq!(locator.query(&[1.9], 10).unwrap(), vec![2, 1, 0]);
            assert_eq!(locator.query(&[1.9, 0.0], 1), Err(IdwError::InvalidDimension));
        }
    }
}
