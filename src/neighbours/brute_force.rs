use std::sync::Arc;

use crate::{errors::IdwError, norm::DistanceNorm, sample::Sample};

use super::NearestNeighbour;

///
/// Exhaustive scan over the reference sample. Equidistant points are
/// returned in order of their index.
///
#[derive(Default, Clone, Debug)]
pub struct BruteForceNeighbours
{
    points: Arc<Sample>,
    norm: DistanceNorm,
}

impl BruteForceNeighbours
{
    pub fn new(sample: &Sample, norm: DistanceNorm) -> Result<Self, IdwError>
    {
        if sample.as_slice().iter().any(|x| !x.is_finite())
        {
            return Err(IdwError::NonFiniteCoordinate);
        }
        Ok(Self { points: Arc::new(sample.clone()), norm })
    }

    pub fn norm(&self) -> DistanceNorm
    {
        self.norm
    }
}

impl NearestNeighbour for BruteForceNeighbours
{
    fn len(&self) -> usize {
        self.points.len()
    }

    fn dim(&self) -> usize {
        self.points.dim()
    }

    fn query(&self, point: &[f64], k: usize) -> Result<Vec<usize>, IdwError> {
        if point.len() != self.dim()
        {
            return Err(IdwError::InvalidDimension);
        }
        if point.iter().any(|x| !x.is_finite())
        {
            return Err(IdwError::NonFiniteCoordinate);
        }
        let metric = self.norm.search_metric::<f64>();
        let mut ranked: Vec<(f64, usize)> = self.points.rows().enumerate().map(|(i, row)| (metric(row, point), i)).collect();
        // stable, so ties keep index order
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        ranked.truncate(k);
        Ok(ranked.into_iter().map(|(_, i)| i).collect())
    }
}
