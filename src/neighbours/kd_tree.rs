use std::sync::Arc;

use kdtree::KdTree;

use crate::{errors::IdwError, norm::DistanceNorm, sample::Sample};

use super::NearestNeighbour;

type Tree = KdTree<f64, usize, Vec<f64>>;

///
/// Neighbour locator backed by a kd-tree. The tree is built once over the
/// reference sample and shared between clones.
///
#[derive(Default, Clone)]
pub struct KdTreeNeighbours
{
    tree: Option<Arc<Tree>>,
    norm: DistanceNorm,
    dim: usize,
}

impl KdTreeNeighbours
{
    pub fn new(sample: &Sample, norm: DistanceNorm) -> Result<Self, IdwError>
    {
        let tree = if sample.is_empty() { None } else { Some(Arc::new(Self::build_kdtree(sample)?)) };
        Ok(Self { tree, norm, dim: sample.dim() })
    }

    fn build_kdtree(sample: &Sample) -> Result<Tree, IdwError>
    {
        if sample.as_slice().iter().any(|x| !x.is_finite())
        {
            return Err(IdwError::NonFiniteCoordinate);
        }
        let mut tree = KdTree::new(sample.dim());
        for (i, point) in sample.rows().enumerate()
        {
            tree.add(point.to_vec(), i)?;
        }
        Ok(tree)
    }

    pub fn norm(&self) -> DistanceNorm
    {
        self.norm
    }
}

impl std::fmt::Debug for KdTreeNeighbours
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KdTreeNeighbours").field("len", &self.len()).field("dim", &self.dim).field("norm", &self.norm).finish()
    }
}

impl NearestNeighbour for KdTreeNeighbours
{
    fn len(&self) -> usize {
        self.tree.as_ref().map(|tree| tree.size()).unwrap_or(0)
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn query(&self, point: &[f64], k: usize) -> Result<Vec<usize>, IdwError> {
        if point.len() != self.dim
        {
            return Err(IdwError::InvalidDimension);
        }
        if point.iter().any(|x| !x.is_finite())
        {
            return Err(IdwError::NonFiniteCoordinate);
        }
        let Some(tree) = &self.tree else { return Ok(Vec::new()) };
        let metric = self.norm.search_metric::<f64>();
        let nearest = tree.nearest(point, k, &metric)?;
        Ok(nearest.into_iter().map(|(_, &index)| index).collect())
    }
}
