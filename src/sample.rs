use serde::{Deserialize, Serialize};

use crate::errors::IdwError;

///
/// Ordered collection of points sharing one dimension. Coordinates are stored
/// row-major in a single buffer (size = `dim` * `len()`).
///
#[derive(Default, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Sample
{
    data: Vec<f64>,
    dim: usize,
}

impl Sample
{
    ///
    /// Creates an empty sample of dimension `dim`.
    ///
    pub fn new(dim: usize) -> Self
    {
        Self { data: Vec::new(), dim }
    }

    ///
    /// Wraps a flat row-major buffer. Fails with `InvalidDimension` if the
    /// buffer length is not a multiple of `dim`.
    ///
    pub fn from_flat(data: Vec<f64>, dim: usize) -> Result<Self, IdwError>
    {
        if (dim == 0 && !data.is_empty()) || (dim != 0 && data.len() % dim != 0)
        {
            return Err(IdwError::InvalidDimension);
        }
        Ok(Self { data, dim })
    }

    ///
    /// Builds a sample from a list of points. All points must share the
    /// dimension of the first one.
    ///
    pub fn from_rows<P: AsRef<[f64]>>(rows: &[P]) -> Result<Self, IdwError>
    {
        let dim = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut sample = Self::new(dim);
        sample.data.reserve(dim * rows.len());
        for row in rows
        {
            sample.push(row.as_ref())?;
        }
        Ok(sample)
    }

    #[inline]
    pub fn len(&self) -> usize
    {
        if self.dim == 0 { 0 } else { self.data.len() / self.dim }
    }

    #[inline]
    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }

    #[inline]
    pub fn dim(&self) -> usize
    {
        self.dim
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64]
    {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64>
    {
        // chunks_exact panics on a zero chunk size; an empty sample yields nothing either way.
        self.data.chunks_exact(self.dim.max(1))
    }

    pub fn push(&mut self, point: &[f64]) -> Result<(), IdwError>
    {
        if point.len() != self.dim || self.dim == 0
        {
            return Err(IdwError::InvalidDimension);
        }
        self.data.extend_from_slice(point);
        Ok(())
    }

    pub fn as_slice(&self) -> &[f64]
    {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64]
    {
        &mut self.data
    }

    ///
    /// Returns a zero-filled sample with `len` points of dimension `dim`.
    ///
    pub(crate) fn zeros(len: usize, dim: usize) -> Self
    {
        Self { data: vec![0.0; len * dim], dim }
    }
}
