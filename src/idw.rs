use std::fmt::Display;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors::IdwError, evaluation::Evaluation, neighbours::{NearestNeighbour, NearestNeighbourAlgorithm, Neighbours}, norm::DistanceNorm, options::{validate_neighbour_count, validate_p, IdwOptions}, sample::Sample, serialization::{deserialize, serialize, SerializationFormat}};

///
/// Persisted form of an `InverseDistanceWeighting`. The neighbour locator is not
/// stored; it is rebuilt from `input_sample` when the state is loaded.
///
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IdwState
{
    pub input_sample: Sample,
    pub output_sample: Sample,
    pub options: IdwOptions,
}

///
/// How a query point combines the output sample.
///
enum Blend
{
    /// Query coincides with input point `i`.
    Exact(usize),
    /// Normalized `(index, weight)` pairs.
    Weighted(Vec<(usize, f64)>),
}

///
/// Inverse distance weighting interpolation of scattered data.
///
/// Given an input sample `X` and an output sample `Y`, returns `Y[i]` when evaluated
/// on `X[i]` and otherwise
///
/// ```text
/// f(x) = Σ w_i * Y[i] / Σ w_i,   w_i = 1 / d(x, X[i])^p
/// ```
///
/// over the neighbours of `x` found by the configured `NearestNeighbourAlgorithm`
/// (all points unless `neighbour_count` is set). Weights are evaluated as
/// `(d_min / d_i)^p`, which is identical after normalization and cannot overflow
/// when `x` is very close to an input point.
///
/// Evaluation takes `&self` only, so a configured interpolator may be shared
/// between threads. Mutators require `&mut self` and either fully succeed or
/// leave the interpolator unchanged.
///
#[derive(Default, Clone, Serialize, Deserialize)]
#[serde(try_from = "IdwState", into = "IdwState")]
pub struct InverseDistanceWeighting
{
    input_sample: Sample,
    output_sample: Sample,
    options: IdwOptions,
    neighbours: Neighbours,
}

impl InverseDistanceWeighting
{
    pub fn new(input_sample: Sample, output_sample: Sample, p: f64) -> Result<Self, IdwError>
    {
        Self::with_options(input_sample, output_sample, IdwOptions::default().with_p(p))
    }

    pub fn with_options(input_sample: Sample, output_sample: Sample, options: IdwOptions) -> Result<Self, IdwError>
    {
        if input_sample.len() != output_sample.len()
        {
            return Err(IdwError::DimensionMismatch);
        }
        options.validate()?;
        let neighbours = options.algorithm.build(&input_sample, options.norm)?;
        tracing::debug!(points = input_sample.len(), input_dimension = input_sample.dim(),
            output_dimension = output_sample.dim(), p = options.p, "created inverse distance weighting");
        Ok(Self { input_sample, output_sample, options, neighbours })
    }

    pub fn input_sample(&self) -> &Sample
    {
        &self.input_sample
    }

    pub fn output_sample(&self) -> &Sample
    {
        &self.output_sample
    }

    pub fn p(&self) -> f64
    {
        self.options.p
    }

    pub fn norm(&self) -> DistanceNorm
    {
        self.options.norm
    }

    pub fn neighbour_count(&self) -> Option<usize>
    {
        self.options.neighbour_count
    }

    pub fn options(&self) -> &IdwOptions
    {
        &self.options
    }

    pub fn nearest_neighbour_algorithm(&self) -> NearestNeighbourAlgorithm
    {
        self.options.algorithm
    }

    ///
    /// Read-only handle to the locator built over the input sample.
    ///
    pub fn neighbours(&self) -> &Neighbours
    {
        &self.neighbours
    }

    /// Number of (input, output) pairs.
    pub fn len(&self) -> usize
    {
        self.input_sample.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.input_sample.is_empty()
    }

    ///
    /// Replaces the input sample. It must hold as many points as the current output sample.
    ///
    pub fn set_input_sample(&mut self, input_sample: Sample) -> Result<(), IdwError>
    {
        if input_sample.len() != self.output_sample.len()
        {
            return Err(IdwError::DimensionMismatch);
        }
        self.neighbours = self.options.algorithm.build(&input_sample, self.options.norm)?;
        self.input_sample = input_sample;
        Ok(())
    }

    ///
    /// Replaces the output sample. It must hold as many points as the current input sample.
    ///
    pub fn set_output_sample(&mut self, output_sample: Sample) -> Result<(), IdwError>
    {
        if output_sample.len() != self.input_sample.len()
        {
            return Err(IdwError::DimensionMismatch);
        }
        self.output_sample = output_sample;
        Ok(())
    }

    ///
    /// Replaces both samples at once, e.g. to configure a default-constructed interpolator.
    ///
    pub fn set_samples(&mut self, input_sample: Sample, output_sample: Sample) -> Result<(), IdwError>
    {
        if input_sample.len() != output_sample.len()
        {
            return Err(IdwError::DimensionMismatch);
        }
        self.neighbours = self.options.algorithm.build(&input_sample, self.options.norm)?;
        self.input_sample = input_sample;
        self.output_sample = output_sample;
        Ok(())
    }

    pub fn set_p(&mut self, p: f64) -> Result<(), IdwError>
    {
        validate_p(p)?;
        self.options.p = p;
        Ok(())
    }

    pub fn set_norm(&mut self, norm: DistanceNorm) -> Result<(), IdwError>
    {
        self.neighbours = self.options.algorithm.build(&self.input_sample, norm)?;
        self.options.norm = norm;
        Ok(())
    }

    ///
    /// Sets how many neighbours are blended per query. `None` uses the whole input sample.
    ///
    pub fn set_neighbour_count(&mut self, neighbour_count: Option<usize>) -> Result<(), IdwError>
    {
        validate_neighbour_count(neighbour_count)?;
        self.options.neighbour_count = neighbour_count;
        Ok(())
    }

    pub fn set_nearest_neighbour_algorithm(&mut self, algorithm: NearestNeighbourAlgorithm) -> Result<(), IdwError>
    {
        self.neighbours = algorithm.build(&self.input_sample, self.options.norm)?;
        self.options.algorithm = algorithm;
        Ok(())
    }

    fn blend(&self, point: &[f64]) -> Result<Blend, IdwError>
    {
        if point.len() != self.input_dimension()
        {
            return Err(IdwError::InvalidDimension);
        }
        if self.is_empty()
        {
            return Err(IdwError::EmptySample);
        }
        let k = self.options.neighbour_count.unwrap_or(self.len()).min(self.len());
        let indices = self.neighbours.query(point, k)?;
        let mut distances = Vec::with_capacity(indices.len());
        for i in indices
        {
            let d = self.options.norm.distance(self.input_sample.row(i), point);
            if d == 0.0
            {
                return Ok(Blend::Exact(i));
            }
            distances.push((i, d));
        }
        let d_min = distances.iter().fold(f64::INFINITY, |acc, &(_, d)| acc.min(d));
        let mut weights: Vec<(usize, f64)> = distances.into_iter().map(|(i, d)| (i, (d_min / d).powf(self.options.p))).collect();
        let total: f64 = weights.iter().map(|(_, w)| w).sum();
        for (_, w) in weights.iter_mut()
        {
            *w /= total;
        }
        Ok(Blend::Weighted(weights))
    }

    ///
    /// Normalized weights `(index into the input sample, weight)` applied to the
    /// output sample when evaluating at `point`. They are nonnegative and sum to one;
    /// an exact match with an input point yields a single weight of `1.0`.
    ///
    pub fn weights(&self, point: &[f64]) -> Result<Vec<(usize, f64)>, IdwError>
    {
        Ok(match self.blend(point)?
        {
            Blend::Exact(i) => vec![(i, 1.0)],
            Blend::Weighted(weights) => weights,
        })
    }

    #[inline]
    fn evaluate_into(&self, point: &[f64], value: &mut [f64]) -> Result<(), IdwError>
    {
        match self.blend(point)?
        {
            Blend::Exact(i) => value.copy_from_slice(self.output_sample.row(i)),
            Blend::Weighted(weights) =>
            {
                value.fill(0.0);
                for (i, w) in weights
                {
                    for (v, &y) in value.iter_mut().zip(self.output_sample.row(i))
                    {
                        *v += w * y;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_batch(&self, points: &Sample) -> Result<Option<Sample>, IdwError>
    {
        if points.is_empty()
        {
            return Ok(Some(Sample::new(self.output_dimension())));
        }
        if points.dim() != self.input_dimension()
        {
            return Err(IdwError::InvalidDimension);
        }
        if self.is_empty()
        {
            return Err(IdwError::EmptySample);
        }
        Ok(None)
    }

    ///
    /// Same as `evaluate_batch` on the calling thread only.
    ///
    pub fn evaluate_batch_sequential(&self, points: &Sample) -> Result<Sample, IdwError>
    {
        if let Some(empty) = self.check_batch(points)?
        {
            return Ok(empty);
        }
        let mut values = Sample::zeros(points.len(), self.output_dimension());
        for (x, y) in points.rows().zip(values.as_mut_slice().chunks_exact_mut(self.output_dimension()))
        {
            self.evaluate_into(x, y)?;
        }
        Ok(values)
    }

    ///
    /// Saves the interpolator to file.
    ///
    pub fn save(&self, path: &str) -> Result<(), IdwError>
    {
        let file = std::io::BufWriter::new(std::fs::File::create(path).map_err(|_|IdwError::FileIOError)?);
        self.write(file)
    }

    pub fn write<Writer: std::io::Write>(&self, mut writer: Writer) -> Result<(), IdwError>
    {
        writer.write_all(&self.write_buffer()?).map_err(|_|IdwError::WriteBufferFailed)?;
        writer.flush().map_err(|_|IdwError::WriteBufferFailed)
    }

    pub fn write_buffer(&self) -> Result<Vec<u8>, IdwError>
    {
        self.to_bytes(SerializationFormat::default())
    }

    pub fn to_bytes(&self, format: SerializationFormat) -> Result<Vec<u8>, IdwError>
    {
        serialize(self, format)
    }

    ///
    /// Reads interpolator from buffer. The neighbour locator is rebuilt.
    ///
    pub fn read_buffer(buffer: &[u8]) -> Result<Self, IdwError>
    {
        Self::from_bytes(buffer, SerializationFormat::default())
    }

    pub fn from_bytes(buffer: &[u8], format: SerializationFormat) -> Result<Self, IdwError>
    {
        deserialize(buffer, format)
    }

    ///
    /// Reads interpolator written by `save` or `write`.
    ///
    pub fn read<Reader: std::io::Read>(mut reader: Reader) -> Result<Self, IdwError>
    {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(|_|IdwError::ReadBufferFailed)?;
        Self::read_buffer(&bytes)
    }
}

impl Evaluation for InverseDistanceWeighting
{
    fn input_dimension(&self) -> usize {
        self.input_sample.dim()
    }

    fn output_dimension(&self) -> usize {
        self.output_sample.dim()
    }

    fn evaluate(&self, point: &[f64]) -> Result<Vec<f64>, IdwError> {
        let mut value = vec![0.0; self.output_dimension()];
        self.evaluate_into(point, &mut value)?;
        Ok(value)
    }

    ///
    /// Evaluates all points in parallel. Results are identical to `evaluate_batch_sequential`.
    ///
    fn evaluate_batch(&self, points: &Sample) -> Result<Sample, IdwError> {
        if let Some(empty) = self.check_batch(points)?
        {
            return Ok(empty);
        }
        tracing::trace!(queries = points.len(), "evaluating batch");
        let dim_out = self.output_dimension();
        let mut values = Sample::zeros(points.len(), dim_out);
        points.as_slice().par_chunks_exact(points.dim()).zip(values.as_mut_slice().par_chunks_exact_mut(dim_out)).try_for_each(
            |(x, y)|
            {
                self.evaluate_into(x, y)
            }
        )?;
        Ok(values)
    }
}

impl PartialEq for InverseDistanceWeighting
{
    fn eq(&self, other: &Self) -> bool {
        self.input_sample == other.input_sample && self.output_sample == other.output_sample && self.options.p == other.options.p
    }
}

impl std::fmt::Debug for InverseDistanceWeighting
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InverseDistanceWeighting").field("input_sample", &self.input_sample)
            .field("output_sample", &self.output_sample).field("options", &self.options).finish()
    }
}

impl Display for InverseDistanceWeighting
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InverseDistanceWeighting(size={}, input_dimension={}, output_dimension={}, p={}, norm={:?}, neighbours={:?})",
            self.len(), self.input_dimension(), self.output_dimension(), self.options.p, self.options.norm, self.options.algorithm)
    }
}

impl TryFrom<IdwState> for InverseDistanceWeighting
{
    type Error = IdwError;

    fn try_from(value: IdwState) -> Result<Self, Self::Error> {
        Self::with_options(value.input_sample, value.output_sample, value.options)
    }
}

impl From<InverseDistanceWeighting> for IdwState
{
    fn from(value: InverseDistanceWeighting) -> Self {
        Self { input_sample: value.input_sample, output_sample: value.output_sample, options: value.options }
    }
}
