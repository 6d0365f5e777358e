use serde::{Deserialize, Serialize};

use crate::{errors::IdwError, neighbours::NearestNeighbourAlgorithm, norm::DistanceNorm};

///
/// Smoothing exponent used when none is given.
///
pub const DEFAULT_P: f64 = 2.0;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct IdwOptions
{
    /// Smoothing exponent. Must be strictly positive and finite.
    pub p: f64,
    /// Norm used for both neighbour search and weighting.
    pub norm: DistanceNorm,
    /// Number of neighbours blended per query (`None` uses the whole input sample).
    pub neighbour_count: Option<usize>,
    /// Search structure built over the input sample.
    pub algorithm: NearestNeighbourAlgorithm,
}

impl Default for IdwOptions
{
    fn default() -> Self {
        Self { p: DEFAULT_P, norm: DistanceNorm::default(), neighbour_count: None, algorithm: NearestNeighbourAlgorithm::default() }
    }
}

impl IdwOptions
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn with_p(mut self, p: f64) -> Self
    {
        self.p = p;
        self
    }

    pub fn with_norm(mut self, norm: DistanceNorm) -> Self
    {
        self.norm = norm;
        self
    }

    pub fn with_neighbour_count(mut self, neighbour_count: usize) -> Self
    {
        self.neighbour_count = Some(neighbour_count);
        self
    }

    pub fn with_algorithm(mut self, algorithm: NearestNeighbourAlgorithm) -> Self
    {
        self.algorithm = algorithm;
        self
    }

    pub fn validate(&self) -> Result<(), IdwError>
    {
        validate_p(self.p)?;
        validate_neighbour_count(self.neighbour_count)
    }
}

pub(crate) fn validate_p(p: f64) -> Result<(), IdwError>
{
    // also rejects NaN
    if p > 0.0 && p.is_finite() { Ok(()) } else { Err(IdwError::InvalidArgument) }
}

pub(crate) fn validate_neighbour_count(neighbour_count: Option<usize>) -> Result<(), IdwError>
{
    if neighbour_count == Some(0) { Err(IdwError::InvalidArgument) } else { Ok(()) }
}

#[test]
fn check_option_validation()
{
    assert!(IdwOptions::default().validate().is_ok());
    assert_eq!(IdwOptions::new().with_p(0.0).validate(), Err(IdwError::InvalidArgument));
    assert_eq!(IdwOptions::new().with_p(-1.5).validate(), Err(IdwError::InvalidArgument));
    assert_eq!(IdwOptions::new().with_p(f64::NAN).validate(), Err(IdwError::InvalidArgument));
    assert_eq!(IdwOptions::new().with_p(f64::INFINITY).validate(), Err(IdwError::InvalidArgument));
    assert_eq!(IdwOptions::new().with_neighbour_count(0).validate(), Err(IdwError::InvalidArgument));
    assert!(IdwOptions::new().with_p(0.5).with_neighbour_count(3).with_norm(DistanceNorm::Manhattan).validate().is_ok());
}
