use num_traits::Float;
use serde::{Deserialize, Serialize};

///
/// Norm used to measure the distance between a query point and the input sample.
///
#[derive(Default, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DistanceNorm
{
    /// L2 norm.
    #[default]
    Euclidean,
    /// L1 norm.
    Manhattan,
    /// L-infinity norm.
    Chebyshev,
}

impl DistanceNorm
{
    ///
    /// Norm of `a - b`.
    ///
    #[inline]
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64
    {
        match self
        {
            DistanceNorm::Euclidean => euclidean(a, b),
            DistanceNorm::Manhattan => manhattan(a, b),
            DistanceNorm::Chebyshev => chebyshev(a, b),
        }
    }

    ///
    /// Monotone stand-in for `distance` used while searching the spatial index.
    /// Ranks points identically to `distance` but skips the square root for L2.
    ///
    #[inline]
    pub fn search_metric<T: Float>(&self) -> fn(&[T], &[T]) -> T
    {
        match self
        {
            DistanceNorm::Euclidean => squared_euclidean,
            DistanceNorm::Manhattan => manhattan,
            DistanceNorm::Chebyshev => chebyshev,
        }
    }
}

///
/// L2 distance accumulated with `hypot`, so tiny or huge coordinate
/// differences neither underflow to zero nor overflow to infinity.
///
pub fn euclidean<T: Float>(a: &[T], b: &[T]) -> T
{
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| acc.hypot(x - y))
}

pub fn squared_euclidean<T: Float>(a: &[T], b: &[T]) -> T
{
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| acc + (x - y) * (x - y))
}

pub fn manhattan<T: Float>(a: &[T], b: &[T]) -> T
{
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| acc + (x - y).abs())
}

pub fn chebyshev<T: Float>(a: &[T], b: &[T]) -> T
{
    a.iter().zip(b).fold(T::zero(), |acc, (&x, &y)| acc.max((x - y).abs()))
}

#[test]
fn check_norms()
{
    let a = [0.0, 0.0];
    let b = [3.0, -4.0];
    assert_eq!(DistanceNorm::Euclidean.distance(&a, &b), 5.0);
    assert_eq!(DistanceNorm::Manhattan.distance(&a, &b), 7.0);
    assert_eq!(DistanceNorm::Chebyshev.distance(&a, &b), 4.0);
    assert_eq!(DistanceNorm::Euclidean.search_metric::<f64>()(&a, &b), 25.0);
}

#[test]
fn check_euclidean_extremes()
{
    assert_eq!(DistanceNorm::Euclidean.distance(&[0.0], &[5e-171]), 5e-171);
    assert_eq!(DistanceNorm::Euclidean.distance(&[-1e300, 0.0], &[1e300, 0.0]), 2e300);
    assert_eq!(DistanceNorm::Euclidean.distance(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
}
