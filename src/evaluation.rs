use crate::{errors::IdwError, sample::Sample};

///
/// A function from `input_dimension()` coordinates to `output_dimension()` values.
///
pub trait Evaluation
{
    fn input_dimension(&self) -> usize;

    fn output_dimension(&self) -> usize;

    fn evaluate(&self, point: &[f64]) -> Result<Vec<f64>, IdwError>;

    ///
    /// Evaluates every point of `points`. Entry `j` of the result is `evaluate(points.row(j))`.
    ///
    fn evaluate_batch(&self, points: &Sample) -> Result<Sample, IdwError>
    {
        if points.dim() != self.input_dimension() && !points.is_empty()
        {
            return Err(IdwError::InvalidDimension);
        }
        let mut values = Sample::zeros(points.len(), self.output_dimension());
        for (j, point) in points.rows().enumerate()
        {
            let value = self.evaluate(point)?;
            values.as_mut_slice()[j * value.len()..(j + 1) * value.len()].copy_from_slice(&value);
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    struct Plane;

    impl Evaluation for Plane
    {
        fn input_dimension(&self) -> usize {
            2
        }

        fn output_dimension(&self) -> usize {
            1
        }

        fn evaluate(&self, point: &[f64]) -> Result<Vec<f64>, IdwError> {
            if point.len() != 2
            {
                return Err(IdwError::InvalidDimension);
            }
            Ok(vec![2.0 * point[0] - point[1]])
        }
    }

    #[test]
    fn default_batch_evaluates_each_point()
    {
        let points = Sample::from_rows(&[[1.0, 0.0], [0.5, 1.0], [3.0, 2.0]]).unwrap();
        let values = Plane.evaluate_batch(&points).unwrap();
        assert_eq!(values, Sample::from_rows(&[[2.0], [0.0], [4.0]]).unwrap());
        let wrong = Sample::from_rows(&[[1.0]]).unwrap();
        assert_eq!(Plane.evaluate_batch(&wrong), Err(IdwError::InvalidDimension));
    }
}
