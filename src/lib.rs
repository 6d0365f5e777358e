//! Inverse distance weighting (Shepard) interpolation of scattered data.
//!
//! ```
//! use idwrust::{evaluation::Evaluation, idw::InverseDistanceWeighting, sample::Sample};
//!
//! let input = Sample::from_rows(&[[0.0, 0.0], [1.0, 0.0]]).unwrap();
//! let output = Sample::from_rows(&[[1.0], [3.0]]).unwrap();
//! let idw = InverseDistanceWeighting::new(input, output, 2.0).unwrap();
//! assert_eq!(idw.evaluate(&[0.5, 0.0]).unwrap(), vec![2.0]);
//! ```
pub mod errors;
pub mod evaluation;
pub mod idw;
pub mod neighbours;
pub mod norm;
pub mod options;
pub mod sample;
pub mod serialization;
