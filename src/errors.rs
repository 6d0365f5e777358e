use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum IdwError
{
    /// Input and output samples hold a different number of points.
    DimensionMismatch,
    /// A configuration parameter is out of range (e.g. `p <= 0`).
    InvalidArgument,
    /// A point does not have the expected number of coordinates.
    InvalidDimension,
    EmptySample,
    NonFiniteCoordinate,
    KdTreeError,
    LZ4DecompressionFailed,
    ReadBufferFailed,
    WriteBufferFailed,
    SerializationFailed,
    DeserializationFailed,
    FileIOError,
}
impl std::error::Error for IdwError {}

impl Display for IdwError
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", *self)
    }
}

impl From<kdtree::ErrorKind> for IdwError
{
    fn from(value: kdtree::ErrorKind) -> Self {
        match value
        {
            kdtree::ErrorKind::WrongDimension => IdwError::InvalidDimension,
            kdtree::ErrorKind::NonFiniteCoordinate => IdwError::NonFiniteCoordinate,
            kdtree::ErrorKind::ZeroCapacity => IdwError::KdTreeError,
        }
    }
}
