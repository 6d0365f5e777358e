/// Serialization format options for interpolator data.
///
/// Each format has both compressed (Lz4) and uncompressed variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SerializationFormat {
    /// Bincode format - compact binary
    Bincode,
    /// Bincode format with LZ4 compression (default, best balance of size and speed)
    #[default]
    BincodeLz4,
}

impl SerializationFormat {
    /// Returns true if this format uses LZ4 compression
    pub fn is_compressed(&self) -> bool {
        matches!(self, SerializationFormat::BincodeLz4)
    }
}

use crate::errors::IdwError;
use serde::{de::DeserializeOwned, Serialize};

/// Serialize data to bytes using the specified format.
/// Applies LZ4 compression if the format variant ends with Lz4.
pub fn serialize<T: Serialize>(data: &T, format: SerializationFormat) -> Result<Vec<u8>, IdwError> {
    let bytes = bincode::serde::encode_to_vec(data, bincode::config::standard())
        .map_err(|_| IdwError::SerializationFailed)?;
    if format.is_compressed() {
        Ok(lz4_flex::compress_prepend_size(&bytes))
    } else {
        Ok(bytes)
    }
}

/// Deserialize data from bytes using the specified format.
/// Applies LZ4 decompression if the format variant ends with Lz4.
pub fn deserialize<T: DeserializeOwned>(data: &[u8], format: SerializationFormat) -> Result<T, IdwError> {
    let decoded = if format.is_compressed() {
        let decompressed = lz4_flex::decompress_size_prepended(data)
            .map_err(|_| IdwError::LZ4DecompressionFailed)?;
        bincode::serde::decode_from_slice(&decompressed, bincode::config::standard())
    } else {
        bincode::serde::decode_from_slice(data, bincode::config::standard())
    };
    decoded.map(|(value, _)| value).map_err(|_| IdwError::DeserializationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
    struct TestData {
        values: Vec<f64>,
        name: String,
    }

    #[test]
    fn test_bincode_roundtrip() {
        let data = TestData {
            values: vec![1.0, 2.0, 3.0],
            name: "test".to_string(),
        };

        let bytes = serialize(&data, SerializationFormat::Bincode).unwrap();
        let result: TestData = deserialize(&bytes, SerializationFormat::Bincode).unwrap();
        assert_eq!(data, result);
    }

    #[test]
    fn test_bincode_lz4_roundtrip() {
        let data = TestData {
            values: vec![1.0, 2.0, 3.0, 4.0, 5.0],
            name: "compressed_test".to_string(),
        };

        let bytes = serialize(&data, SerializationFormat::BincodeLz4).unwrap();
        let result: TestData = deserialize(&bytes, SerializationFormat::BincodeLz4).unwrap();
        assert_eq!(data, result);
    }

    #[test]
    fn test_corrupt_lz4_buffer() {
        let result: Result<TestData, _> = deserialize(&[1, 2, 3], SerializationFormat::BincodeLz4);
        assert!(result.is_err());
    }
}
