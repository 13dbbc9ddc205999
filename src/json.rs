//! JSON text encoding for host types, alongside the binary codec.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PackError;

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, PackError> {
    Ok(serde_json::to_string(value)?)
}

pub fn to_json_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, PackError> {
    Ok(serde_json::to_vec(value)?)
}

pub fn from_json<T: DeserializeOwned>(text: &str) -> Result<T, PackError> {
    Ok(serde_json::from_str(text)?)
}

pub fn from_json_bytes<T: DeserializeOwned>(data: &[u8]) -> Result<T, PackError> {
    Ok(serde_json::from_slice(data)?)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Nested {
        value: i32,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        text: String,
        long: i64,
        bytes: Vec<u8>,
        nested: Nested,
    }

    fn sample() -> Sample {
        Sample {
            text: "Lorem ipsum".into(),
            long: 123_123,
            bytes: b"Lorem".to_vec(),
            nested: Nested { value: 10 },
        }
    }

    #[test]
    fn text_round_trip() {
        let text = to_json(&sample()).unwrap();
        assert!(text.contains("\"long\":123123"));
        assert_eq!(from_json::<Sample>(&text).unwrap(), sample());
    }

    #[test]
    fn bytes_round_trip() {
        let data = to_json_bytes(&sample()).unwrap();
        assert_eq!(from_json_bytes::<Sample>(&data).unwrap(), sample());
    }

    #[test]
    fn malformed_json() {
        let err = from_json::<Sample>("{\"text\":").unwrap_err();
        assert!(matches!(err, PackError::Json(_)));
    }
}
