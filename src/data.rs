//! Serialized pixel payloads.
//!
//! When a layer's surface is rasterized the client hands the result over as a
//! string - in practice a `data:<mime>;base64,....` URL, but the registry
//! stores whatever it is given and never inspects it. [`ImageData::decode`]
//! is for the consumers (export, thumbnailing) that *do* want the bytes back.

use base64::Engine;

/// One layer's serialized image contents, stored verbatim.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ImageData(String);

impl ImageData {
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// The mime type from the data URL header, if there is one.
    #[must_use]
    pub fn mime(&self) -> Option<&str> {
        let rest = self.0.strip_prefix("data:")?;
        let header = rest.split_once(',')?.0;
        // The mime ends at the first parameter (";base64", ";charset=..").
        Some(header.split(';').next().unwrap_or(header))
    }
    /// Decode the payload back into raw bytes.
    ///
    /// Accepts both a full `data:` URL and a bare base64 string.
    pub fn decode(&self) -> Result<Vec<u8>, DataError> {
        let encoded = match self.0.strip_prefix("data:") {
            Some(rest) => {
                let (header, body) = rest.split_once(',').ok_or(DataError::MalformedUrl)?;
                if !header.ends_with(";base64") {
                    return Err(DataError::NotBase64);
                }
                body
            }
            None => self.0.as_str(),
        };
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(DataError::Decode)
    }
}
impl From<String> for ImageData {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("data URL has no comma separating header from body")]
    MalformedUrl,
    #[error("data URL payload is not base64 encoded")]
    NotBase64,
    #[error("base64 decode failed: {}", .0)]
    Decode(#[from] base64::DecodeError),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decodes_data_url() {
        let data = ImageData::new("data:image/png;base64,aGVsbG8=");
        assert_eq!(data.mime(), Some("image/png"));
        assert_eq!(data.decode().unwrap(), b"hello");
    }
    #[test]
    fn decodes_bare_base64() {
        let data = ImageData::new("aGVsbG8=");
        assert_eq!(data.mime(), None);
        assert_eq!(data.decode().unwrap(), b"hello");
    }
    #[test]
    fn rejects_non_base64_url() {
        let data = ImageData::new("data:text/plain,hello");
        assert!(matches!(data.decode(), Err(DataError::NotBase64)));
    }
    #[test]
    fn rejects_headerless_url() {
        let data = ImageData::new("data:image/png;base64");
        assert!(matches!(data.decode(), Err(DataError::MalformedUrl)));
    }
}
