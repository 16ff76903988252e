use bytes::Bytes;

/// An uploaded or generated image buffer with its declared MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub data: Bytes,
    pub content_type: String,
}

impl ImageAsset {
    pub fn new(data: impl Into<Bytes>, content_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
        }
    }

    pub fn png(data: impl Into<Bytes>) -> Self {
        Self::new(data, "image/png")
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
