use crate::asset::ImageAsset;

/// Rejections for uploaded image parts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Only image files are allowed (got content type '{0}')")]
    InvalidContentType(String),

    #[error("Empty file")]
    EmptyFile,
}

/// Checks applied to every uploaded image part before any decoding happens
#[derive(Debug, Clone, Copy)]
pub struct UploadValidator {
    max_file_size: usize,
}

impl UploadValidator {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Only the media type is checked; parameters after `;` are ignored.
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if !essence.starts_with("image/") || essence.len() == "image/".len() {
            return Err(ValidationError::InvalidContentType(content_type.to_string()));
        }

        Ok(())
    }

    pub fn validate(&self, asset: &ImageAsset) -> Result<(), ValidationError> {
        self.validate_content_type(&asset.content_type)?;
        self.validate_file_size(asset.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> UploadValidator {
        UploadValidator::new(1024)
    }

    #[test]
    fn test_validate_file_size() {
        let v = validator();
        assert!(v.validate_file_size(1).is_ok());
        assert!(v.validate_file_size(1024).is_ok());
        assert_eq!(v.validate_file_size(0), Err(ValidationError::EmptyFile));
        assert_eq!(
            v.validate_file_size(1025),
            Err(ValidationError::FileTooLarge {
                size: 1025,
                max: 1024
            })
        );
    }

    #[test]
    fn test_validate_content_type() {
        let v = validator();
        for ok in ["image/png", "image/jpeg", "IMAGE/WEBP", "image/svg+xml; charset=utf-8"] {
            assert!(v.validate_content_type(ok).is_ok(), "{ok}");
        }
        for bad in ["text/plain", "application/octet-stream", "", "image/", "imagefoo/png"] {
            assert!(v.validate_content_type(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_validate_asset_checks_type_first() {
        let asset = ImageAsset::new(Vec::new(), "text/plain");
        assert_eq!(
            validator().validate(&asset),
            Err(ValidationError::InvalidContentType("text/plain".to_string()))
        );
    }
}
