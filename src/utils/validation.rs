use crate::utils::error::{CatalogError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CatalogError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_image_extensions(field_name: &str, extensions: &[String]) -> Result<()> {
    let allowed: HashSet<&str> = ["jpg", "jpeg", "png", "webp"].into_iter().collect();

    if extensions.is_empty() {
        return Err(CatalogError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for ext in extensions {
        if !allowed.contains(ext.as_str()) {
            return Err(CatalogError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: ext.clone(),
                reason: format!(
                    "Unsupported image extension. Allowed extensions: {}",
                    allowed.iter().copied().collect::<Vec<_>>().join(", ")
                ),
            });
        }
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(CatalogError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("base_url", "https://example.com").is_ok());
        assert!(validate_url("base_url", "http://example.com").is_ok());
        assert!(validate_url("base_url", "").is_err());
        assert!(validate_url("base_url", "invalid-url").is_err());
        assert!(validate_url("base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("listing_path", "data/MDList.csv").is_ok());
        assert!(validate_path("listing_path", "").is_err());
        assert!(validate_path("listing_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_image_extensions() {
        let exts = vec!["jpg".to_string(), "png".to_string()];
        assert!(validate_image_extensions("extensions", &exts).is_ok());

        let invalid = vec!["bmp".to_string()];
        assert!(validate_image_extensions("extensions", &invalid).is_err());
        assert!(validate_image_extensions("extensions", &[]).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("min_card_width", 240u32, 120, 1000).is_ok());
        assert!(validate_range("min_card_width", 50u32, 120, 1000).is_err());
    }
}
