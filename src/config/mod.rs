pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::ImageMode;
#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::{CatalogError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_image_extensions, validate_path, validate_range, validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "outlet-catalog")]
#[command(about = "Generates a static product-card catalog from listing and pricing tables")]
pub struct CliConfig {
    #[arg(long, default_value = "MDList.csv")]
    pub listing_path: String,

    #[arg(long, default_value = "pricing.csv")]
    pub pricing_path: String,

    #[arg(long, default_value = "images")]
    pub image_dir: String,

    #[arg(long, default_value = "index.html")]
    pub output_path: String,

    #[arg(
        long,
        default_value = "1",
        help = "Leading rows discarded before the listing header row"
    )]
    pub skip_leading_rows: usize,

    #[arg(long, value_enum, default_value = "local")]
    pub image_mode: ImageMode,

    #[arg(long, help = "Base URL for image references in remote mode")]
    pub base_url: Option<String>,

    #[arg(long, default_value = "placeholder.jpg")]
    pub placeholder_image: String,

    #[arg(long, value_delimiter = ',', default_value = "jpg,png")]
    pub extensions: Vec<String>,

    #[arg(long, default_value = "240")]
    pub min_card_width: u32,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process stats after the run")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("listing_path", &self.listing_path)?;
        validate_path("pricing_path", &self.pricing_path)?;
        validate_path("image_dir", &self.image_dir)?;
        validate_path("output_path", &self.output_path)?;
        validate_image_extensions("extensions", &self.extensions)?;
        validate_range("min_card_width", self.min_card_width, 120, 1000)?;

        if self.image_mode == ImageMode::Remote {
            match &self.base_url {
                Some(url) => validate_url("base_url", url)?,
                None => {
                    return Err(CatalogError::MissingConfigError {
                        field: "base_url".to_string(),
                    })
                }
            }
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn listing_path(&self) -> &str {
        &self.listing_path
    }

    fn pricing_path(&self) -> &str {
        &self.pricing_path
    }

    fn image_dir(&self) -> &str {
        &self.image_dir
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn skip_leading_rows(&self) -> usize {
        self.skip_leading_rows
    }

    fn image_mode(&self) -> ImageMode {
        self.image_mode
    }

    fn image_base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn placeholder_image(&self) -> &str {
        &self.placeholder_image
    }

    fn image_extensions(&self) -> &[String] {
        &self.extensions
    }

    fn min_card_width(&self) -> u32 {
        self.min_card_width
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig::parse_from(["outlet-catalog"])
    }

    #[test]
    fn defaults_are_valid() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn remote_mode_requires_a_base_url() {
        let mut config = base_config();
        config.image_mode = ImageMode::Remote;
        assert!(config.validate().is_err());

        config.base_url = Some("https://cdn.example.com/images".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn extensions_flag_splits_on_commas() {
        let config =
            CliConfig::parse_from(["outlet-catalog", "--extensions", "png,webp"]);
        assert_eq!(config.extensions, vec!["png", "webp"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unreasonable_card_width_is_rejected() {
        let mut config = base_config();
        config.min_card_width = 10;
        assert!(config.validate().is_err());
    }
}
