use crate::domain::model::ImageMode;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{
    self, validate_image_extensions, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineInfo,
    pub input: InputConfig,
    pub images: ImagesConfig,
    pub render: Option<RenderConfig>,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub listing: String,
    pub pricing: String,
    #[serde(default = "default_skip_leading_rows")]
    pub skip_leading_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    pub dir: String,
    pub mode: ImageMode,
    pub base_url: Option<String>,
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub min_card_width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_skip_leading_rows() -> usize {
    1
}

fn default_placeholder() -> String {
    "placeholder.jpg".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["jpg".to_string(), "png".to_string()]
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CatalogError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${IMAGE_BASE_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_path("input.listing", &self.input.listing)?;
        validate_path("input.pricing", &self.input.pricing)?;
        validate_path("images.dir", &self.images.dir)?;
        validate_path("load.output_path", &self.load.output_path)?;
        validate_image_extensions("images.extensions", &self.images.extensions)?;
        validate_range("render.min_card_width", self.min_card_width(), 120, 1000)?;

        if self.images.mode == ImageMode::Remote {
            match &self.images.base_url {
                Some(url) => validation::validate_url("images.base_url", url)?,
                None => {
                    return Err(CatalogError::MissingConfigError {
                        field: "images.base_url".to_string(),
                    })
                }
            }
        }

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn min_card_width(&self) -> u32 {
        self.render
            .as_ref()
            .and_then(|r| r.min_card_width)
            .unwrap_or(240)
    }
}

impl ConfigProvider for TomlConfig {
    fn listing_path(&self) -> &str {
        &self.input.listing
    }

    fn pricing_path(&self) -> &str {
        &self.input.pricing
    }

    fn image_dir(&self) -> &str {
        &self.images.dir
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn skip_leading_rows(&self) -> usize {
        self.input.skip_leading_rows
    }

    fn image_mode(&self) -> ImageMode {
        self.images.mode
    }

    fn image_base_url(&self) -> Option<&str> {
        self.images.base_url.as_deref()
    }

    fn placeholder_image(&self) -> &str {
        &self.images.placeholder
    }

    fn image_extensions(&self) -> &[String] {
        &self.images.extensions
    }

    fn min_card_width(&self) -> u32 {
        self.min_card_width()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
