use crate::domain::model::{ImageMode, SourceTables, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn listing_path(&self) -> &str;
    fn pricing_path(&self) -> &str;
    fn image_dir(&self) -> &str;
    fn output_path(&self) -> &str;
    /// Leading rows discarded before the listing's header row.
    fn skip_leading_rows(&self) -> usize;
    fn image_mode(&self) -> ImageMode;
    fn image_base_url(&self) -> Option<&str>;
    fn placeholder_image(&self) -> &str;
    fn image_extensions(&self) -> &[String];
    fn min_card_width(&self) -> u32;
}

/// Existence capability for image candidate probing. The default adapter asks
/// the filesystem; tests substitute a fixed set.
pub trait ImageProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceTables>;
    async fn transform(&self, tables: SourceTables) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
