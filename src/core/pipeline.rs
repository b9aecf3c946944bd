use crate::core::aggregate::aggregate_products;
use crate::core::images::ImageResolver;
use crate::core::pricing::PricingLookup;
use crate::core::render::{render_card, render_page};
use crate::core::{ConfigProvider, ImageMode, Pipeline, Record, SourceTables, Storage, TransformResult};
use crate::utils::error::Result;

pub struct CatalogPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CatalogPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    /// 把已解析的圖檔名轉成輸出文件中的引用
    fn image_reference(&self, resolved: Option<&str>) -> Option<String> {
        match self.config.image_mode() {
            ImageMode::Remote => {
                let base = self
                    .config
                    .image_base_url()
                    .unwrap_or_default()
                    .trim_end_matches('/');
                // 沒有圖片時使用佔位圖
                let name = resolved.unwrap_or_else(|| self.config.placeholder_image());
                Some(format!("{}/{}", base, name))
            }
            ImageMode::Local => resolved
                .map(|name| format!("{}/{}", self.config.image_dir().trim_end_matches('/'), name)),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CatalogPipeline<S, C> {
    async fn extract(&self) -> Result<SourceTables> {
        tracing::debug!("Reading listing table from: {}", self.config.listing_path());
        let listing_bytes = self.storage.read_file(self.config.listing_path()).await?;
        let listing = parse_table(&listing_bytes, self.config.skip_leading_rows())?;
        tracing::debug!("Listing table: {} rows", listing.len());

        tracing::debug!("Reading pricing table from: {}", self.config.pricing_path());
        let pricing_bytes = self.storage.read_file(self.config.pricing_path()).await?;
        let pricing = parse_table(&pricing_bytes, 0)?;
        tracing::debug!("Pricing table: {} rows", pricing.len());

        Ok(SourceTables { listing, pricing })
    }

    async fn transform(&self, tables: SourceTables) -> Result<TransformResult> {
        let products = aggregate_products(&tables.listing);
        tracing::info!("Aggregated {} product-color groups", products.len());

        let pricing = PricingLookup::from_records(&tables.pricing);
        let resolver =
            ImageResolver::new(self.config.image_dir(), self.config.image_extensions());

        // 每個商品各自查圖片、顏色與零售價，缺漏只影響該卡片
        let cards = products
            .iter()
            .map(|product| {
                let resolved = resolver.resolve(&product.key);
                if resolved.is_none() {
                    tracing::debug!("No image found for {}", product.key);
                }
                let image_ref = self.image_reference(resolved.as_deref());
                let color_name = pricing
                    .resolve_color_name(product.key.color_suffix())
                    .filter(|c| !c.is_empty());
                let retail_price = pricing.resolve_retail_price(product.key.as_str());

                render_card(product, image_ref.as_deref(), color_name, retail_price)
            })
            .collect();

        Ok(TransformResult { products, cards })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let page = render_page(&result.cards, self.config.min_card_width());

        tracing::debug!("Writing catalog page ({} bytes)", page.len());
        self.storage
            .write_file(self.config.output_path(), page.as_bytes())
            .await?;

        Ok(self.config.output_path().to_string())
    }
}

/// Parse delimited text into normalized records: the first row after any
/// skipped leading rows supplies the headers (trimmed, lowercased); every
/// later row zips against them, so short rows simply lack trailing fields.
fn parse_table(data: &[u8], skip_leading_rows: usize) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows = reader.records();
    for _ in 0..skip_leading_rows {
        match rows.next() {
            Some(row) => {
                row?;
            }
            None => return Ok(Vec::new()),
        }
    }

    let headers: Vec<String> = match rows.next() {
        Some(row) => row?
            .iter()
            .map(|name| name.trim().to_ascii_lowercase())
            .collect(),
        None => return Ok(Vec::new()),
    };
    tracing::debug!("Normalized column names: {:?}", headers);

    let mut records = Vec::new();
    for row in rows {
        let row = row?;
        let fields = headers
            .iter()
            .cloned()
            .zip(row.iter().map(|value| value.trim().to_string()))
            .collect();
        records.push(Record::new(fields));
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CatalogError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        async fn get(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                CatalogError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        image_mode: ImageMode,
        base_url: Option<String>,
        image_dir: String,
        extensions: Vec<String>,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                image_mode: ImageMode::Local,
                base_url: None,
                image_dir: "no-such-image-dir".to_string(),
                extensions: vec!["jpg".to_string(), "png".to_string()],
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn listing_path(&self) -> &str {
            "MDList.csv"
        }
        fn pricing_path(&self) -> &str {
            "pricing.csv"
        }
        fn image_dir(&self) -> &str {
            &self.image_dir
        }
        fn output_path(&self) -> &str {
            "index.html"
        }
        fn skip_leading_rows(&self) -> usize {
            1
        }
        fn image_mode(&self) -> ImageMode {
            self.image_mode
        }
        fn image_base_url(&self) -> Option<&str> {
            self.base_url.as_deref()
        }
        fn placeholder_image(&self) -> &str {
            "placeholder.jpg"
        }
        fn image_extensions(&self) -> &[String] {
            &self.extensions
        }
        fn min_card_width(&self) -> u32 {
            240
        }
    }

    const LISTING: &str = "Table 1\n\
        ItemColorKey , ItemModel,OutletFullPrice,Discount,FinalOutletPrice,Size,Woodbury\n\
        AB12345678RED,Jacket,100,20%,80,\"S,M\",1\n\
        AB12345678RED,Jacket,100,20%,80,L,1\n\
        XY99999999BLU,Scarf,40,10%,36,OS,0\n";

    const PRICING: &str = "ItemColorKey,Color,RetailFP\n\
        AB12345678RED,Crimson,\"$150.00\"\n";

    async fn storage_with_inputs() -> MockStorage {
        let storage = MockStorage::new();
        storage.put("MDList.csv", LISTING).await;
        storage.put("pricing.csv", PRICING).await;
        storage
    }

    #[tokio::test]
    async fn extract_normalizes_headers_and_skips_title_row() {
        let storage = storage_with_inputs().await;
        let pipeline = CatalogPipeline::new(storage, TestConfig::default());

        let tables = pipeline.extract().await.unwrap();
        assert_eq!(tables.listing.len(), 3);
        assert_eq!(tables.pricing.len(), 1);
        assert_eq!(tables.listing[0].get("itemcolorkey"), Some("AB12345678RED"));
        assert_eq!(tables.listing[0].get("itemmodel"), Some("Jacket"));
    }

    #[tokio::test]
    async fn extract_fails_when_listing_is_missing() {
        let storage = MockStorage::new();
        storage.put("pricing.csv", PRICING).await;
        let pipeline = CatalogPipeline::new(storage, TestConfig::default());

        assert!(pipeline.extract().await.is_err());
    }

    #[tokio::test]
    async fn transform_joins_pricing_and_drops_woodbury_zero() {
        let storage = storage_with_inputs().await;
        let pipeline = CatalogPipeline::new(storage, TestConfig::default());

        let tables = pipeline.extract().await.unwrap();
        let result = pipeline.transform(tables).await.unwrap();

        assert_eq!(result.products.len(), 1);
        assert_eq!(result.products[0].sizes, "L, M, S");
        assert!(result.cards[0].contains("<p>Color: Crimson</p>"));
        assert!(result.cards[0].contains("<p>Retail Price: 150.00</p>"));
        // Local mode with no image on disk: element omitted.
        assert!(!result.cards[0].contains("<img"));
    }

    #[tokio::test]
    async fn remote_mode_substitutes_placeholder() {
        let storage = storage_with_inputs().await;
        let config = TestConfig {
            image_mode: ImageMode::Remote,
            base_url: Some("https://cdn.example.com/images".to_string()),
            ..TestConfig::default()
        };
        let pipeline = CatalogPipeline::new(storage, config);

        let tables = pipeline.extract().await.unwrap();
        let result = pipeline.transform(tables).await.unwrap();
        assert!(result.cards[0]
            .contains("<img src='https://cdn.example.com/images/placeholder.jpg'"));
    }

    #[tokio::test]
    async fn load_writes_the_assembled_page() {
        let storage = storage_with_inputs().await;
        let pipeline = CatalogPipeline::new(storage.clone(), TestConfig::default());

        let tables = pipeline.extract().await.unwrap();
        let result = pipeline.transform(tables).await.unwrap();
        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "index.html");
        let page = String::from_utf8(storage.get("index.html").await.unwrap()).unwrap();
        assert!(page.contains("product-grid"));
        assert!(page.contains("<p>AB12345678 - RED</p>"));
    }

    #[test]
    fn parse_table_tolerates_short_rows() {
        let data = b"A,B,C\n1,2\n";
        let records = parse_table(data, 0).unwrap();
        assert_eq!(records[0].get("a"), Some("1"));
        assert_eq!(records[0].get("b"), Some("2"));
        assert_eq!(records[0].get("c"), None);
    }

    #[test]
    fn parse_table_of_empty_input_is_empty() {
        assert!(parse_table(b"", 0).unwrap().is_empty());
        assert!(parse_table(b"Table 1\n", 1).unwrap().is_empty());
    }
}
