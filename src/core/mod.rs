pub mod aggregate;
pub mod etl;
pub mod images;
pub mod pipeline;
pub mod pricing;
pub mod render;

pub use crate::domain::model::{
    AggregatedProduct, ImageMode, ItemColorKey, PricingEntry, Record, SourceTables,
    TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, ImageProbe, Pipeline, Storage};
pub use crate::utils::error::Result;
