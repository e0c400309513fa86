pub mod columns;
pub mod config;
pub mod cronjob;
pub mod generic;
pub mod object;
pub mod quantity;
pub mod registry;
pub mod render;
pub mod resource_quota;
pub mod schema;
pub mod simple_app;
pub mod workspace;

pub use columns::{
    ApiResource, CellMetadata, ColumnBinding, HeaderBinding, LinkContext, ObjectItem, PrefixFamily,
};
pub use quantity::{
    QuantityError, RelativeTime, ScaledValue, Scalar, TimeUnit, format_with_binary_prefix,
    format_with_decimal_prefix, parse_quantity, ratio, relative_time,
};
pub use registry::{AttributeMapping, AttributeValue, KindAdapter, RAW_ATTRIBUTE, Registry};
pub use schema::{DataSchema, UiSchema, default_data_schema, default_ui_schema};
