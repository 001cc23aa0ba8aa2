mod attribute;
mod types;
mod value;

pub use attribute::Attribute;
pub use types::AttributeType;
pub use value::{CustomValue, Value};
