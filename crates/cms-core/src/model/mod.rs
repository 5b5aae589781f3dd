pub mod record;
pub mod value;

pub use record::{ChildCollection, Record, Translation, TranslationSet};
pub use value::FieldValue;
