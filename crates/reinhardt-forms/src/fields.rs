pub mod char_field;
pub mod choice_field;
pub mod integer_field;

pub use char_field::CharField;
pub use choice_field::{ChoiceField, EMPTY_LABEL, NullBooleanField};
pub use integer_field::IntegerField;
