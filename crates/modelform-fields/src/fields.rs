// Scalar widgets
pub mod base;
pub mod choice_field;
pub mod input_field;
pub mod number_field;
pub mod time_field;

// Composite fields
pub mod array_field;
pub mod composite_field;

pub use base::ScalarValue;
pub use choice_field::ChoiceField;
pub use input_field::InputField;
pub use number_field::NumberField;
pub use time_field::TimeField;

pub use array_field::ArrayField;
pub use composite_field::{CompositeField, CompositeMode};
