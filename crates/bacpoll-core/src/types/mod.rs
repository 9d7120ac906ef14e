pub mod object_id;
pub mod object_type;
pub mod property;
pub mod value;

pub use object_id::ObjectId;
pub use object_type::{ObjectType, ParseObjectTypeError};
pub use property::PropertySpec;
pub use value::{DecodedSample, PresentValue};
