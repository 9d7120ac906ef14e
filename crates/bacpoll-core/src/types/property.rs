use alloc::string::String;

use crate::types::{ObjectId, ObjectType};
use crate::EncodeError;

/// One polled present-value: a user-facing name and the object it lives on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: String,
    pub object_id: ObjectId,
}

impl PropertySpec {
    /// Builds a spec, refusing instance numbers wider than 22 bits and object
    /// types wider than 10 bits.
    pub fn new(
        name: impl Into<String>,
        object_type: ObjectType,
        instance: u32,
    ) -> Result<Self, EncodeError> {
        Ok(Self {
            name: name.into(),
            object_id: ObjectId::checked(object_type, instance)?,
        })
    }

    pub const fn object_type(&self) -> ObjectType {
        self.object_id.object_type()
    }

    pub const fn instance(&self) -> u32 {
        self.object_id.instance()
    }
}

#[cfg(test)]
mod tests {
    use super::PropertySpec;
    use crate::types::ObjectType;
    use crate::EncodeError;

    #[test]
    fn validates_field_widths() {
        let p = PropertySpec::new("A001", ObjectType::AnalogValue, 1).unwrap();
        assert_eq!(p.instance(), 1);
        assert_eq!(p.object_type(), ObjectType::AnalogValue);
        assert_eq!(
            PropertySpec::new("big", ObjectType::AnalogValue, 1 << 22).unwrap_err(),
            EncodeError::ValueOutOfRange
        );
    }
}
