use crate::types::object_type::MAX_OBJECT_TYPE;
use crate::types::ObjectType;
use crate::EncodeError;

/// Highest instance number that fits the 22-bit field of an object identifier.
pub const MAX_INSTANCE: u32 = 0x3F_FFFF;

/// A packed BACnet object identifier combining an [`ObjectType`] and a 22-bit
/// instance number into a single `u32`.
///
/// The upper 10 bits encode the object type and the lower 22 bits encode the
/// instance number, matching the BACnet wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(u32);

impl ObjectId {
    /// Creates an `ObjectId`, masking both fields to their wire width.
    pub const fn new(object_type: ObjectType, instance: u32) -> Self {
        Self((((object_type.to_u16() as u32) & 0x03FF) << 22) | (instance & MAX_INSTANCE))
    }

    /// Creates an `ObjectId`, refusing fields wider than the wire allows.
    pub const fn checked(object_type: ObjectType, instance: u32) -> Result<Self, EncodeError> {
        if object_type.to_u16() > MAX_OBJECT_TYPE || instance > MAX_INSTANCE {
            return Err(EncodeError::ValueOutOfRange);
        }
        Ok(Self::new(object_type, instance))
    }

    /// Returns the raw packed `u32` representation.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Constructs an `ObjectId` from a pre-packed `u32`.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw 10-bit object type number.
    pub const fn type_number(self) -> u16 {
        (self.0 >> 22) as u16
    }

    /// Extracts the [`ObjectType`] from the upper 10 bits.
    pub const fn object_type(self) -> ObjectType {
        ObjectType::from_u16(self.type_number())
    }

    /// Extracts the 22-bit instance number.
    pub const fn instance(self) -> u32 {
        self.0 & MAX_INSTANCE
    }
}

impl core::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.object_type(), self.instance())
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectId;
    use crate::types::ObjectType;
    use crate::EncodeError;

    #[test]
    fn encodes_object_id() {
        let id = ObjectId::new(ObjectType::AnalogValue, 1);
        assert_eq!(id.raw(), 0x0080_0001);
        assert_eq!(id.object_type(), ObjectType::AnalogValue);
        assert_eq!(id.instance(), 1);
        assert_eq!(id.to_string(), "analog-value:1");
    }

    #[test]
    fn checked_rejects_wide_fields() {
        assert_eq!(
            ObjectId::checked(ObjectType::AnalogValue, 0x40_0000),
            Err(EncodeError::ValueOutOfRange)
        );
        assert_eq!(
            ObjectId::checked(ObjectType::Other(1024), 1),
            Err(EncodeError::ValueOutOfRange)
        );
        assert_eq!(
            ObjectId::checked(ObjectType::Other(1023), 0x3F_FFFF).map(ObjectId::raw),
            Ok(u32::MAX)
        );
    }
}
