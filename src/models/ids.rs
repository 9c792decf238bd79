//! Typed identifiers for engine entities.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw identifier.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifies a user in the external user directory.
    UserId
);
entity_id!(
    /// Identifies an attendance record.
    AttendanceId
);
entity_id!(
    /// Identifies an overtime request.
    OvertimeId
);
entity_id!(
    /// Identifies a reimbursement request.
    ReimbursementId
);
entity_id!(
    /// Identifies a payroll period.
    PayrollId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&UserId::new(17)).unwrap();
        assert_eq!(json, "17");

        let id: PayrollId = serde_json::from_str("3").unwrap();
        assert_eq!(id, PayrollId::new(3));
    }

    #[test]
    fn test_ids_display_raw_value() {
        assert_eq!(OvertimeId::new(5).to_string(), "5");
        assert_eq!(u64::from(ReimbursementId::from(9)), 9);
    }
}
