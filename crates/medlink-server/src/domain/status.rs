//! Closed status enumerations for medications and requests.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Error returned when a status string is not one of the known variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid status {value:?}, expected one of: {expected}")]
pub struct StatusParseError {
    pub value: String,
    pub expected: String,
}

macro_rules! status_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = StatusParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(StatusParseError {
                        value: s.to_string(),
                        expected: Self::ALL
                            .iter()
                            .map(|status| status.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                }
            }
        }
    };
}

status_enum! {
    /// Lifecycle of a listed medication, from listing to delivery.
    MedicationStatus {
        Available => "available",
        Reserved => "reserved",
        Pending => "pending",
        Approved => "approved",
        Shipped => "shipped",
        InTransit => "in_transit",
        Delivered => "delivered",
        Rejected => "rejected",
        Expired => "expired",
    }
}

status_enum! {
    /// Review state of a recipient organization's request.
    RequestStatus {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
        Fulfilled => "fulfilled",
        Cancelled => "cancelled",
    }
}

impl Default for MedicationStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl Default for RequestStatus {
    fn default() -> Self {
        Self::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&MedicationStatus::InTransit).unwrap();
        assert_eq!(json, "\"in_transit\"");

        let parsed: RequestStatus = serde_json::from_str("\"fulfilled\"").unwrap();
        assert_eq!(parsed, RequestStatus::Fulfilled);
    }

    #[test]
    fn test_from_str_matches_serde_names() {
        for status in MedicationStatus::ALL {
            let json = serde_json::to_string(status).unwrap();
            assert_eq!(json.trim_matches('"'), status.as_str());
            assert_eq!(status.as_str().parse::<MedicationStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn test_unknown_status_lists_expected_values() {
        let err = "lost".parse::<RequestStatus>().unwrap_err();
        assert_eq!(err.value, "lost");
        assert_eq!(err.expected, "pending, approved, rejected, fulfilled, cancelled");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(MedicationStatus::default(), MedicationStatus::Available);
        assert_eq!(RequestStatus::default(), RequestStatus::Pending);
    }
}
