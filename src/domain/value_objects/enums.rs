//! # Domain Enums
//!
//! Enumeration types for domain concepts.
//!
//! - [`VehicleCategory`] - Pricing category of a vehicle
//! - [`SellerStatus`] - Roster status of a seller
//! - [`DistributionMethod`] - How incoming leads are distributed
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vehicle category used to select a pricing table.
///
/// # Examples
///
/// ```
/// use lead_desk::domain::value_objects::enums::VehicleCategory;
///
/// let cat: VehicleCategory = "motorcycle".parse().unwrap();
/// assert_eq!(cat, VehicleCategory::Motorcycle);
/// assert_eq!(cat.to_string(), "MOTORCYCLE");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum VehicleCategory {
    /// Ordinary passenger cars.
    Standard = 0,
    /// Special or premium vehicles (imported, high value).
    Special = 1,
    /// Utility vehicles (pickups, vans).
    Utility = 2,
    /// Motorcycles.
    Motorcycle = 3,
}

impl VehicleCategory {
    /// All categories, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Standard,
        Self::Special,
        Self::Utility,
        Self::Motorcycle,
    ];
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Standard => "STANDARD",
            Self::Special => "SPECIAL",
            Self::Utility => "UTILITY",
            Self::Motorcycle => "MOTORCYCLE",
        };
        f.write_str(s)
    }
}

impl FromStr for VehicleCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STANDARD" | "CARRO" => Ok(Self::Standard),
            "SPECIAL" | "PREMIUM" | "ESPECIAL" => Ok(Self::Special),
            "UTILITY" | "UTILITARIO" => Ok(Self::Utility),
            "MOTORCYCLE" | "MOTO" => Ok(Self::Motorcycle),
            _ => Err(ParseEnumError::InvalidValue("VehicleCategory", s.to_string())),
        }
    }
}

/// Roster status of a seller.
///
/// Only [`SellerStatus::Active`] sellers take part in distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum SellerStatus {
    /// Working and available.
    #[default]
    Active = 0,
    /// Disabled in the roster.
    Inactive = 1,
    /// Temporarily away (vacation, leave).
    OnLeave = 2,
}

impl SellerStatus {
    /// Returns true if the seller can receive leads.
    #[inline]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for SellerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::OnLeave => "ON_LEAVE",
        };
        f.write_str(s)
    }
}

impl FromStr for SellerStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "ON_LEAVE" | "ONLEAVE" => Ok(Self::OnLeave),
            _ => Err(ParseEnumError::InvalidValue("SellerStatus", s.to_string())),
        }
    }
}

/// Lead distribution method.
///
/// Each method is a comparator applied before the recency tie-break; see
/// [`crate::domain::services::seller_selector`].
///
/// # Examples
///
/// ```
/// use lead_desk::domain::value_objects::enums::DistributionMethod;
///
/// assert_eq!("load-balanced".parse::<DistributionMethod>().unwrap(), DistributionMethod::LoadBalanced);
/// assert!("random".parse::<DistributionMethod>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DistributionMethod {
    /// Strict round-robin by last assignment time.
    #[default]
    Sequential,
    /// Fewest pending leads first.
    LoadBalanced,
    /// Highest conversion rate first.
    Performance,
    /// Fastest average response first.
    Speed,
}

impl DistributionMethod {
    /// Returns the configuration name of this method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::LoadBalanced => "load_balanced",
            Self::Performance => "performance",
            Self::Speed => "speed",
        }
    }
}

impl fmt::Display for DistributionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionMethod {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sequential" | "round_robin" => Ok(Self::Sequential),
            "load_balanced" | "load_balance" => Ok(Self::LoadBalanced),
            "performance" => Ok(Self::Performance),
            "speed" => Ok(Self::Speed),
            _ => Err(ParseEnumError::InvalidValue(
                "DistributionMethod",
                s.to_string(),
            )),
        }
    }
}

impl TryFrom<String> for DistributionMethod {
    type Error = ParseEnumError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DistributionMethod> for String {
    fn from(method: DistributionMethod) -> Self {
        method.as_str().to_string()
    }
}

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided string value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod vehicle_category {
        use super::*;

        #[test]
        fn from_str_accepts_local_names() {
            assert_eq!("moto".parse::<VehicleCategory>().unwrap(), VehicleCategory::Motorcycle);
            assert_eq!("Premium".parse::<VehicleCategory>().unwrap(), VehicleCategory::Special);
            assert_eq!("utilitario".parse::<VehicleCategory>().unwrap(), VehicleCategory::Utility);
        }

        #[test]
        fn from_str_invalid() {
            let err = "truck".parse::<VehicleCategory>().unwrap_err();
            assert_eq!(err.to_string(), "invalid VehicleCategory value: 'truck'");
        }

        #[test]
        fn serde_roundtrip() {
            let json = serde_json::to_string(&VehicleCategory::Utility).unwrap();
            assert_eq!(json, "\"UTILITY\"");
            let back: VehicleCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(back, VehicleCategory::Utility);
        }
    }

    mod seller_status {
        use super::*;

        #[test]
        fn only_active_is_active() {
            assert!(SellerStatus::Active.is_active());
            assert!(!SellerStatus::Inactive.is_active());
            assert!(!SellerStatus::OnLeave.is_active());
        }

        #[test]
        fn from_str_works() {
            assert_eq!("on-leave".parse::<SellerStatus>().unwrap(), SellerStatus::OnLeave);
            assert_eq!(SellerStatus::OnLeave.to_string(), "ON_LEAVE");
        }
    }

    mod distribution_method {
        use super::*;

        #[test]
        fn from_str_is_case_insensitive() {
            assert_eq!(
                "SEQUENTIAL".parse::<DistributionMethod>().unwrap(),
                DistributionMethod::Sequential
            );
            assert_eq!(
                "Load_Balanced".parse::<DistributionMethod>().unwrap(),
                DistributionMethod::LoadBalanced
            );
        }

        #[test]
        fn serde_uses_config_names() {
            let json = serde_json::to_string(&DistributionMethod::Speed).unwrap();
            assert_eq!(json, "\"speed\"");
            let back: DistributionMethod = serde_json::from_str("\"performance\"").unwrap();
            assert_eq!(back, DistributionMethod::Performance);
        }

        #[test]
        fn serde_rejects_unknown() {
            assert!(serde_json::from_str::<DistributionMethod>("\"lottery\"").is_err());
        }

        #[test]
        fn default_is_sequential() {
            assert_eq!(DistributionMethod::default(), DistributionMethod::Sequential);
        }
    }
}
