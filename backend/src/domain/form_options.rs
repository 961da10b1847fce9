//! Closed option lists offered by the registration form.
//!
//! Both lists serialise as their human-readable label (`"Tamil Nadu"`,
//! `"Carpentry"`) and parse case-insensitively from the same label.

use std::fmt;
use std::str::FromStr;

/// Error returned when a label does not name a known option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownOptionError {
    kind: &'static str,
    value: String,
}

impl UnknownOptionError {
    /// Option list the value was checked against.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

macro_rules! labelled_options {
    (
        $(#[$outer:meta])*
        pub enum $name:ident ($kind:literal) {
            $( $(#[$variant_meta:meta])* $variant:ident => $label:literal ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $( $(#[$variant_meta])* $variant, )*
        }

        impl $name {
            /// Every option in display order.
            pub const ALL: &'static [Self] = &[$( Self::$variant, )*];

            /// Human-readable label used on the wire.
            pub fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )*
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownOptionError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let needle = value.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|option| option.label().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| UnknownOptionError {
                        kind: $kind,
                        value: value.to_owned(),
                    })
            }
        }

        impl TryFrom<String> for $name {
            type Error = UnknownOptionError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.label().to_owned()
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

labelled_options! {
    /// Indian state or union territory a worker migrated from.
    pub enum OriginState ("state") {
        AndhraPradesh => "Andhra Pradesh",
        ArunachalPradesh => "Arunachal Pradesh",
        Assam => "Assam",
        Bihar => "Bihar",
        Chhattisgarh => "Chhattisgarh",
        Goa => "Goa",
        Gujarat => "Gujarat",
        Haryana => "Haryana",
        HimachalPradesh => "Himachal Pradesh",
        Jharkhand => "Jharkhand",
        Karnataka => "Karnataka",
        Kerala => "Kerala",
        MadhyaPradesh => "Madhya Pradesh",
        Maharashtra => "Maharashtra",
        Manipur => "Manipur",
        Meghalaya => "Meghalaya",
        Mizoram => "Mizoram",
        Nagaland => "Nagaland",
        Odisha => "Odisha",
        Punjab => "Punjab",
        Rajasthan => "Rajasthan",
        Sikkim => "Sikkim",
        TamilNadu => "Tamil Nadu",
        Telangana => "Telangana",
        Tripura => "Tripura",
        UttarPradesh => "Uttar Pradesh",
        Uttarakhand => "Uttarakhand",
        WestBengal => "West Bengal",
        AndamanAndNicobarIslands => "Andaman and Nicobar Islands",
        Chandigarh => "Chandigarh",
        DadraNagarHaveliDamanDiu => "Dadra and Nagar Haveli and Daman and Diu",
        Delhi => "Delhi",
        JammuAndKashmir => "Jammu and Kashmir",
        Ladakh => "Ladakh",
        Lakshadweep => "Lakshadweep",
        Puducherry => "Puducherry",
    }
}

impl OriginState {
    /// Two-letter prefix used in unique worker IDs.
    ///
    /// # Examples
    /// ```
    /// use migii::domain::OriginState;
    ///
    /// assert_eq!(OriginState::Kerala.id_prefix(), "KE");
    /// assert_eq!(OriginState::TamilNadu.id_prefix(), "TA");
    /// ```
    pub fn id_prefix(self) -> String {
        self.label()
            .chars()
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

labelled_options! {
    /// Trade a worker registers under.
    pub enum Skill ("skill") {
        Carpentry => "Carpentry",
        Masonry => "Masonry",
        Plumbing => "Plumbing",
        Electrical => "Electrical",
        Painting => "Painting",
        Welding => "Welding",
        Driving => "Driving",
        Construction => "Construction",
        Agriculture => "Agriculture",
        DomesticHelp => "Domestic Help",
        Cooking => "Cooking",
        Tailoring => "Tailoring",
        SecurityGuard => "Security Guard",
        FactoryWork => "Factory Work",
        Other => "Other",
    }
}
