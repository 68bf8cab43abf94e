//! Serde utility helpers for string-backed enums

/// Macro to implement string-based serde for enums that already implement
/// `FromStr` and `Display`.
///
/// Deserialization goes through `FromStr`, so values the parser rejects are
/// rejected by serde as well instead of falling back to a default.
///
/// Usage:
/// ```ignore
/// impl_from_str_serde!(MyEnum);
/// ```
#[macro_export]
macro_rules! impl_from_str_serde {
    ($enum_type:ty) => {
        impl serde::Serialize for $enum_type {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> serde::Deserialize<'de> for $enum_type {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                s.parse::<$enum_type>().map_err(serde::de::Error::custom)
            }
        }
    };
}
