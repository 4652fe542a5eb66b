//! Code-valued record members (statuses, intents, priorities).
//!
//! Each code type lists the codes the editor offers and keeps any other code it reads in an
//! `Other` variant, so a record with an unrecognised code still loads and renders back
//! unchanged. Validators report `Other` codes when the record is saved.

/// Common access to code-valued enums.
pub trait Code {
    /// The code as written in FHIR JSON.
    fn as_str(&self) -> &str;

    /// False for codes read from input that are not in the supported value set.
    fn is_known(&self) -> bool;
}

/// Declares a code enum with a verbatim `Other(String)` fallback.
macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            /// A code outside the supported value set, kept as read.
            Other(String),
        }

        impl $name {
            /// The code as written in FHIR JSON.
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Other(code) => code.as_str(),
                }
            }
        }

        impl $crate::codes::Code for $name {
            fn as_str(&self) -> &str {
                $name::as_str(self)
            }

            fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    other => Self::Other(other.to_owned()),
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let code = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from(code.as_str()))
            }
        }
    };
}

pub(crate) use code_enum;
