//! Resolution of wire tag strings into closed enumerations.
//!
//! Every enumeration the API exposes is resolved the same way: match the
//! wire string case-insensitively against the known values and fall back to
//! a designated member when nothing matches. Unknown strings never fail, so
//! new API values decode into the fallback instead of breaking the caller.

/// A closed set of string-valued tags with a designated fallback member.
pub trait WireTag: Copy + Sized + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// The member unknown tags resolve to.
    const FALLBACK: Self;

    /// The exact string the API uses for this member.
    fn as_str(&self) -> &'static str;

    /// Resolves a wire string, falling back to [`WireTag::FALLBACK`].
    fn from_wire(tag: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.as_str().eq_ignore_ascii_case(tag))
            .unwrap_or(Self::FALLBACK)
    }

    /// Like [`WireTag::from_wire`], but `None` when the tag is unknown.
    fn lookup(tag: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.as_str().eq_ignore_ascii_case(tag))
    }
}

/// Declares a wire enumeration: the enum itself, its [`WireTag`] impl,
/// `Display`, and serde impls that go through the fallback rule.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident (fallback = $fallback:ident) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $crate::types::WireTag for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];
            const FALLBACK: Self = $name::$fallback;

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::types::WireTag::as_str(self))
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str($crate::types::WireTag::as_str(self))
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let tag = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Ok(<$name as $crate::types::WireTag>::from_wire(&tag))
            }
        }
    };
}

pub(crate) use wire_enum;
