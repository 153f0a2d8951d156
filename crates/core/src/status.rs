//! Lookup enums mapping to SMALLINT lookup tables.
//!
//! Each enum variant's discriminant matches the seed data in the
//! corresponding database table (see `db/migrations`).

/// Lookup ID type matching SMALLINT in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database lookup ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Resolve a database lookup ID, or `None` if it is not seeded.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Traffic-light accessibility classification of a location.
    AccessLevel {
        /// Green: every trackable feature is confirmed good.
        Easy = 1,
        /// Yellow: mixed or tied votes.
        Medium = 2,
        /// Red: too many features confirmed bad.
        Hard = 3,
        /// Gray: nobody has voted yet.
        Unknown = 4,
    }
}

impl AccessLevel {
    /// Badge color shown to end users.
    pub fn color(self) -> &'static str {
        match self {
            Self::Easy => "green",
            Self::Medium => "yellow",
            Self::Hard => "red",
            Self::Unknown => "gray",
        }
    }
}

impl Default for AccessLevel {
    fn default() -> Self {
        Self::Unknown
    }
}
