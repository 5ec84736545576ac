//! Status helper enums mapping to SMALLSERIAL lookup tables.
//!
//! Each enum variant's discriminant matches the seed data order (1-based)
//! in the corresponding `*_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
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
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// Map a database status ID back to a variant.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
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
    /// Product availability status (`product_statuses`).
    ProductStatus {
        Available = 1,
        OutOfStock = 2,
        Discontinued = 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for status in [
            ProductStatus::Available,
            ProductStatus::OutOfStock,
            ProductStatus::Discontinued,
        ] {
            assert_eq!(ProductStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(ProductStatus::from_id(0), None);
        assert_eq!(ProductStatus::from_id(4), None);
    }

    #[test]
    fn available_is_the_default_seed_row() {
        assert_eq!(StatusId::from(ProductStatus::Available), 1);
    }
}
