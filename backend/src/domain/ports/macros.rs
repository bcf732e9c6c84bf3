//! `define_port_error!`: typed error enums for driven ports.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept `impl Into<T>`, so adapters can write
//! `CourseRepositoryError::query(err.to_string())` or pass a `&str`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StorePortError {
            Unavailable => "store unavailable",
            Rejected { message: String } => "rejected: {message}",
            TooLarge { limit: usize, actual: usize } => "{actual} exceeds {limit}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StorePortError::unavailable(), StorePortError::Unavailable);
        assert_eq!(StorePortError::unavailable().to_string(), "store unavailable");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StorePortError::rejected("empty payload");
        assert_eq!(err.to_string(), "rejected: empty payload");
    }

    #[test]
    fn multiple_fields_keep_their_types() {
        let err = StorePortError::too_large(2_usize, 3_usize);
        assert_eq!(err.to_string(), "3 exceeds 2");
    }
}
