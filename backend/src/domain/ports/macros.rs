//! Helper macro for declaring port error enums.
//!
//! Every driven port needs the same boilerplate: a `thiserror` enum plus a
//! snake_case constructor per variant whose parameters accept anything
//! convertible into the field types. The macro keeps the declarations down
//! to variant names, fields and message templates.

macro_rules! define_port_error {
    // Public grammar: variants with optional named fields and a display
    // template, e.g. `Query { message: String } => "query failed: {message}"`.
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
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@accumulate $variant () () $( $field : $ty, )*);
    };

    // All fields consumed; emit the constructor.
    (@accumulate $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    // Fold the next field into the parameter and initialiser lists.
    (@accumulate $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @accumulate
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
}

pub(crate) use define_port_error;
