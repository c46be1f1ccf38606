//! Helper macro for declaring port error enums with `impl Into` constructors.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
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
        pub enum SampleAdapterError {
            Unavailable => "adapter unavailable",
            Rejected { reason: String } => "adapter rejected call: {reason}",
            Throttled { endpoint: String, retry_after: u64 } =>
                "{endpoint} throttled for {retry_after}s",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(
            SampleAdapterError::unavailable().to_string(),
            "adapter unavailable"
        );
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SampleAdapterError::rejected("quota");
        assert_eq!(err.to_string(), "adapter rejected call: quota");
    }

    #[test]
    fn mixed_fields_convert_independently() {
        let err = SampleAdapterError::throttled("/codes/cities", 30_u64);
        assert_eq!(err.to_string(), "/codes/cities throttled for 30s");
    }
}
