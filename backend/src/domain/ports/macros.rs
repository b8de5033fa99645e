//! Helper macro for declaring driven-port error enums.
//!
//! Each variant carries named fields and a display template. The macro derives
//! `thiserror::Error` and emits a snake_case constructor per variant whose
//! parameters accept anything convertible into the field type.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),+ },
            )+
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build a [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                }
            )+
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Connection { message: String } => "sample connection failed: {message}",
            Overlap { topic: String, open: u32 } => "topic {topic} has {open} open sessions",
        }
    }

    #[test]
    fn constructor_accepts_str() {
        let err = SamplePortError::connection("refused");
        assert_eq!(err.to_string(), "sample connection failed: refused");
    }

    #[test]
    fn constructor_handles_several_fields() {
        let err = SamplePortError::overlap("t-1", 2_u32);
        assert_eq!(
            err,
            SamplePortError::Overlap {
                topic: "t-1".to_owned(),
                open: 2,
            }
        );
        assert_eq!(err.to_string(), "topic t-1 has 2 open sessions");
    }
}
