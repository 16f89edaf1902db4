/// Converts errors from their error type (of the submodule) to that of
/// a `routepick::Error` variant, or to a variant of another module error.
///
/// ```rust,ignore
/// use routepick::geo::error::GeoError;
/// routepick::impl_err!(GeoError, Geo);
/// routepick::impl_err!(GeoError, ConfigError, InvalidCenter);
/// ```
pub mod err_macro {
    #[macro_export]
    macro_rules! impl_err {
        ($from:ty, $variant:ident) => {
            impl From<$from> for $crate::Error {
                fn from(value: $from) -> Self {
                    $crate::Error::$variant(value)
                }
            }
        };
        ($from:ty, $to:ident, $variant:ident) => {
            impl From<$from> for $to {
                fn from(value: $from) -> Self {
                    $to::$variant(value)
                }
            }
        };
    }
}
