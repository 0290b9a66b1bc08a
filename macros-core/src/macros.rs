/// Returns early with a [`syn::Error`] located at `$span`.
#[macro_export]
macro_rules! bail {
    ($span:expr, $fmt:literal, $($args:tt)*) => {
        return Err(::syn::Error::new($span, format!($fmt, $($args)*)))
    };
    ($span:expr, $fmt:literal) => {
        $crate::bail!($span, $fmt,)
    };
}
