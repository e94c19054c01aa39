#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`Params`](crate::Params) map from `key => value` pairs.
///
/// ```
/// use redacta::params;
///
/// let p = params! { "masking_char" => "*", "chars_to_mask" => 4, "from_end" => false };
/// assert_eq!(p.len(), 3);
/// ```
#[macro_export]
macro_rules! params {
    () => {
        $crate::Params::new()
    };
    ( $($key:expr => $value:expr),+ $(,)? ) => {{
        let mut map = $crate::Params::new();
        $( map.insert(($key).to_string(), $crate::__serde_json::Value::from($value)); )+
        map
    }};
}
