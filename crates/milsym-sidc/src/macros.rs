/// Compiles a literal SIDC pattern once and hands out a `&'static Regex`.
#[macro_export]
macro_rules! sidc_regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Compiles a list of literal SIDC patterns into a `&'static RegexSet`.
#[macro_export]
macro_rules! sidc_regex_set {
    ($($pat:literal),+ $(,)?) => {{
        static SET: once_cell::sync::Lazy<regex::RegexSet> =
            once_cell::sync::Lazy::new(|| regex::RegexSet::new([$($pat),+]).unwrap());
        &*SET
    }};
}
