/// Ordered list of format identifiers a handler accepts (e.g. `json`, `xml`).
///
/// A handler without a format set accepts every format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSet(Vec<String>);

impl FormatSet {
    /// Creates a format set from format identifiers, preserving order.
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FormatSet(formats.into_iter().map(Into::into).collect())
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, format: &str) -> bool {
        self.0.iter().any(|f| f == format)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<&str> for FormatSet {
    fn from(format: &str) -> Self {
        FormatSet::new([format])
    }
}

impl<const N: usize> From<[&str; N]> for FormatSet {
    fn from(formats: [&str; N]) -> Self {
        FormatSet::new(formats)
    }
}

impl From<Vec<String>> for FormatSet {
    fn from(formats: Vec<String>) -> Self {
        FormatSet(formats)
    }
}

/// Checks whether `requested` is accepted by a handler declaring `declared`.
///
/// Returns true when either side is absent.
pub fn check_format(declared: Option<&FormatSet>, requested: Option<&str>) -> bool {
    match (declared, requested) {
        (Some(declared), Some(requested)) => declared.contains(requested),
        _ => true,
    }
}
