use regex::{Captures, Regex};

/// An ordered list of tagged regular expressions applied to one line of
/// text. The first matching pattern wins; every set built by the scanner is
/// engineered so that at most one pattern matches a valid line.
pub struct PatternSet {
    patterns: Vec<(&'static str, Regex)>,
}

impl PatternSet {
    pub fn new(patterns: &[(&'static str, &str)]) -> Self {
        let patterns = patterns
            .iter()
            .map(|(tag, pattern)| (*tag, Regex::new(pattern).unwrap()))
            .collect();
        Self { patterns }
    }

    /// Returns the first matching pattern's tag and captures.
    pub fn find<'t>(&self, text: &'t str) -> Option<(&'static str, Captures<'t>)> {
        self.patterns
            .iter()
            .find_map(|(tag, re)| re.captures(text).map(|caps| (*tag, caps)))
    }
}
