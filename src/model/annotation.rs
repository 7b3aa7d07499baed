//! Labels, annotations and the per-image annotation set.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::constants::DEFAULT_LABEL;
use crate::model::geometry::Quad;

/// Reasons a label text is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    #[error("label must not be empty")]
    Empty,

    /// Label files separate fields by whitespace, so a label must be one token.
    #[error("label '{0}' contains whitespace")]
    ContainsWhitespace(String),
}

/// Class name attached to a quad. Always a single non-empty whitespace-free token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn new(text: impl Into<String>) -> Result<Self, LabelError> {
        let text = text.into();
        if text.is_empty() {
            return Err(LabelError::Empty);
        }
        if text.chars().any(char::is_whitespace) {
            return Err(LabelError::ContainsWhitespace(text));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Label {
    fn default() -> Self {
        Self(DEFAULT_LABEL.to_string())
    }
}

impl FromStr for Label {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A committed quad together with its label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub quad: Quad,
    pub label: Label,
}

impl Annotation {
    pub fn new(quad: Quad, label: Label) -> Self {
        Self { quad, label }
    }
}

/// All annotations of one image, in commit order.
///
/// Each quad is stored next to its label, so the quad sequence and the label
/// sequence always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    entries: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, quad: Quad, label: Label) {
        self.entries.push(Annotation::new(quad, label));
    }

    pub fn pop(&mut self) -> Option<Annotation> {
        self.entries.pop()
    }

    pub fn get(&self, index: usize) -> Option<&Annotation> {
        self.entries.get(index)
    }

    pub fn last(&self) -> Option<&Annotation> {
        self.entries.last()
    }

    /// Rotate the origin of the most recent quad. Returns false when the set is empty.
    pub fn rotate_last_origin(&mut self) -> bool {
        match self.entries.last_mut() {
            Some(annotation) => {
                annotation.quad.rotate_origin();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.entries.iter()
    }

    /// The quads, index-aligned with [`labels`](Self::labels).
    pub fn quads(&self) -> impl Iterator<Item = &Quad> + '_ {
        self.entries.iter().map(|a| &a.quad)
    }

    /// The labels, index-aligned with [`quads`](Self::quads).
    pub fn labels(&self) -> impl Iterator<Item = &Label> + '_ {
        self.entries.iter().map(|a| &a.label)
    }
}

impl FromIterator<Annotation> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Extend<Annotation> for AnnotationSet {
    fn extend<I: IntoIterator<Item = Annotation>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::geometry::Point;

    fn square(offset: i32) -> Quad {
        Quad::from_points([
            Point::new(offset, offset),
            Point::new(offset, offset + 10),
            Point::new(offset + 10, offset + 10),
            Point::new(offset + 10, offset),
        ])
    }

    #[test]
    fn test_label_validation() {
        assert_eq!(Label::new("truck").unwrap().as_str(), "truck");
        assert_eq!(Label::new(""), Err(LabelError::Empty));
        assert_eq!(
            Label::new("fire truck"),
            Err(LabelError::ContainsWhitespace("fire truck".into()))
        );
        assert!("tab\tbed".parse::<Label>().is_err());
        assert_eq!(Label::default().as_str(), "car");
    }

    #[test]
    fn test_quads_and_labels_stay_aligned() {
        let mut set = AnnotationSet::new();
        set.push(square(0), Label::new("car").unwrap());
        set.push(square(20), Label::new("bus").unwrap());

        assert_eq!(set.quads().count(), set.labels().count());
        let labels: Vec<_> = set.labels().map(Label::as_str).collect();
        assert_eq!(labels, ["car", "bus"]);
        assert_eq!(set.quads().nth(1), Some(&square(20)));

        set.pop();
        assert_eq!(set.quads().count(), 1);
        assert_eq!(set.labels().count(), 1);
    }

    #[test]
    fn test_pop_on_empty_set() {
        let mut set = AnnotationSet::new();
        assert!(set.pop().is_none());
        assert!(!set.rotate_last_origin());
        assert!(set.is_empty());
    }

    #[test]
    fn test_rotate_last_only_touches_last() {
        let mut set = AnnotationSet::new();
        set.push(square(0), Label::default());
        set.push(square(20), Label::new("bus").unwrap());

        assert!(set.rotate_last_origin());
        assert_eq!(set.get(0).unwrap().quad, square(0));
        let last = set.last().unwrap();
        assert_eq!(last.quad[0], Point::new(20, 30));
        assert_eq!(last.label.as_str(), "bus");
    }
}
