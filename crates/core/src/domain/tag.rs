use std::fmt;
use std::str::FromStr;

use super::DomainError;

const TAG_DELIMITER: char = ',';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Array,
    LinkedList,
    Graph,
    Dp,
}

impl Tag {
    pub const ALL: [Tag; 4] = [Tag::Array, Tag::LinkedList, Tag::Graph, Tag::Dp];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::LinkedList => "linkedList",
            Self::Graph => "graph",
            Self::Dp => "dp",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == label)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-empty, ordered tag list. Stored as a comma-delimited string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tags(Vec<Tag>);

impl Tags {
    /// Trims every label and drops blanks; any remaining unknown label fails
    /// the whole set.
    pub fn parse_labels<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tags = Vec::new();
        let mut invalid = Vec::new();

        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() {
                continue;
            }
            match Tag::from_label(label) {
                Some(tag) => tags.push(tag),
                None => invalid.push(label.to_string()),
            }
        }

        if !invalid.is_empty() {
            return Err(DomainError::InvalidTags(invalid));
        }
        if tags.is_empty() {
            return Err(DomainError::MissingField("tags"));
        }

        Ok(Self(tags))
    }

    pub fn parse_delimited(value: &str) -> Result<Self, DomainError> {
        Self::parse_labels(value.split(TAG_DELIMITER))
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.0
    }

    pub fn to_canonical(&self) -> String {
        self.0
            .iter()
            .map(|tag| tag.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical())
    }
}

impl FromStr for Tags {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_delimited(s)
    }
}

#[cfg(test)]
mod tests {
    use super::{Tag, Tags};
    use crate::domain::DomainError;

    #[test]
    fn delimited_and_list_inputs_normalize_to_the_same_string() {
        let from_string = Tags::parse_delimited("array, dp").expect("tags should parse");
        let from_list = Tags::parse_labels(["array", "dp"]).expect("tags should parse");

        assert_eq!(from_string.to_canonical(), "array,dp");
        assert_eq!(from_list.to_canonical(), "array,dp");
        assert_eq!(from_string, from_list);
    }

    #[test]
    fn blank_segments_are_ignored() {
        let tags = Tags::parse_delimited(" graph ,, linkedList ,").expect("tags should parse");

        assert_eq!(tags.as_slice(), &[Tag::Graph, Tag::LinkedList]);
    }

    #[test]
    fn unknown_tags_are_listed_exactly() {
        let err = Tags::parse_delimited("array,foo").expect_err("foo is not a tag");
        assert_eq!(err, DomainError::InvalidTags(vec!["foo".to_string()]));

        let err = Tags::parse_labels(["tree", "dp", " heap "]).expect_err("unknown tags");
        assert_eq!(
            err,
            DomainError::InvalidTags(vec!["tree".to_string(), "heap".to_string()])
        );
    }

    #[test]
    fn tags_are_case_sensitive() {
        let err = Tags::parse_delimited("LinkedList").expect_err("labels are exact");

        assert_eq!(err, DomainError::InvalidTags(vec!["LinkedList".to_string()]));
    }

    #[test]
    fn empty_input_is_missing() {
        let err = Tags::parse_delimited(" , ").expect_err("no tags at all");

        assert_eq!(err, DomainError::MissingField("tags"));
    }
}
