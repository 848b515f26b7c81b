use serde::{Deserialize, Serialize};

/// What a mark annotates.
///
/// The declaration order is significant: footnote and reference appendix
/// entries are listed kind by kind in this order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum MarkKind {
    #[default]
    Unspecified,
    Footnote,
    Reference,
    WordsOfJesus,
}

impl MarkKind {
    /// Accepts both the short names (`footnote`) and the upstream enum names
    /// (`MARK_KIND_FOOTNOTE`). Anything else is `Unspecified`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "footnote" | "MARK_KIND_FOOTNOTE" => MarkKind::Footnote,
            "reference" | "MARK_KIND_REFERENCE" => MarkKind::Reference,
            "words_of_jesus" | "MARK_KIND_WORDS_OF_JESUS" => MarkKind::WordsOfJesus,
            _ => MarkKind::Unspecified,
        }
    }

    /// Footnotes and references are point callouts listed in the appendix.
    pub fn is_note(self) -> bool {
        matches!(self, MarkKind::Footnote | MarkKind::Reference)
    }
}

impl From<String> for MarkKind {
    fn from(name: String) -> Self {
        MarkKind::from_name(&name)
    }
}

/// The structural unit a mark is attached to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum TargetType {
    #[default]
    Unspecified,
    Verse,
    Heading,
}

impl TargetType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "verse" | "MARK_TARGET_TYPE_VERSE" => TargetType::Verse,
            "heading" | "MARK_TARGET_TYPE_HEADING" => TargetType::Heading,
            _ => TargetType::Unspecified,
        }
    }
}

impl From<String> for TargetType {
    fn from(name: String) -> Self {
        TargetType::from_name(&name)
    }
}
