pub mod legacy;

use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::mark::{Mark, TargetType};
use crate::passage::legacy::{LegacyFootnote, LegacyWordsOfJesus};

/// One verse (or sub-verse) of source text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Verse {
    pub id: String,
    pub text: String,
    /// Printed verse number, e.g. `"16"` or `"16b"`.
    pub label: String,
    pub number: u32,
    pub sub_verse_index: u32,
    pub paragraph_number: u32,
    /// Position of this verse within its paragraph.
    pub paragraph_index: u32,
    pub is_poetry: bool,
    pub chapter_id: String,
}

impl Verse {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Verse {
            id: id.into(),
            text: text.into(),
            ..Verse::default()
        }
    }

    /// Verses that start a paragraph get a printed verse number.
    pub fn opens_paragraph(&self) -> bool {
        self.sub_verse_index == 0 || self.paragraph_index == 0
    }

    /// First verse of the first paragraph of its chapter.
    pub fn opens_chapter(&self) -> bool {
        self.sub_verse_index == 0 && self.paragraph_number == 0 && self.paragraph_index == 0
    }
}

/// A section heading printed before the verse it targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Heading {
    pub id: String,
    #[serde(alias = "text")]
    pub content: String,
    /// 1-based.
    pub level: u32,
    #[serde(alias = "verseId")]
    pub target_verse_id: String,
}

/// Title line of a psalm, printed above the chapter's first verse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PsalmMetadata {
    pub chapter_id: String,
    #[serde(alias = "text")]
    pub title: String,
}

/// Everything one render call reads. Verses are in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Passage {
    pub verses: Vec<Verse>,
    /// Marks with a negative offset are dropped while decoding.
    #[serde(deserialize_with = "mark_records")]
    pub marks: Vec<Mark>,
    pub headings: Vec<Heading>,
    pub psalms: Vec<PsalmMetadata>,
    /// Older inputs carry notes and highlights as separate record lists.
    pub footnotes: Vec<LegacyFootnote>,
    pub words_of_jesus: Vec<LegacyWordsOfJesus>,
}

/// A mark as it arrives on the wire, where offsets are signed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkRecord {
    #[serde(default)]
    start_offset: i64,
    #[serde(default)]
    end_offset: i64,
    #[serde(flatten)]
    mark: Mark,
}

impl MarkRecord {
    fn into_mark(self) -> Option<Mark> {
        match (
            usize::try_from(self.start_offset),
            usize::try_from(self.end_offset),
        ) {
            (Ok(start), Ok(end)) => Some(Mark {
                start_offset: start,
                end_offset: end,
                ..self.mark
            }),
            _ => {
                warn!(
                    id = %self.mark.id,
                    start = self.start_offset,
                    end = self.end_offset,
                    "skipping mark with a negative offset"
                );
                None
            }
        }
    }
}

fn mark_records<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Mark>, D::Error> {
    let records = Vec::<MarkRecord>::deserialize(deserializer)?;
    Ok(records.into_iter().filter_map(MarkRecord::into_mark).collect())
}

impl Passage {
    /// The passage's marks followed by the converted legacy records.
    pub fn all_marks(&self) -> Cow<'_, [Mark]> {
        if self.footnotes.is_empty() && self.words_of_jesus.is_empty() {
            return Cow::Borrowed(&self.marks);
        }

        let mut marks = self.marks.clone();
        marks.extend(self.footnotes.iter().filter_map(LegacyFootnote::to_mark));
        marks.extend(self.words_of_jesus.iter().filter_map(LegacyWordsOfJesus::to_mark));
        Cow::Owned(marks)
    }

    /// Headings printed before `verse_id`, in declaration order.
    pub fn headings_for<'a>(&'a self, verse_id: &'a str) -> impl Iterator<Item = &'a Heading> {
        self.headings
            .iter()
            .filter(move |heading| heading.target_verse_id == verse_id)
    }

    /// Whether a mark aimed at `(target_type, target_id)` lands on something
    /// this passage renders. A heading only renders when its verse does.
    pub fn has_target(&self, target_type: TargetType, target_id: &str) -> bool {
        match target_type {
            TargetType::Verse => self.has_verse(target_id),
            TargetType::Heading => self
                .headings
                .iter()
                .any(|h| h.id == target_id && self.has_verse(&h.target_verse_id)),
            TargetType::Unspecified => false,
        }
    }

    fn has_verse(&self, verse_id: &str) -> bool {
        self.verses.iter().any(|verse| verse.id == verse_id)
    }
}
