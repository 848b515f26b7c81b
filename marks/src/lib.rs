pub mod mark;
pub mod passage;
pub mod resolve;
pub mod text;

pub use mark::{Mark, MarkKind, TargetType};
pub use passage::legacy::{LegacyFootnote, LegacyWordsOfJesus};
pub use passage::{Heading, Passage, PsalmMetadata, Verse};
pub use resolve::{ResolveOptions, resolve_marks};
