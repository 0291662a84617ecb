//! Section assembly
//!
//! Merges the section list and the abstract scan into a [`ResultMapping`].
//! Sections are visited in document order and every wanted name contained
//! in a heading gets an entry, so one heading can fill several entries.
//! A later heading matching an already filled name replaces the earlier
//! entry.

use tracing::debug;

use crate::abstract_labels::AbstractScan;
use crate::result::{ResultMapping, SectionEntry};
use crate::sections::Section;
use crate::vocabulary::Vocabulary;

/// Assemble with the default vocabulary
pub fn assemble(sections: &[Section], abstract_scan: &AbstractScan) -> ResultMapping {
    assemble_with(sections, abstract_scan, &Vocabulary::default())
}

/// Assemble with a custom vocabulary
pub fn assemble_with(
    sections: &[Section],
    abstract_scan: &AbstractScan,
    vocabulary: &Vocabulary,
) -> ResultMapping {
    let mut mapping = ResultMapping::new();

    for section in sections {
        for wanted in vocabulary.matches(&section.heading) {
            let entry = SectionEntry::new(
                section.body.clone(),
                abstract_scan.get(wanted).map(str::to_string),
            );
            if mapping.insert(wanted, entry).is_some() {
                debug!(
                    "Heading '{}' replaces earlier entry for {}",
                    section.heading, wanted
                );
            }
        }
    }

    mapping
}
