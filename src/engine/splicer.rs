//! Position-stable text splicing.
//!
//! Substitutions change the buffer length, which would invalidate the original
//! offsets of every span to the right. The splicer therefore works in two
//! passes:
//!
//! 1. **Right to left.** Spans are applied in descending `start`. Everything
//!    left of the span being applied is still untouched original text, so its
//!    original offsets are valid in the current buffer.
//! 2. **Normalize.** Each record stores how far its end sits from the end of
//!    the buffer when it is written. Later substitutions only touch text to
//!    its left, so that distance never changes; once the final length is known
//!    it converts back to absolute offsets.
//!
//! ```text
//! original: "John lives in NY"
//!
//! apply LOCATION 14..16 -> "John lives in <LOCATION>"    record end_from_tail = 0
//! apply PERSON    0..4  -> "<PERSON> lives in <LOCATION>" record end_from_tail = 20
//!
//! final len 28: LOCATION end = 28 - 0  = 28, start = 28 - 10 = 18
//!               PERSON   end = 28 - 20 = 8,  start = 8 - 8   = 0
//! ```

use crate::OutputEntity;

/// One applied substitution, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SubstitutionRecord {
    pub operator: String,
    pub entity_type: String,
    pub anonymized_text: String,
    /// Bytes between the end of the substitution and the end of the buffer.
    pub end_from_tail: usize,
}

#[derive(Debug)]
pub(crate) struct TextSplicer {
    buffer: String,
    /// In application order, i.e. rightmost first.
    records: Vec<SubstitutionRecord>,
    /// `start` of the most recent substitution, in original offsets.
    frontier: usize,
}

impl TextSplicer {
    pub(crate) fn new(original: &str) -> Self {
        Self { buffer: original.to_string(), records: Vec::new(), frontier: original.len() }
    }

    /// Text currently at `start..end`.
    ///
    /// Valid with original offsets as long as `end` does not pass the
    /// frontier of already-applied substitutions.
    pub(crate) fn text_at(&self, start: usize, end: usize) -> &str {
        debug_assert!(end <= self.frontier, "span {start}..{end} reaches into spliced text");
        &self.buffer[start..end]
    }

    /// Replace `start..end` (original offsets) with `anonymized_text`.
    ///
    /// Calls must come in descending `start` with non-overlapping ranges.
    pub(crate) fn splice(
        &mut self,
        start: usize,
        end: usize,
        anonymized_text: String,
        operator: impl Into<String>,
        entity_type: impl Into<String>,
    ) {
        debug_assert!(start < end && end <= self.frontier, "splice {start}..{end} out of order");

        self.buffer.replace_range(start..end, &anonymized_text);
        self.frontier = start;

        let end_from_tail = self.buffer.len() - (start + anonymized_text.len());
        self.records.push(SubstitutionRecord {
            operator: operator.into(),
            entity_type: entity_type.into(),
            anonymized_text,
            end_from_tail,
        });
    }

    /// Number of substitutions applied so far.
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    /// Final text plus output entities, ascending by `start`.
    ///
    /// Records are produced right to left; reversing them first gives
    /// left-to-right order, and the stable sort keeps that order for empty
    /// replacements that end up at the same offset.
    pub(crate) fn finish(self) -> (String, Vec<OutputEntity>) {
        let total = self.buffer.len();
        let mut items: Vec<OutputEntity> = self
            .records
            .into_iter()
            .rev()
            .map(|record| {
                let end = total - record.end_from_tail;
                OutputEntity {
                    operator: record.operator,
                    entity_type: record.entity_type,
                    start: end - record.anonymized_text.len(),
                    end,
                    text: record.anonymized_text,
                }
            })
            .collect();
        items.sort_by_key(|item| item.start);
        (self.buffer, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity(operator: &str, entity_type: &str, start: usize, end: usize, text: &str) -> OutputEntity {
        OutputEntity {
            operator: operator.to_string(),
            entity_type: entity_type.to_string(),
            start,
            end,
            text: text.to_string(),
        }
    }

    #[test]
    fn splices_right_to_left_and_normalizes() {
        let mut splicer = TextSplicer::new("John lives in NY");
        assert_eq!(splicer.text_at(14, 16), "NY");
        splicer.splice(14, 16, "<LOCATION>".to_string(), "replace", "LOCATION");
        assert_eq!(splicer.text_at(0, 4), "John");
        splicer.splice(0, 4, "<PERSON>".to_string(), "replace", "PERSON");
        assert_eq!(splicer.len(), 2);

        let (text, items) = splicer.finish();
        assert_eq!(text, "<PERSON> lives in <LOCATION>");
        assert_eq!(
            items,
            vec![entity("replace", "PERSON", 0, 8, "<PERSON>"), entity("replace", "LOCATION", 18, 28, "<LOCATION>")]
        );
        for item in &items {
            assert_eq!(&text[item.start..item.end], item.text);
        }
    }

    #[test]
    fn shrinking_replacements_shift_left() {
        let mut splicer = TextSplicer::new("call 555-1234 or 555-9876 now");
        splicer.splice(17, 25, "#".to_string(), "replace", "PHONE");
        splicer.splice(5, 13, "#".to_string(), "replace", "PHONE");
        let (text, items) = splicer.finish();
        assert_eq!(text, "call # or # now");
        assert_eq!(items.iter().map(|i| (i.start, i.end)).collect::<Vec<_>>(), vec![(5, 6), (10, 11)]);
    }

    #[test]
    fn adjacent_empty_replacements_keep_left_to_right_order() {
        let mut splicer = TextSplicer::new("AAAABBBB!");
        splicer.splice(4, 8, String::new(), "redact", "B");
        splicer.splice(0, 4, String::new(), "redact", "A");
        let (text, items) = splicer.finish();
        assert_eq!(text, "!");
        assert_eq!(items, vec![entity("redact", "A", 0, 0, ""), entity("redact", "B", 0, 0, "")]);
    }

    #[test]
    fn multibyte_text_uses_byte_offsets() {
        let text = "Zoë met José";
        let start = text.find("José").unwrap();
        let mut splicer = TextSplicer::new(text);
        splicer.splice(start, text.len(), "J.".to_string(), "replace", "PERSON");
        splicer.splice(0, "Zoë".len(), "Z.".to_string(), "replace", "PERSON");
        let (out, items) = splicer.finish();
        assert_eq!(out, "Z. met J.");
        assert_eq!(items[1].start, 7);
        assert_eq!(&out[items[1].start..items[1].end], "J.");
    }

    #[test]
    fn no_substitutions_returns_original() {
        let (text, items) = TextSplicer::new("nothing to see").finish();
        assert_eq!(text, "nothing to see");
        assert!(items.is_empty());
    }
}
