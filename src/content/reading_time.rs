use crate::content::ContentSection;
use crate::rich_text::as_text;

pub const WORDS_PER_MINUTE: usize = 200;

/// Whitespace separated tokens of every heading and body.
pub fn count_words(sections: &[ContentSection]) -> usize {
    sections.iter()
        .map(|section| {
            section.heading.split_whitespace().count()
                + as_text(&section.body).split_whitespace().count()
        })
        .sum()
}

/// Minutes needed to read the sections, rounded up. Zero only when there is
/// no word at all.
pub fn estimate_reading_time(sections: &[ContentSection]) -> u32 {
    count_words(sections).div_ceil(WORDS_PER_MINUTE) as u32
}
