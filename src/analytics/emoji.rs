//! Emoji counting.

use indexmap::IndexMap;
use serde::Serialize;

use crate::model::MessageRecord;

const ZERO_WIDTH_JOINER: char = '\u{200D}';
const EMOJI_PRESENTATION: char = '\u{FE0F}';

/// Skin-tone modifiers; they shade the emoji before them.
const fn is_skin_tone(c: char) -> bool {
    matches!(c as u32, 0x1F3FB..=0x1F3FF)
}

/// Regional indicator letters; two of them make one flag.
const fn is_regional_indicator(c: char) -> bool {
    matches!(c as u32, 0x1F1E6..=0x1F1FF)
}

/// Whether `c` starts an emoji on its own.
///
/// Covers the pictograph, emoticon, transport and supplemental symbol
/// blocks, the dingbats, and the scattered arrows, clocks and marks that
/// have an emoji form. Skin tones, flag letters, joiners and variation
/// selectors only count as part of a sequence.
#[must_use]
pub const fn is_emoji(c: char) -> bool {
    if is_skin_tone(c) || is_regional_indicator(c) {
        return false;
    }
    matches!(
        c as u32,
        0x1F000..=0x1FAFF
            | 0x2600..=0x27BF
            | 0x00A9
            | 0x00AE
            | 0x203C
            | 0x2049
            | 0x2122
            | 0x2139
            | 0x2194..=0x2199
            | 0x21A9
            | 0x21AA
            | 0x231A
            | 0x231B
            | 0x2328
            | 0x23CF
            | 0x23E9..=0x23F3
            | 0x23F8..=0x23FA
            | 0x24C2
            | 0x25AA
            | 0x25AB
            | 0x25B6
            | 0x25C0
            | 0x25FB..=0x25FE
            | 0x2934
            | 0x2935
            | 0x2B05..=0x2B07
            | 0x2B1B
            | 0x2B1C
            | 0x2B50
            | 0x2B55
            | 0x3030
            | 0x303D
            | 0x3297
            | 0x3299
    )
}

/// Split `text` into the emojis it contains.
///
/// A base emoji takes any skin tone or presentation selector after it, and
/// joiner sequences such as families stay whole. Two regional indicators
/// make one flag; a lone indicator is skipped.
pub fn emoji_sequences(text: &str) -> Vec<&str> {
    let mut sequences = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        let mut end = start + c.len_utf8();

        if is_regional_indicator(c) {
            if let Some(&(i, next)) = chars.peek() {
                if is_regional_indicator(next) {
                    chars.next();
                    sequences.push(&text[start..i + next.len_utf8()]);
                }
            }
            continue;
        }
        if !is_emoji(c) {
            continue;
        }

        while let Some(&(i, next)) = chars.peek() {
            if is_skin_tone(next) || next == EMOJI_PRESENTATION {
                chars.next();
                end = i + next.len_utf8();
                continue;
            }
            if next != ZERO_WIDTH_JOINER {
                break;
            }
            let mut ahead = chars.clone();
            ahead.next();
            match ahead.peek() {
                Some(&(j, joined)) if is_emoji(joined) => {
                    chars.next();
                    chars.next();
                    end = j + joined.len_utf8();
                }
                _ => break,
            }
        }

        sequences.push(&text[start..end]);
    }

    sequences
}

/// Emoji usage across a set of messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmojiStats {
    /// Total emojis; a flag or joined sequence counts once.
    pub total: usize,
    /// Most used emojis, highest count first.
    pub top: Vec<(String, usize)>,
    /// Emoji count per sender, in order of first message.
    pub by_sender: IndexMap<String, usize>,
}

impl EmojiStats {
    /// Count emojis in `messages`, keeping the `top_n` most frequent.
    #[must_use]
    pub fn from_messages(messages: &[MessageRecord], top_n: usize) -> Self {
        let mut stats = Self::default();
        let mut counts: IndexMap<&str, usize> = IndexMap::new();

        for message in messages {
            let per_sender = stats.by_sender.entry(message.sender.clone()).or_insert(0);
            for emoji in emoji_sequences(&message.body) {
                stats.total += 1;
                *per_sender += 1;
                *counts.entry(emoji).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(emoji, count)| (emoji.to_string(), count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(top_n);
        stats.top = ranked;
        stats
    }

    /// Sender with the most emojis; the earliest sender wins a tie.
    #[must_use]
    pub fn top_sender(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (sender, &count) in &self.by_sender {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((sender.as_str(), count));
            }
        }
        best
    }
}
