//! Word frequency over message bodies.
//!
//! The stopword set is always passed in by the caller; nothing here reads
//! global state.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::model::MessageRecord;

/// Common English function words.
const ENGLISH_STOPWORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "but", "by", "can", "could", "did", "do", "does", "for", "from",
    "get", "got", "had", "has", "have", "he", "her", "here", "him", "his", "how", "i", "if", "im",
    "in", "into", "is", "it", "its", "just", "me", "my", "no", "not", "now", "of", "oh", "ok",
    "okay", "on", "one", "or", "our", "out", "she", "so", "that", "the", "their", "them", "then",
    "there", "they", "this", "to", "too", "u", "up", "us", "was", "we", "were", "what", "when",
    "where", "which", "who", "why", "will", "with", "would", "yeah", "yes", "you", "your",
];

/// Frequent Hinglish filler words seen in romanized Hindi chats.
const HINGLISH_STOPWORDS: &[&str] = &[
    "aur", "bhi", "h", "hai", "hain", "haan", "ho", "hu", "hum", "jo", "ka", "kar", "ke", "ki",
    "kya", "ko", "mai", "main", "mein", "na", "nahi", "ne", "se", "tha", "thi", "toh", "tu",
    "tum", "ye", "yeh", "wo",
];

/// A set of words ignored when counting.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// An empty set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in English and Hinglish lists.
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty().with_words(ENGLISH_STOPWORDS.iter().chain(HINGLISH_STOPWORDS))
    }

    /// Add words (lowercased).
    #[must_use]
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Whether `word` (already lowercase) is ignored.
    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lowercase alphanumeric tokens of `text`.
///
/// Tokens are whitespace-separated words with surrounding punctuation
/// removed; anything still containing a non-alphanumeric character (URLs,
/// contractions, emoji) is skipped.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().filter_map(|raw| {
        let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
        if word.is_empty() || !word.chars().all(char::is_alphanumeric) {
            return None;
        }
        Some(word.to_lowercase())
    })
}

/// The `n` most frequent words, highest count first; ties keep the order in
/// which the words first appeared.
#[must_use]
pub fn top_words(messages: &[MessageRecord], stopwords: &StopWords, n: usize) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for message in messages {
        for word in tokenize(&message.body) {
            if !stopwords.contains(&word) {
                *counts.entry(word).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}
