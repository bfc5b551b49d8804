//! Analytics over a parsed chat.
//!
//! This module provides:
//! - Message counts per sender
//! - Hourly and monthly activity
//! - Conversation starters and the longest reply gap
//! - Top words and emoji usage

pub mod emoji;
pub mod words;

use chrono::{Datelike, Duration, NaiveDateTime, Timelike};
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::AnalyticsConfig;
use crate::model::{MessageRecord, Transcript};

pub use emoji::{emoji_sequences, is_emoji, EmojiStats};
pub use words::{tokenize, top_words, StopWords};

/// Tunables for [`ChatAnalytics`].
#[derive(Debug, Clone)]
pub struct AnalyticsOptions {
    /// Silence after which the next message starts a new conversation.
    pub conversation_gap: Duration,
    /// Size of the top-words table.
    pub top_words: usize,
    /// Size of the top-emoji table.
    pub top_emojis: usize,
    /// Words left out of the top-words table.
    pub stopwords: StopWords,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self::from(&AnalyticsConfig::default())
    }
}

impl From<&AnalyticsConfig> for AnalyticsOptions {
    fn from(config: &AnalyticsConfig) -> Self {
        Self {
            conversation_gap: Duration::minutes(i64::from(config.conversation_gap_minutes)),
            top_words: config.top_words,
            top_emojis: config.top_emojis,
            stopwords: StopWords::builtin().with_words(&config.extra_stopwords),
        }
    }
}

/// The longest silence between two consecutive messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyGap {
    /// Length of the silence in seconds.
    pub seconds: i64,
    /// When the reply arrived.
    pub replied_at: NaiveDateTime,
    /// Body of the message before the silence.
    pub before: String,
    /// Body of the reply.
    pub after: String,
}

impl ReplyGap {
    /// The silence as a [`Duration`].
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::seconds(self.seconds)
    }

    /// The silence formatted like `2days 3h 10m`.
    #[must_use]
    pub fn humanized(&self) -> String {
        let secs = u64::try_from(self.seconds).unwrap_or(0);
        humantime::format_duration(std::time::Duration::from_secs(secs)).to_string()
    }
}

/// Chat analytics aggregator.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatAnalytics {
    /// Number of messages analysed.
    pub total_messages: usize,
    /// First message time.
    pub start_time: Option<NaiveDateTime>,
    /// Last message time.
    pub end_time: Option<NaiveDateTime>,
    /// Messages per sender, in order of first message.
    pub messages_by_sender: IndexMap<String, usize>,
    /// Messages per hour of day.
    pub hourly: [usize; 24],
    /// Messages per month, labelled like `Jan 2023`, oldest first.
    pub monthly: IndexMap<String, usize>,
    /// How often each sender broke a silence longer than the conversation gap.
    pub conversation_starters: IndexMap<String, usize>,
    /// Longest silence between consecutive messages.
    pub longest_gap: Option<ReplyGap>,
    /// Most frequent words, highest first.
    pub top_words: Vec<(String, usize)>,
    /// Emoji usage.
    pub emoji: EmojiStats,
    /// Media placeholders removed while parsing.
    pub media_count: usize,
    /// Deletion notices per sender.
    pub deleted_messages: IndexMap<String, usize>,
}

impl ChatAnalytics {
    /// Analyse a parsed transcript.
    #[must_use]
    pub fn from_transcript(transcript: &Transcript, options: &AnalyticsOptions) -> Self {
        let mut analytics = Self::from_messages(&transcript.messages, options);
        analytics.media_count = transcript.media_count;
        analytics.deleted_messages = transcript.deleted_messages.clone();
        analytics
    }

    /// Analyse a slice of messages.
    ///
    /// Messages are expected in chronological order, which is what the
    /// parser produces.
    #[must_use]
    pub fn from_messages(messages: &[MessageRecord], options: &AnalyticsOptions) -> Self {
        let mut analytics = Self::default();
        let mut previous: Option<&MessageRecord> = None;
        let mut months: IndexMap<(i32, u32), usize> = IndexMap::new();

        for message in messages {
            analytics.process_message(message);
            *months
                .entry((message.timestamp.year(), message.timestamp.month()))
                .or_insert(0) += 1;

            if let Some(prev) = previous {
                analytics.process_gap(prev, message, options.conversation_gap);
            }
            previous = Some(message);
        }

        months.sort_keys();
        analytics.monthly = months
            .into_iter()
            .filter_map(|((year, month), count)| {
                let label = chrono::NaiveDate::from_ymd_opt(year, month, 1)?.format("%b %Y");
                Some((label.to_string(), count))
            })
            .collect();

        analytics.top_words = top_words(messages, &options.stopwords, options.top_words);
        analytics.emoji = EmojiStats::from_messages(messages, options.top_emojis);
        analytics
    }

    fn process_message(&mut self, message: &MessageRecord) {
        let ts = message.timestamp;
        self.total_messages += 1;

        if self.start_time.map_or(true, |start| ts < start) {
            self.start_time = Some(ts);
        }
        if self.end_time.map_or(true, |end| ts > end) {
            self.end_time = Some(ts);
        }

        *self
            .messages_by_sender
            .entry(message.sender.clone())
            .or_insert(0) += 1;
        self.conversation_starters
            .entry(message.sender.clone())
            .or_insert(0);

        self.hourly[ts.hour() as usize] += 1;
    }

    fn process_gap(&mut self, prev: &MessageRecord, message: &MessageRecord, threshold: Duration) {
        let gap = message.timestamp - prev.timestamp;

        if gap >= threshold {
            *self
                .conversation_starters
                .entry(message.sender.clone())
                .or_insert(0) += 1;
        }

        // Strictly greater, so the earliest of equal gaps is kept.
        if self
            .longest_gap
            .as_ref()
            .map_or(true, |longest| gap.num_seconds() > longest.seconds)
        {
            self.longest_gap = Some(ReplyGap {
                seconds: gap.num_seconds(),
                replied_at: message.timestamp,
                before: prev.body.clone(),
                after: message.body.clone(),
            });
        }
    }

    /// Time between the first and last message.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// Hour of day with the most messages; the earliest hour wins a tie.
    #[must_use]
    pub fn most_active_hour(&self) -> Option<u32> {
        let mut best: Option<(u32, usize)> = None;
        for (hour, &count) in (0u32..).zip(self.hourly.iter()) {
            if count > 0 && best.map_or(true, |(_, c)| count > c) {
                best = Some((hour, count));
            }
        }
        best.map(|(hour, _)| hour)
    }

    /// Senders ordered by message count, highest first.
    #[must_use]
    pub fn top_senders(&self, n: usize) -> Vec<(&str, usize)> {
        let mut senders: Vec<_> = self.messages_by_sender.iter().collect();
        senders.sort_by(|a, b| b.1.cmp(a.1));
        senders.into_iter().take(n).map(|(k, v)| (k.as_str(), *v)).collect()
    }

    /// Sender who started the most conversations.
    #[must_use]
    pub fn top_starter(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (sender, &count) in &self.conversation_starters {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((sender.as_str(), count));
            }
        }
        best
    }

    /// Total deletion notices.
    #[must_use]
    pub fn total_deleted(&self) -> usize {
        self.deleted_messages.values().sum()
    }
}
