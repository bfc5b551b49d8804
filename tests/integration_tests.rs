//! Integration tests for chat-wrapped.
//!
//! These tests verify the full parse, clean, export and analytics pipeline
//! using text fixtures and the synthetic transcript generator.

use chat_wrapped::analytics::{AnalyticsOptions, ChatAnalytics};
use chat_wrapped::export::{export_to_file, export_to_string, ExportFormat, ExportOptions};
use chat_wrapped::parser::RejectReason;
use chat_wrapped::{ChatError, ChatParser, Transcript};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

mod generators;

/// Get the path to a fixture file.
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Parse a fixture file with default settings.
fn parse_fixture(name: &str) -> Transcript {
    ChatParser::new()
        .parse_file(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to parse fixture {name}: {e}"))
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

mod parsing {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_simple_chat() {
        let transcript = parse_fixture("simple_chat.txt");

        let summary: Vec<_> = transcript
            .messages
            .iter()
            .map(|m| (m.timestamp, m.sender.as_str(), m.body.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (at(2023, 1, 5, 9, 2), "Alice", "Hey everyone!"),
                (at(2023, 1, 5, 9, 3), "Bob", "hi Alice 👋"),
                (at(2023, 1, 5, 9, 5), "Carol", "Pizza tonight?\nUsual place, 8pm.\nBring cash."),
                (at(2023, 1, 5, 21, 10), "Alice", "see you there 🍕"),
                (at(2023, 1, 6, 10, 15), "Bob", "that was great"),
            ]
        );
    }

    #[test]
    fn test_simple_chat_counters() {
        let transcript = parse_fixture("simple_chat.txt");
        let stats = &transcript.stats;

        assert_eq!(transcript.media_count, 1);
        assert_eq!(transcript.deleted_messages.get("Bob"), Some(&1));
        assert_eq!(transcript.total_deleted(), 1);
        assert_eq!(stats.lines_processed, 12);
        assert_eq!(stats.null_lines, 1);
        assert_eq!(stats.blocks, 8);
        assert_eq!(stats.records_parsed, 5);
        assert_eq!(stats.rejected_for(RejectReason::NoMatch), 2);
        assert_eq!(stats.dropped_by_retention, 0);
        assert_eq!(transcript.senders(), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_twelve_hour_four_digit_year_crlf_bom() {
        let transcript = parse_fixture("new_year_12h.txt");

        let lines: Vec<_> = transcript
            .messages
            .iter()
            .map(|m| m.to_transcript_line())
            .collect();
        assert_eq!(
            lines,
            vec![
                "31/12/23, 23:58 - Dana: almost midnight",
                "31/12/23, 23:59 - Eli: 🎉🎉",
                "01/01/24, 00:00 - Dana: happy new year!",
                "01/01/24, 00:05 - Eli: same to you",
            ]
        );
    }

    #[test]
    fn test_system_notices_are_dropped() {
        let transcript = parse_fixture("system_notices.txt");
        let stats = &transcript.stats;

        let bodies: Vec<_> = transcript.messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["anyone up for football?", "guess not"]);

        assert_eq!(stats.blocks, 7);
        assert_eq!(stats.rejected_for(RejectReason::NoMatch), 3);
        assert_eq!(stats.rejected_for(RejectReason::EmptySender), 1);
        assert_eq!(stats.rejected_for(RejectReason::UnresolvedTimestamp), 1);
        assert_eq!(stats.blocks_rejected(), 5);
        // Collected only on request.
        assert!(stats.rejected.is_empty());
    }

    #[test]
    fn test_report_unrecognized_collects_blocks() {
        let transcript = ChatParser::new()
            .with_report_unrecognized(true)
            .parse_file(fixture_path("system_notices.txt"))
            .unwrap();

        let rejected: Vec<_> = transcript
            .stats
            .rejected
            .iter()
            .map(|b| (b.line, b.reason))
            .collect();
        assert_eq!(
            rejected,
            vec![
                (1, RejectReason::NoMatch),
                (2, RejectReason::NoMatch),
                (4, RejectReason::NoMatch),
                (5, RejectReason::EmptySender),
                (7, RejectReason::UnresolvedTimestamp),
            ]
        );
    }

    #[test]
    fn test_out_of_order_input_is_sorted() {
        let content = "\
2/1/23, 10:00 - Bob: later
1/1/23, 10:00 - Alice: earlier
2/1/23, 09:00 - Carol: middle";
        let transcript = ChatParser::new().parse_str(content);

        let bodies: Vec<_> = transcript.messages.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["earlier", "middle", "later"]);
    }

    #[test]
    fn test_body_with_colons_and_header_lookalikes() {
        let content = "\
5/1/23, 10:00 - Alice: note: time is 10:00 - ok?
see 5/1/23 in the calendar
5/1/23, 10:01 - Bob: fine";
        let transcript = ChatParser::new().parse_str(content);

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.messages[0].sender, "Alice");
        assert_eq!(
            transcript.messages[0].body,
            "note: time is 10:00 - ok?\nsee 5/1/23 in the calendar"
        );
    }
}

mod clean_output {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cleaned_simple_chat() {
        let transcript = parse_fixture("simple_chat.txt");
        let cleaned = export_to_string(&transcript, ExportFormat::Text, &ExportOptions::default()).unwrap();

        assert_eq!(
            cleaned,
            "\
05/01/23, 09:02 - Alice: Hey everyone!
05/01/23, 09:03 - Bob: hi Alice 👋
05/01/23, 09:05 - Carol: Pizza tonight?
Usual place, 8pm.
Bring cash.
05/01/23, 21:10 - Alice: see you there 🍕
06/01/23, 10:15 - Bob: that was great
"
        );
    }

    #[test]
    fn test_reparse_is_idempotent() {
        for fixture in ["simple_chat.txt", "new_year_12h.txt", "system_notices.txt"] {
            let first = parse_fixture(fixture);
            let cleaned = first.to_transcript_text();
            let second = ChatParser::new().parse_str(&cleaned);

            assert_eq!(second.messages, first.messages, "fixture {fixture}");
            assert_eq!(second.stats.blocks_rejected(), 0, "fixture {fixture}");
        }
    }
}

mod export {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_export_to_file() {
        let transcript = parse_fixture("simple_chat.txt");
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("chat.json");

        export_to_file(&transcript, &path, ExportFormat::Json, &ExportOptions::default()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["messages"].as_array().unwrap().len(), 5);
        assert_eq!(value["media_count"], 1);
        assert_eq!(value["deleted_messages"]["Bob"], 1);
        assert_eq!(value["messages"][2]["sender"], "Carol");
        assert_eq!(value["messages"][0]["timestamp"], "2023-01-05T09:02:00");
    }

    #[test]
    fn test_csv_export() {
        let transcript = parse_fixture("new_year_12h.txt");
        let csv = export_to_string(&transcript, ExportFormat::Csv, &ExportOptions::default()).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("timestamp,sender,body"));
        assert_eq!(lines.next(), Some("2023-12-31 23:58,Dana,almost midnight"));
        assert_eq!(csv.lines().count(), 5);
    }
}

mod analytics {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_analytics_on_fixture() {
        let transcript = parse_fixture("simple_chat.txt");
        let analytics = ChatAnalytics::from_transcript(&transcript, &AnalyticsOptions::default());

        assert_eq!(analytics.total_messages, 5);
        assert_eq!(analytics.messages_by_sender.get("Alice"), Some(&2));
        assert_eq!(analytics.most_active_hour(), Some(9));
        assert_eq!(analytics.media_count, 1);
        assert_eq!(analytics.total_deleted(), 1);
        assert_eq!(analytics.emoji.total, 2);

        let gap = analytics.longest_gap.as_ref().unwrap();
        assert_eq!(gap.before, "see you there 🍕");
        assert_eq!(gap.after, "that was great");

        // 9:05 -> 21:10 and 21:10 -> 10:15 both exceed four hours.
        assert_eq!(analytics.conversation_starters.get("Alice"), Some(&1));
        assert_eq!(analytics.conversation_starters.get("Bob"), Some(&1));
    }
}

mod edge_cases {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        let transcript = ChatParser::new().parse_str("");
        assert!(transcript.is_empty());
        assert!(matches!(
            transcript.require_messages(),
            Err(ChatError::NoMessages { lines: 0 })
        ));
    }

    #[test]
    fn test_whitespace_only() {
        let transcript = ChatParser::new().parse_str("\n\n   \n\t\n");
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_not_a_chat_export() {
        let transcript = ChatParser::new().parse_str("# README\n\nThis is not a chat.\n");
        assert!(matches!(
            transcript.require_messages(),
            Err(ChatError::NoMessages { lines: 3 })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = ChatParser::new().parse_file(fixture_path("does_not_exist.txt"));
        assert!(matches!(result, Err(ChatError::FileNotFound { .. })));
    }

    #[test]
    fn test_invalid_utf8_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, b"5/1/23, 10:00 - Jos\xe9: hola\n").unwrap();

        let err = ChatParser::new().parse_file(&path).unwrap_err();
        assert!(matches!(err, ChatError::InvalidUtf8 { .. }));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_custom_media_marker() {
        let content = "5/1/23, 10:00 - Alice: <Medien ausgeschlossen>\n5/1/23, 10:01 - Bob: ok";
        let transcript = ChatParser::new()
            .with_media_markers(["<Medien ausgeschlossen>"])
            .parse_str(content);

        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.media_count, 1);
    }
}

mod generated_data {
    use super::generators::{generate_transcript_string, TranscriptConfig};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_generated_minimal() {
        let (text, summary) = generate_transcript_string(&TranscriptConfig::minimal());
        let transcript = ChatParser::new().parse_str(&text);

        assert_eq!(summary.messages, 5);
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript.senders(), vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_parse_generated_with_noise() {
        let (text, summary) = generate_transcript_string(&TranscriptConfig::large());
        let transcript = ChatParser::new().parse_str(&text);

        assert_eq!(transcript.len(), summary.messages);
        assert_eq!(transcript.media_count, summary.media);
        assert_eq!(transcript.total_deleted(), summary.deleted);
        assert_eq!(transcript.stats.null_lines, summary.nulls);
        assert_eq!(transcript.stats.rejected_for(RejectReason::NoMatch), summary.notices);
        assert!(transcript.messages.iter().any(|m| m.is_multiline()));
    }

    #[test]
    fn test_twelve_hour_four_digit_year_matches_24_hour() {
        let base = TranscriptConfig {
            entries: 200,
            ..Default::default()
        };
        let (text_24, _) = generate_transcript_string(&base);
        let (text_12, _) = generate_transcript_string(&TranscriptConfig {
            twelve_hour: true,
            four_digit_year: true,
            ..base
        });

        let a = ChatParser::new().parse_str(&text_24);
        let b = ChatParser::new().parse_str(&text_12);
        assert_eq!(a.messages, b.messages);
    }
}

mod large_file_handling {
    use super::generators::{generate_transcript_string, TranscriptConfig};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_cap_keeps_most_recent() {
        let (text, summary) = generate_transcript_string(&TranscriptConfig::huge());
        assert!(summary.messages > 16_000);

        let transcript = ChatParser::new().parse_str(&text);
        let full = ChatParser::new()
            .with_retention_cap(usize::MAX)
            .parse_str(&text);

        assert_eq!(transcript.len(), 16_000);
        assert_eq!(transcript.stats.records_parsed, summary.messages);
        assert_eq!(transcript.stats.dropped_by_retention, summary.messages - 16_000);
        assert_eq!(
            transcript.messages.as_slice(),
            &full.messages[full.len() - 16_000..]
        );
    }

    #[test]
    fn test_large_file_round_trip_through_disk() {
        let (text, _) = generate_transcript_string(&TranscriptConfig::large());
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("chat.txt");
        let output = dir.path().join("cleaned.txt");
        std::fs::write(&input, &text).unwrap();

        let transcript = ChatParser::new().parse_file(&input).unwrap();
        export_to_file(&transcript, &output, ExportFormat::Text, &ExportOptions::default()).unwrap();
        let reparsed = ChatParser::new().parse_file(&output).unwrap();

        assert_eq!(reparsed.messages, transcript.messages);
    }
}
