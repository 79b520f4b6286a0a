//! Transcript normalization.
//!
//! Both speech backends reduce to the same conversation text: one paragraph
//! per utterance, `Speaker <id>: <text>`, separated by blank lines. Input
//! order is preserved; nothing is re-sorted by speaker or time.

use crate::transcription::{Utterance, WordSegment};

/// Render diarized utterances as conversation text, one paragraph each,
/// in input order.
pub fn from_utterances(utterances: &[Utterance]) -> String {
    let mut out = String::new();
    for u in utterances {
        out.push_str(&format!(
            "Speaker {}: {}\n\n",
            canonical_speaker(&u.speaker),
            u.text
        ));
    }
    out
}

/// Render word-level output as conversation text. Consecutive words with the
/// same speaker are joined into one utterance; a speaker change starts a new
/// paragraph.
pub fn from_word_segments(words: &[WordSegment]) -> String {
    let mut utterances: Vec<Utterance> = Vec::new();

    for w in words {
        match utterances.last_mut() {
            Some(last) if last.speaker == w.speaker => {
                last.text.push(' ');
                last.text.push_str(&w.word);
            }
            _ => utterances.push(Utterance::new(&w.speaker, &w.word)),
        }
    }

    from_utterances(&utterances)
}

/// Map backend speaker labels onto the uniform id used in the output.
/// Deepgram emits bare indices ("0"), WhisperX emits "SPEAKER_00" style
/// labels. Labels that do not reduce to a number are kept verbatim.
pub fn canonical_speaker(label: &str) -> String {
    let stripped = label.strip_prefix("SPEAKER_").unwrap_or(label);

    if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
        let trimmed = stripped.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_paragraph_per_utterance_in_order() {
        let utterances = vec![
            Utterance::new("0", "Hi there."),
            Utterance::new("1", "Hello."),
            Utterance::new("0", "How have you been?"),
        ];

        let text = from_utterances(&utterances);
        assert_eq!(
            text,
            "Speaker 0: Hi there.\n\nSpeaker 1: Hello.\n\nSpeaker 0: How have you been?\n\n"
        );
    }

    #[test]
    fn test_repeated_speaker_utterances_stay_separate() {
        // Utterance-level input is never merged, even for the same speaker.
        let utterances = vec![
            Utterance::new("2", "First thought."),
            Utterance::new("2", "Second thought."),
        ];

        let text = from_utterances(&utterances);
        assert_eq!(text.matches("Speaker 2:").count(), 2);
    }

    #[test]
    fn test_empty_input_yields_empty_text() {
        assert_eq!(from_utterances(&[]), "");
        assert_eq!(from_word_segments(&[]), "");
    }

    #[test]
    fn test_words_grouped_by_speaker() {
        let words = vec![
            WordSegment::new("Good", "SPEAKER_00"),
            WordSegment::new("morning", "SPEAKER_00"),
            WordSegment::new("everyone.", "SPEAKER_00"),
            WordSegment::new("Morning!", "SPEAKER_01"),
            WordSegment::new("Shall", "SPEAKER_00"),
            WordSegment::new("we", "SPEAKER_00"),
            WordSegment::new("start?", "SPEAKER_00"),
        ];

        let text = from_word_segments(&words);
        assert_eq!(
            text,
            "Speaker 0: Good morning everyone.\n\nSpeaker 1: Morning!\n\nSpeaker 0: Shall we start?\n\n"
        );
    }

    #[test]
    fn test_word_grouping_preserves_segment_order() {
        // Speaker 1 speaks first; output must not be re-sorted by speaker id.
        let words = vec![
            WordSegment::new("After", "1"),
            WordSegment::new("you.", "1"),
            WordSegment::new("Thanks.", "0"),
        ];

        let text = from_word_segments(&words);
        let first = text.find("Speaker 1:").unwrap();
        let second = text.find("Speaker 0:").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_canonical_speaker_labels() {
        assert_eq!(canonical_speaker("0"), "0");
        assert_eq!(canonical_speaker("12"), "12");
        assert_eq!(canonical_speaker("SPEAKER_00"), "0");
        assert_eq!(canonical_speaker("SPEAKER_07"), "7");
        assert_eq!(canonical_speaker("SPEAKER_10"), "10");
        // non-numeric labels pass through untouched
        assert_eq!(canonical_speaker("moderator"), "moderator");
        assert_eq!(canonical_speaker("SPEAKER_AB"), "SPEAKER_AB");
    }
}
