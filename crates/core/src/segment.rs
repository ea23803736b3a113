//! Sentence-per-line reflow.
//!
//! Model output arrives with arbitrary line breaks. The segmenter reflows it
//! so that each output line carries at most one sentence-like unit, which is
//! what the structural line-count gate and the reviewers' chat UI expect.

/// Punctuation that terminates a sentence fragment.
///
/// The set is exactly period, Arabic question mark and exclamation mark; an
/// ASCII question mark does not terminate a fragment.
const TERMINAL_MARKS: [char; 3] = ['.', '؟', '!'];

/// Reflows `text` into one sentence fragment per line.
///
/// Splits the input on line breaks, drops lines that are empty after
/// trimming, and splits every remaining line at terminal punctuation. A line
/// without terminal punctuation is kept whole. Fragment order follows input
/// order, and no non-whitespace character is ever dropped: a run of
/// consecutive terminal marks stays attached to the fragment it ends.
///
/// Pure and total.
pub fn segment(text: &str) -> String {
    let mut fragments: Vec<String> = Vec::new();
    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        split_fragments(trimmed, &mut fragments);
    }
    fragments.join("\n")
}

/// Splits one trimmed line into sentence fragments.
///
/// A fragment is a maximal run of characters ending in a run of terminal
/// marks; trailing text without a terminal mark forms a final fragment.
fn split_fragments(line: &str, fragments: &mut Vec<String>) {
    let mut buf = String::new();
    let mut in_terminal_run = false;

    for ch in line.chars() {
        let terminal = TERMINAL_MARKS.contains(&ch);
        if in_terminal_run && !terminal {
            push_fragment(&buf, fragments);
            buf.clear();
            in_terminal_run = false;
        }
        buf.push(ch);
        if terminal {
            in_terminal_run = true;
        }
    }
    push_fragment(&buf, fragments);
}

fn push_fragment(buf: &str, fragments: &mut Vec<String>) {
    let fragment = buf.trim();
    if !fragment.is_empty() {
        fragments.push(fragment.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_splits_sentences_onto_separate_lines() {
        let out = segment("سلامتك 🌸 الألم بسيط. يُفضل مراجعة العيادة.");
        assert_eq!(
            out,
            "سلامتك 🌸 الألم بسيط.\nيُفضل مراجعة العيادة."
        );
    }

    #[test]
    fn test_segment_handles_arabic_question_and_exclamation_marks() {
        let out = segment("هل الألم مستمر؟ راجعي العيادة!");
        assert_eq!(out, "هل الألم مستمر؟\nراجعي العيادة!");
    }

    #[test]
    fn test_segment_keeps_line_without_terminal_punctuation_whole() {
        assert_eq!(segment("سطر بدون علامة ختام"), "سطر بدون علامة ختام");
    }

    #[test]
    fn test_segment_drops_blank_lines() {
        let out = segment("الأول.\n\n   \nالثاني.");
        assert_eq!(out, "الأول.\nالثاني.");
    }

    #[test]
    fn test_segment_handles_crlf_line_breaks() {
        let out = segment("الأول.\r\nالثاني.");
        assert_eq!(out, "الأول.\nالثاني.");
    }

    #[test]
    fn test_segment_ascii_question_mark_is_not_a_terminator() {
        assert_eq!(segment("هل الألم مستمر? راجعي العيادة"), "هل الألم مستمر? راجعي العيادة");
    }

    #[test]
    fn test_segment_keeps_consecutive_terminal_marks_together() {
        assert_eq!(segment("انتهى الأمر... التالي."), "انتهى الأمر...\nالتالي.");
    }

    #[test]
    fn test_segment_empty_input_yields_empty_output() {
        assert_eq!(segment(""), "");
        assert_eq!(segment("   \n  \n"), "");
    }

    #[test]
    fn test_segment_preserves_every_non_whitespace_character() {
        let inputs = [
            "سلامتك 🌸 الألم بسيط. يُفضل مراجعة العيادة.",
            "؟؟ نص يبدأ بعلامة.",
            "a.b!c؟d",
            "سطر\nآخر. وثالث!",
        ];
        for input in inputs {
            let out = segment(input);
            let mut input_chars: Vec<char> =
                input.chars().filter(|c| !c.is_whitespace()).collect();
            let mut out_chars: Vec<char> = out.chars().filter(|c| !c.is_whitespace()).collect();
            input_chars.sort_unstable();
            out_chars.sort_unstable();
            assert_eq!(input_chars, out_chars, "content changed for {input:?}");
        }
    }
}
