use unicode_segmentation::UnicodeSegmentation;

use crate::paragraph::Paragraph;

/// Split raw text into paragraphs on blank lines.
///
/// Lines holding only whitespace separate paragraphs; runs of them never
/// produce empty paragraphs. Each paragraph keeps the byte range it covers in
/// `text`, trailing line breaks excluded.
pub fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if line.trim().is_empty() {
            if let Some(begin) = start.take() {
                push_paragraph(&mut paragraphs, text, begin, end);
            }
            continue;
        }

        if start.is_none() {
            start = Some(line_start);
        }
        end = line_start + line.trim_end().len();
    }

    if let Some(begin) = start {
        push_paragraph(&mut paragraphs, text, begin, end);
    }

    paragraphs
}

fn push_paragraph(paragraphs: &mut Vec<Paragraph>, text: &str, start: usize, end: usize) {
    let index = paragraphs.len();
    paragraphs.push(Paragraph::new(index, text[start..end].to_string(), (start, end)));
}

/// UAX #29 sentence boundaries, trimmed, empty pieces dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lower-cased word tokens; punctuation and whitespace are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}
