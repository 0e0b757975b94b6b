//! Sanitisation of model output before it is spoken back by the agent platform.
//!
//! Rules, applied in order:
//! - keep chars that are alphabetic, numeric or whitespace (Unicode-aware); drop the rest,
//!   including the `.` of numbered points and markdown punctuation
//! - replace each run of two or more whitespace chars with one space
//! - trim both ends
//!
//! `is_alphabetic` follows the Unicode `Alphabetic` property, which covers dependent vowel
//! signs, so Devanagari matras stay attached to their letters.

/// Strip symbols and punctuation and normalise whitespace. Idempotent.
pub fn clean(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = WhitespaceRun::default();

    for ch in text.chars().filter(|c| is_kept(*c)) {
        if ch.is_whitespace() {
            run.extend(ch);
        } else {
            run.flush_into(&mut out);
            out.push(ch);
        }
    }
    run.flush_into(&mut out);

    out.trim().to_string()
}

fn is_kept(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_numeric() || ch.is_whitespace()
}

#[derive(Default)]
struct WhitespaceRun {
    first: Option<char>,
    len: usize,
}

impl WhitespaceRun {
    fn extend(&mut self, ch: char) {
        self.first.get_or_insert(ch);
        self.len += 1;
    }

    fn flush_into(&mut self, out: &mut String) {
        match (self.first, self.len) {
            (Some(ch), 1) => out.push(ch),
            (Some(_), _) => out.push(' '),
            (None, _) => {}
        }
        *self = Self::default();
    }
}
