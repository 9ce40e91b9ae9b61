use serde::Serialize;

/// Origin of a transcript line
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Input,
    Output,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub kind: EntryKind,
    pub text: String,
}

/// Everything shown on the learner's terminal during one attempt, in order
#[derive(Serialize, Debug, Default, Clone)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn push_input(&mut self, text: String) {
        self.entries.push(TranscriptEntry {
            kind: EntryKind::Input,
            text,
        });
    }

    pub fn push_output(&mut self, text: String) {
        self.entries.push(TranscriptEntry {
            kind: EntryKind::Output,
            text,
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Accumulates printed text for display and for grading
///
/// Predicates never look at the raw text. They see [`tokens_as_text`],
/// which lowercases and collapses all whitespace, so spacing and blank
/// lines never affect a verdict.
///
/// [`tokens_as_text`]: OutputCapture::tokens_as_text
#[derive(Debug, Default)]
pub struct OutputCapture {
    transcript: Transcript,
    tokens: Vec<String>,
}

impl OutputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, text: &str) {
        self.transcript.push_output(text.to_string());
        self.tokens
            .extend(text.to_lowercase().split_whitespace().map(str::to_string));
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn tokens_as_text(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Input echoes share the terminal with printed text
    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        self.tokens.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_lowercased_and_split() {
        let mut capture = OutputCapture::new();
        capture.write("A B");
        capture.write("c");
        assert_eq!(capture.tokens(), ["a", "b", "c"]);
        assert_eq!(capture.tokens_as_text(), "a b c");
    }

    #[test]
    fn test_whitespace_never_reaches_tokens() {
        let mut capture = OutputCapture::new();
        capture.write("  Hello \n\n\t World!!  \n");
        assert_eq!(capture.tokens_as_text(), "hello world!!");
        assert_eq!(capture.transcript().len(), 1);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut capture = OutputCapture::new();
        capture.write("x");
        capture.transcript_mut().push_input("> 1".to_string());
        capture.clear();
        assert!(capture.tokens().is_empty());
        assert!(capture.transcript().is_empty());
    }
}
