//! Streaming tokenizer for syntax coloring
//! Single forward pass with bounded lookahead and delimited sub-scans

use std::fmt;

/// Coloring class assigned to a lexed run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenCategory {
    Default,
    Keyword,
    LineComment,
    BlockComment,
    StringLiteral,
    CharLiteral,
    Number,
}

impl TokenCategory {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Keyword => "keyword",
            Self::LineComment => "line-comment",
            Self::BlockComment => "block-comment",
            Self::StringLiteral => "string",
            Self::CharLiteral => "char",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A contiguous run of source characters plus its category.
/// Tokens are emitted in offset order and concatenate back to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub category: TokenCategory,
}

/// Destination for classified runs. Implemented by the UI layer; the lexer
/// only ever appends in source order.
pub trait StyledTextSink {
    fn append(&mut self, text: &str, category: TokenCategory);
    fn clear(&mut self);
}

impl StyledTextSink for Vec<Token> {
    fn append(&mut self, text: &str, category: TokenCategory) {
        self.push(Token {
            text: text.to_string(),
            category,
        });
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }
}

/// Reserved words of the one supported source language, used for coloring
/// only. Sorted for binary search.
pub const KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "try",
    "void",
    "volatile",
    "while",
];

fn is_keyword(word: &str) -> bool {
    KEYWORDS.binary_search(&word).is_ok()
}

/// Word characters: ASCII letters, digits, underscore
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whitespace as the scanner sees it
fn is_space_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Lexer state: free scanning, or consuming a delimited construct until
/// its terminator appears as a buffer suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Scanning,
    Delimited {
        terminator: &'static str,
        category: TokenCategory,
    },
}

/// The streaming scanner.
///
/// Characters accumulate into a pending buffer; every token boundary is
/// discovered only once a disambiguating trailing character has been read,
/// so emission lags the input by one character. At end of stream whatever
/// remains in the buffer is flushed: delimited constructs keep their
/// category (unterminated comments and strings are accepted silently), a
/// pending scanning buffer goes out as Default since its boundary
/// character never arrived.
#[derive(Debug)]
pub struct LineLexer {
    state: ScanState,
    buffer: String,
}

impl LineLexer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: ScanState::Scanning,
            buffer: String::new(),
        }
    }

    /// Feed a chunk of text, emitting completed runs to the sink.
    /// May leave a partial run buffered; call [`LineLexer::finish`] at end
    /// of stream.
    pub fn feed(&mut self, text: &str, sink: &mut dyn StyledTextSink) {
        for ch in text.chars() {
            self.push_char(ch, sink);
        }
    }

    /// Flush the pending buffer at end of stream and reset the scanner.
    pub fn finish(&mut self, sink: &mut dyn StyledTextSink) {
        if !self.buffer.is_empty() {
            let category = match self.state {
                ScanState::Scanning => TokenCategory::Default,
                ScanState::Delimited { category, .. } => category,
            };
            sink.append(&self.buffer, category);
            self.buffer.clear();
        }
        self.state = ScanState::Scanning;
    }

    /// Tokenize a complete text into the sink
    pub fn scan_into(&mut self, text: &str, sink: &mut dyn StyledTextSink) {
        self.feed(text, sink);
        self.finish(sink);
    }

    fn push_char(&mut self, ch: char, sink: &mut dyn StyledTextSink) {
        self.buffer.push(ch);
        match self.state {
            ScanState::Scanning => self.classify(sink),
            ScanState::Delimited {
                terminator,
                category,
            } => {
                // Terminator is matched against characters read after
                // entry, so an opening quote never closes itself
                if self.buffer.ends_with(terminator) {
                    sink.append(&self.buffer, category);
                    self.buffer.clear();
                    self.state = ScanState::Scanning;
                }
            }
        }
    }

    /// Test the pending buffer after each scanned character, in fixed order
    fn classify(&mut self, sink: &mut dyn StyledTextSink) {
        if self.buffer.chars().all(is_space_char) {
            sink.append(&self.buffer, TokenCategory::Default);
            self.buffer.clear();
            return;
        }
        if self.buffer.starts_with("//") {
            self.state = ScanState::Delimited {
                terminator: "\n",
                category: TokenCategory::LineComment,
            };
            return;
        }
        if self.buffer.starts_with("/*") {
            self.state = ScanState::Delimited {
                terminator: "*/",
                category: TokenCategory::BlockComment,
            };
            return;
        }
        if self.buffer.starts_with('"') {
            self.state = ScanState::Delimited {
                terminator: "\"",
                category: TokenCategory::StringLiteral,
            };
            return;
        }
        if self.buffer.starts_with('\'') {
            self.state = ScanState::Delimited {
                terminator: "'",
                category: TokenCategory::CharLiteral,
            };
            return;
        }

        let last = match self.buffer.chars().last() {
            Some(c) => c,
            None => return,
        };
        if is_word_char(last) {
            // Still inside a word or an undecided run
            return;
        }

        let body_len = self.buffer.len() - last.len_utf8();
        let body = &self.buffer[..body_len];
        if body.is_empty() {
            // A lone non-word character is not yet a token; the next
            // character decides
            return;
        }

        if is_keyword(body) {
            sink.append(body, TokenCategory::Keyword);
            sink.append(&self.buffer[body_len..], TokenCategory::Default);
        } else if body.chars().all(|c| c.is_ascii_digit()) {
            sink.append(body, TokenCategory::Number);
            sink.append(&self.buffer[body_len..], TokenCategory::Default);
        } else {
            // Word runs and mixed runs both flush whole, boundary included
            sink.append(&self.buffer, TokenCategory::Default);
        }
        self.buffer.clear();
    }
}

impl Default for LineLexer {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot tokenization of a complete text
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut lexer = LineLexer::new();
    let mut tokens = Vec::new();
    lexer.scan_into(text, &mut tokens);
    tokens
}
