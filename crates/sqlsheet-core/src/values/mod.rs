//! VALUES tuple tokenizer
//!
//! Splits the inner text of one `VALUES (...)` tuple into literal tokens. The
//! scan keeps a single "inside quotes" flag plus the opening quote character;
//! a doubled quote inside a span is an escaped literal quote. Commas outside
//! any quoted span separate tokens. Dumps in the wild truncate mid-literal,
//! so an unterminated span is closed implicitly at end of input.

/// Whether the opening/closing quote characters are kept on emitted tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteMode {
    /// Keep quote delimiters on the token (used for type sampling).
    Keep,
    /// Drop quote delimiters, emit only the content (used for row values).
    Strip,
}

/// Tokenize a tuple body, keeping quote delimiters on quoted tokens.
///
/// `a,'b,c',d` → `["a", "'b,c'", "d"]`. Escaped quotes are still collapsed:
/// `'O''Brien'` → `'O'Brien'`.
pub fn tokenize_keeping_quotes(tuple: &str) -> Vec<String> {
    scan(tuple, QuoteMode::Keep)
}

/// Tokenize a tuple body, stripping quote delimiters from quoted tokens.
///
/// `a,'b,c',d` → `["a", "b,c", "d"]` and `'O''Brien'` → `O'Brien`.
pub fn tokenize(tuple: &str) -> Vec<String> {
    scan(tuple, QuoteMode::Strip)
}

fn scan(tuple: &str, mode: QuoteMode) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    let mut chars = tuple.chars().peekable();
    while let Some(ch) = chars.next() {
        match quote {
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    if mode == QuoteMode::Keep {
                        current.push(ch);
                    }
                }
                ',' => {
                    tokens.push(std::mem::take(&mut current).trim().to_string());
                }
                _ => current.push(ch),
            },
            Some(q) if ch == q => {
                if chars.peek() == Some(&q) {
                    // doubled quote: two input chars, one literal quote out
                    current.push(ch);
                    chars.next();
                } else {
                    quote = None;
                    if mode == QuoteMode::Keep {
                        current.push(ch);
                    }
                }
            }
            Some(_) => current.push(ch),
        }
    }

    // Unterminated span closes at end of input; re-add the delimiter so the
    // token still reads as quoted in Keep mode.
    if quote.is_some() && mode == QuoteMode::Keep {
        if let Some(q) = quote {
            current.push(q);
        }
    }

    let last = current.trim();
    if !last.is_empty() {
        tokens.push(last.to_string());
    }
    tokens
}
