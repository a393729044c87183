//! Statement extraction
//!
//! Scans raw dump text for `CREATE TABLE` and `INSERT INTO` statements with a
//! single-pass byte cursor instead of regular expressions, so adversarial
//! input cannot trigger backtracking blowups. The grammar is deliberately
//! tolerant: keywords are case-insensitive, identifiers may be backtick
//! quoted, the final statement may omit its semicolon, and anything that does
//! not parse is skipped rather than reported.
//!
//! String literals, `--` line comments and `/* */` block comments are skipped
//! while searching for keywords, so a `CREATE TABLE` inside a comment or a
//! quoted value is never picked up.

use tracing::debug;

/// One `CREATE TABLE name ( body )` match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    /// Table name with backticks stripped.
    pub name: String,
    /// Inner text of the parenthesized column list, verbatim.
    pub body: String,
}

/// One `INSERT INTO name (cols) VALUES (...), (...)` match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insert {
    /// Target table name with backticks stripped.
    pub table: String,
    /// Declared column names, in order, backticks stripped.
    pub columns: Vec<String>,
    /// Inner text of each VALUES tuple, one entry per row.
    pub tuples: Vec<String>,
}

/// Extract every CREATE TABLE statement from the dump.
pub fn create_tables(sql: &str) -> Vec<CreateTable> {
    let mut found = Vec::new();
    let mut cur = Cursor::new(sql);

    while cur.seek_keyword("CREATE") {
        let checkpoint = cur.pos;
        if let Some(stmt) = cur.read_create_table() {
            debug!(table = %stmt.name, "matched CREATE TABLE");
            found.push(stmt);
        } else {
            // Not a table definition (CREATE INDEX, VIEW, ...); resume after
            // the keyword so nested matches are not skipped.
            cur.pos = checkpoint;
        }
    }
    found
}

/// Extract every INSERT INTO statement from the dump.
pub fn inserts(sql: &str) -> Vec<Insert> {
    let mut found = Vec::new();
    let mut cur = Cursor::new(sql);

    while cur.seek_keyword("INSERT") {
        let checkpoint = cur.pos;
        if let Some(stmt) = cur.read_insert() {
            debug!(table = %stmt.table, rows = stmt.tuples.len(), "matched INSERT INTO");
            found.push(stmt);
        } else {
            cur.pos = checkpoint;
        }
    }
    found
}

struct Cursor<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Advance to the next occurrence of `keyword` at a word boundary,
    /// skipping string literals and comments. Leaves the cursor just past the
    /// keyword and returns true, or consumes the rest of the input and
    /// returns false.
    fn seek_keyword(&mut self, keyword: &str) -> bool {
        while !self.eof() {
            match self.bytes[self.pos] {
                b'\'' | b'"' => self.skip_quoted(),
                b'-' if self.peek_at(self.pos + 1) == Some(b'-') => self.skip_line_comment(),
                b'/' if self.peek_at(self.pos + 1) == Some(b'*') => self.skip_block_comment(),
                c if c.is_ascii_alphabetic() => {
                    let start = self.pos;
                    let at_boundary = start == 0 || !is_word_byte(self.bytes[start - 1]);
                    let word = self.read_word();
                    if at_boundary && word.eq_ignore_ascii_case(keyword) {
                        return true;
                    }
                }
                _ => self.pos += 1,
            }
        }
        false
    }

    /// CREATE already consumed: `TABLE <name> ( <body> ) ;?`
    fn read_create_table(&mut self) -> Option<CreateTable> {
        self.skip_ws();
        if !self.eat_keyword("TABLE") {
            return None;
        }
        self.skip_ws();
        let name = self.read_table_name()?;
        self.skip_ws();
        let body = self.read_paren_group()?;
        self.skip_ws();
        self.eat_byte(b';'); // optional terminator
        Some(CreateTable {
            name,
            body: body.to_string(),
        })
    }

    /// INSERT already consumed: `INTO <name> ( <cols> ) VALUES ( .. ), .. ;?`
    fn read_insert(&mut self) -> Option<Insert> {
        self.skip_ws();
        if !self.eat_keyword("INTO") {
            return None;
        }
        self.skip_ws();
        let table = self.read_table_name()?;
        self.skip_ws();
        let column_list = self.read_paren_group()?;
        let columns: Vec<String> = column_list
            .split(',')
            .map(|c| c.trim().trim_matches('`').to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if columns.is_empty() {
            return None;
        }
        self.skip_ws();
        if !self.eat_keyword("VALUES") {
            return None;
        }

        let mut tuples = Vec::new();
        loop {
            self.skip_ws();
            match self.read_paren_group() {
                Some(tuple) => tuples.push(tuple.to_string()),
                None => break,
            }
            self.skip_ws();
            if !self.eat_byte(b',') {
                break;
            }
        }
        if tuples.is_empty() {
            return None;
        }
        self.skip_ws();
        self.eat_byte(b';');
        Some(Insert {
            table,
            columns,
            tuples,
        })
    }

    /// Read a balanced `( ... )` group and return the inner text. Quoted
    /// literals are opaque to the depth counter. A group left open at end of
    /// input is closed implicitly there.
    fn read_paren_group(&mut self) -> Option<&'a str> {
        if !self.eat_byte(b'(') {
            return None;
        }
        let start = self.pos;
        let mut depth = 1usize;
        while !self.eof() {
            match self.bytes[self.pos] {
                b'\'' | b'"' => self.skip_quoted(),
                b'(' => {
                    depth += 1;
                    self.pos += 1;
                }
                b')' => {
                    depth -= 1;
                    self.pos += 1;
                    if depth == 0 {
                        return Some(&self.src[start..self.pos - 1]);
                    }
                }
                _ => self.pos += 1,
            }
        }
        Some(&self.src[start..])
    }

    /// Read a possibly schema-qualified table name, keeping the last segment.
    fn read_table_name(&mut self) -> Option<String> {
        let mut name = self.read_identifier()?;
        while self.eat_byte(b'.') {
            match self.read_identifier() {
                Some(segment) => name = segment,
                None => break,
            }
        }
        Some(name)
    }

    /// Read an identifier, optionally backtick quoted. Backticks are stripped.
    fn read_identifier(&mut self) -> Option<String> {
        if self.eat_byte(b'`') {
            let start = self.pos;
            while !self.eof() && self.bytes[self.pos] != b'`' {
                self.pos += 1;
            }
            let name = &self.src[start..self.pos];
            self.eat_byte(b'`');
            return (!name.is_empty()).then(|| name.to_string());
        }
        let start = self.pos;
        while !self.eof() && is_word_byte(self.bytes[self.pos]) {
            self.pos += 1;
        }
        (self.pos > start).then(|| self.src[start..self.pos].to_string())
    }

    /// Consume `keyword` (case-insensitive, word-bounded) if present.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let start = self.pos;
        let word = self.read_word();
        if word.eq_ignore_ascii_case(keyword) {
            true
        } else {
            self.pos = start;
            false
        }
    }

    fn read_word(&mut self) -> &'a str {
        let start = self.pos;
        while !self.eof() && is_word_byte(self.bytes[self.pos]) {
            self.pos += 1;
        }
        &self.src[start..self.pos]
    }

    fn eat_byte(&mut self, b: u8) -> bool {
        if !self.eof() && self.bytes[self.pos] == b {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn peek_at(&self, idx: usize) -> Option<u8> {
        self.bytes.get(idx).copied()
    }

    fn skip_ws(&mut self) {
        while !self.eof() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// Skip a quoted literal, honoring doubled-quote escapes. An unterminated
    /// literal consumes the rest of the input.
    fn skip_quoted(&mut self) {
        let quote = self.bytes[self.pos];
        self.pos += 1;
        while !self.eof() {
            if self.bytes[self.pos] == quote {
                self.pos += 1;
                if self.peek_at(self.pos) == Some(quote) {
                    self.pos += 1; // escaped quote
                } else {
                    return;
                }
            } else {
                self.pos += 1;
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while !self.eof() && self.bytes[self.pos] != b'\n' {
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        while self.pos + 1 < self.bytes.len() {
            if self.bytes[self.pos] == b'*' && self.bytes[self.pos + 1] == b'/' {
                self.pos += 2;
                return;
            }
            self.pos += 1;
        }
        self.pos = self.bytes.len();
    }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
