// DDL Lexer Implementation
//
// This module implements a lexer that tokenizes CREATE TABLE statements.
// Quoted identifiers (backticks or double quotes) are unwrapped here, so the
// parser never sees quoting syntax.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

/// DDL Token types
#[derive(Debug, PartialEq, Clone)]
pub enum TokenType {
    // Keywords
    CREATE,
    TABLE,
    PRIMARY,
    FOREIGN,
    KEY,
    CONSTRAINT,
    REFERENCES,
    CHECK,
    IN,
    IF,
    NOT,
    NULL,
    EXISTS,
    DEFAULT,
    AutoIncrement,
    NotNull,        // NOT_NULL compatibility literal

    // Literals
    STRING(String),
    NUMBER(String),

    // Identifiers
    IDENTIFIER(String),

    // Operators
    EQUALS,         // =
    LessThan,       // <
    GreaterThan,    // >
    LessEqual,      // <=
    GreaterEqual,   // >=
    NotEqual,       // <> or !=
    PLUS,           // +
    MINUS,          // -
    MULTIPLY,       // *
    DIVIDE,         // /
    MODULO,         // %

    // Punctuation
    COMMA,          // ,
    LeftParen,      // (
    RightParen,     // )
    DOT,            // .

    // Special
    EOF,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenType::CREATE => write!(f, "CREATE"),
            TokenType::TABLE => write!(f, "TABLE"),
            TokenType::PRIMARY => write!(f, "PRIMARY"),
            TokenType::FOREIGN => write!(f, "FOREIGN"),
            TokenType::KEY => write!(f, "KEY"),
            TokenType::CONSTRAINT => write!(f, "CONSTRAINT"),
            TokenType::REFERENCES => write!(f, "REFERENCES"),
            TokenType::CHECK => write!(f, "CHECK"),
            TokenType::IN => write!(f, "IN"),
            TokenType::IF => write!(f, "IF"),
            TokenType::NOT => write!(f, "NOT"),
            TokenType::NULL => write!(f, "NULL"),
            TokenType::EXISTS => write!(f, "EXISTS"),
            TokenType::DEFAULT => write!(f, "DEFAULT"),
            TokenType::AutoIncrement => write!(f, "AUTO_INCREMENT"),
            TokenType::NotNull => write!(f, "NOT_NULL"),
            TokenType::STRING(_) => write!(f, "string"),
            TokenType::NUMBER(_) => write!(f, "number"),
            TokenType::IDENTIFIER(name) if name.is_empty() => write!(f, "identifier"),
            TokenType::IDENTIFIER(name) => write!(f, "identifier \"{}\"", name),
            TokenType::EQUALS => write!(f, "'='"),
            TokenType::LessThan => write!(f, "'<'"),
            TokenType::GreaterThan => write!(f, "'>'"),
            TokenType::LessEqual => write!(f, "'<='"),
            TokenType::GreaterEqual => write!(f, "'>='"),
            TokenType::NotEqual => write!(f, "'<>'"),
            TokenType::PLUS => write!(f, "'+'"),
            TokenType::MINUS => write!(f, "'-'"),
            TokenType::MULTIPLY => write!(f, "'*'"),
            TokenType::DIVIDE => write!(f, "'/'"),
            TokenType::MODULO => write!(f, "'%'"),
            TokenType::COMMA => write!(f, "','"),
            TokenType::LeftParen => write!(f, "'('"),
            TokenType::RightParen => write!(f, "')'"),
            TokenType::DOT => write!(f, "'.'"),
            TokenType::EOF => write!(f, "end of input"),
        }
    }
}

/// A Token represents a lexical unit in the DDL text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    /// Raw source text of the token, quotes included
    pub literal: String,
    /// Byte offset of the first character
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.token_type {
            TokenType::EOF => write!(f, "end of input at line {}, column {}", self.line, self.column),
            _ => write!(
                f,
                "{} `{}` at line {}, column {}",
                self.token_type, self.literal, self.line, self.column
            ),
        }
    }
}

/// Lexical errors. Any of these aborts tokenization of the statement.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenizeError {
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },
    #[error("Unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },
    #[error("Unterminated quoted identifier starting at offset {offset}")]
    UnterminatedIdentifier { offset: usize },
}

/// DDL Lexer for breaking a CREATE TABLE statement into tokens
pub struct Lexer<'a> {
    source: &'a str,
    input: Peekable<CharIndices<'a>>,
    line: usize,
    column: usize,
    offset: usize,
    ch: Option<char>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer from a DDL string
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            source: input,
            input: input.char_indices().peekable(),
            line: 1,
            column: 0,
            offset: 0,
            ch: None,
        };
        lexer.read_char();
        lexer
    }

    /// Read the next character from the input
    fn read_char(&mut self) -> Option<char> {
        match self.input.next() {
            Some((idx, c)) => {
                // A newline moves the position of the character that follows it
                if self.ch == Some('\n') {
                    self.line += 1;
                    self.column = 0;
                }
                self.offset = idx;
                self.column += 1;
                self.ch = Some(c);
            }
            None => {
                if let Some(prev) = self.ch {
                    self.offset += prev.len_utf8();
                    self.column += 1;
                }
                self.ch = None;
            }
        }
        self.ch
    }

    /// Peek at the next character without advancing
    fn peek_char(&mut self) -> Option<char> {
        self.input.peek().map(|&(_, c)| c)
    }

    /// Look `n` characters past the current one
    fn nth_char(&self, n: usize) -> Option<char> {
        self.source[self.offset..].chars().nth(n)
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.ch {
            if ch.is_whitespace() {
                self.read_char();
            } else {
                break;
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> String {
        let start = self.offset;
        while let Some(ch) = self.ch {
            if is_identifier_char(ch) {
                self.read_char();
            } else {
                break;
            }
        }
        self.source[start..self.offset].to_string()
    }

    fn read_digits(&mut self) {
        while let Some(ch) = self.ch {
            if ch.is_ascii_digit() {
                self.read_char();
            } else {
                break;
            }
        }
    }

    /// Read a number: optional sign, optional fraction, optional exponent
    fn read_number(&mut self) -> String {
        let start = self.offset;

        if matches!(self.ch, Some('+') | Some('-')) {
            self.read_char();
        }
        self.read_digits();

        if self.ch == Some('.') && self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.read_char();
            self.read_digits();
        }

        if matches!(self.ch, Some('e') | Some('E')) && self.exponent_follows() {
            self.read_char();
            if matches!(self.ch, Some('+') | Some('-')) {
                self.read_char();
            }
            self.read_digits();
        }

        self.source[start..self.offset].to_string()
    }

    /// Whether the current `e`/`E` starts a well-formed exponent
    fn exponent_follows(&self) -> bool {
        match self.nth_char(1) {
            Some(c) if c.is_ascii_digit() => true,
            Some('+') | Some('-') => self.nth_char(2).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Whether a number starts at the current position
    fn number_starts_here(&self) -> bool {
        let mut n = 0;
        if matches!(self.ch, Some('+') | Some('-')) {
            n = 1;
        }
        match self.nth_char(n) {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => self.nth_char(n + 1).is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        }
    }

    /// Read text enclosed in `quote`, returning it without the quotes.
    /// Returns None if the input ends before the closing quote.
    fn read_quoted(&mut self, quote: char) -> Option<String> {
        // Skip opening quote which is in self.ch
        self.read_char();
        let start = self.offset;

        while let Some(ch) = self.ch {
            if ch == quote {
                let text = self.source[start..self.offset].to_string();
                // Skip closing quote
                self.read_char();
                return Some(text);
            }
            self.read_char();
        }

        None
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Result<Token, TokenizeError> {
        self.skip_whitespace();

        let offset = self.offset;
        let line = self.line;
        let column = self.column;

        let ch = match self.ch {
            Some(ch) => ch,
            None => {
                return Ok(Token {
                    token_type: TokenType::EOF,
                    literal: String::new(),
                    offset,
                    line,
                    column,
                });
            }
        };

        let token_type = match ch {
            '\'' => match self.read_quoted('\'') {
                Some(text) => TokenType::STRING(text),
                None => return Err(TokenizeError::UnterminatedString { offset }),
            },
            '"' | '`' => match self.read_quoted(ch) {
                Some(text) => TokenType::IDENTIFIER(text),
                None => return Err(TokenizeError::UnterminatedIdentifier { offset }),
            },
            '+' | '-' | '.' | '0'..='9' if self.number_starts_here() => {
                TokenType::NUMBER(self.read_number())
            }
            c if is_identifier_start(c) => {
                let identifier = self.read_identifier();
                lookup_identifier(&identifier)
            }
            _ => {
                let token_type = match ch {
                    ',' => TokenType::COMMA,
                    '(' => TokenType::LeftParen,
                    ')' => TokenType::RightParen,
                    '.' => TokenType::DOT,
                    '+' => TokenType::PLUS,
                    '-' => TokenType::MINUS,
                    '*' => TokenType::MULTIPLY,
                    '/' => TokenType::DIVIDE,
                    '%' => TokenType::MODULO,
                    '=' => TokenType::EQUALS,
                    '<' => match self.peek_char() {
                        Some('=') => {
                            self.read_char();
                            TokenType::LessEqual
                        }
                        Some('>') => {
                            self.read_char();
                            TokenType::NotEqual
                        }
                        _ => TokenType::LessThan,
                    },
                    '>' => match self.peek_char() {
                        Some('=') => {
                            self.read_char();
                            TokenType::GreaterEqual
                        }
                        _ => TokenType::GreaterThan,
                    },
                    '!' if self.peek_char() == Some('=') => {
                        self.read_char();
                        TokenType::NotEqual
                    }
                    other => return Err(TokenizeError::UnexpectedCharacter { ch: other, offset }),
                };
                self.read_char();
                token_type
            }
        };

        Ok(Token {
            token_type,
            literal: self.source[offset..self.offset].to_string(),
            offset,
            line,
            column,
        })
    }
}

/// Tokenize a whole statement. The returned stream always ends with EOF.
pub fn tokenize(input: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    loop {
        let token = lexer.next_token()?;
        let is_eof = token.token_type == TokenType::EOF;
        tokens.push(token);
        if is_eof {
            break;
        }
    }

    Ok(tokens)
}

/// Get the token type for a bare word (could be a keyword)
fn lookup_identifier(ident: &str) -> TokenType {
    match ident.to_uppercase().as_str() {
        "CREATE" => TokenType::CREATE,
        "TABLE" => TokenType::TABLE,
        "PRIMARY" => TokenType::PRIMARY,
        "FOREIGN" => TokenType::FOREIGN,
        "KEY" => TokenType::KEY,
        "CONSTRAINT" => TokenType::CONSTRAINT,
        "REFERENCES" => TokenType::REFERENCES,
        "CHECK" => TokenType::CHECK,
        "IN" => TokenType::IN,
        "IF" => TokenType::IF,
        "NOT" => TokenType::NOT,
        "NULL" => TokenType::NULL,
        "EXISTS" => TokenType::EXISTS,
        "DEFAULT" => TokenType::DEFAULT,
        "AUTO_INCREMENT" => TokenType::AutoIncrement,
        "NOT_NULL" => TokenType::NotNull,
        _ => TokenType::IDENTIFIER(ident.to_string()),
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
