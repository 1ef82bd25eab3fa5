// Core Parser Implementation
//
// This module implements the token cursor shared by the grammar rules.
// The token stream always ends with EOF, so the cursor never runs dry.

use std::iter::Peekable;
use std::vec::IntoIter;

use thiserror::Error;

use crate::ddl::parser::lexer::{tokenize, Token, TokenType, TokenizeError};

/// DDL parsing errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Expected {}, found {found}", describe_expected(.expected))]
    ExpectedToken { expected: Vec<TokenType>, found: Token },
    #[error("Unexpected {0}")]
    UnexpectedToken(Token),
}

impl ParseError {
    /// The token the parser stopped at
    pub fn found(&self) -> &Token {
        match self {
            ParseError::ExpectedToken { found, .. } => found,
            ParseError::UnexpectedToken(found) => found,
        }
    }
}

fn describe_expected(expected: &[TokenType]) -> String {
    let names: Vec<String> = expected.iter().map(|t| t.to_string()).collect();
    match names.len() {
        0 => "nothing".to_string(),
        1 => names[0].clone(),
        n => format!("{} or {}", names[..n - 1].join(", "), names[n - 1]),
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// DDL Parser for constructing an AST from tokens
pub struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    pub current_token: Token,
}

impl Parser {
    /// Create a new parser from a DDL string
    pub fn new(input: &str) -> Result<Self, TokenizeError> {
        Ok(Parser::from_tokens(tokenize(input)?))
    }

    /// Create a parser from an already tokenized statement
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        let (offset, line, column) = tokens
            .last()
            .map(|t| (t.offset + t.literal.len(), t.line, t.column + t.literal.chars().count()))
            .unwrap_or((0, 1, 1));
        let eof = Token {
            token_type: TokenType::EOF,
            literal: String::new(),
            offset,
            line,
            column,
        };
        if tokens.last().is_none_or(|t| t.token_type != TokenType::EOF) {
            tokens.push(eof.clone());
        }

        let mut tokens = tokens.into_iter().peekable();
        let current_token = tokens.next().unwrap_or(eof);

        Parser {
            tokens,
            current_token,
        }
    }

    /// Advance to the next token, returning the one just consumed.
    /// The cursor stays on EOF once it gets there.
    pub fn next_token(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => std::mem::replace(&mut self.current_token, token),
            None => self.current_token.clone(),
        }
    }

    /// Peek at the token after the current one
    pub fn peek_token(&mut self) -> Option<&Token> {
        self.tokens.peek()
    }

    /// Check if the current token is of the given type
    pub fn current_token_is(&self, token_type: &TokenType) -> bool {
        matches_token_type(&self.current_token.token_type, token_type)
    }

    /// Consume the current token if it is of the given type
    pub fn consume_if(&mut self, token_type: &TokenType) -> bool {
        if self.current_token_is(token_type) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Check if the current token matches the expected type and consume it
    pub fn expect_token(&mut self, expected: TokenType) -> ParseResult<Token> {
        if self.current_token_is(&expected) {
            Ok(self.next_token())
        } else {
            Err(self.expected(vec![expected]))
        }
    }

    /// Build an error for the current token
    pub fn expected(&self, expected: Vec<TokenType>) -> ParseError {
        ParseError::ExpectedToken {
            expected,
            found: self.current_token.clone(),
        }
    }

    /// Parse an identifier (common utility)
    pub fn parse_identifier(&mut self) -> ParseResult<String> {
        match &self.current_token.token_type {
            TokenType::IDENTIFIER(name) => {
                let identifier = name.clone();
                self.next_token();
                Ok(identifier)
            }
            _ => Err(self.expected(vec![TokenType::IDENTIFIER(String::new())])),
        }
    }

    /// Parse a numeric literal, returning its source text
    pub fn parse_number(&mut self) -> ParseResult<String> {
        match &self.current_token.token_type {
            TokenType::NUMBER(text) => {
                let number = text.clone();
                self.next_token();
                Ok(number)
            }
            _ => Err(self.expected(vec![TokenType::NUMBER(String::new())])),
        }
    }

    /// Fail unless every token has been consumed
    pub fn expect_end(&mut self) -> ParseResult<()> {
        self.expect_token(TokenType::EOF).map(|_| ())
    }
}

/// Helper function to check if a token type matches the expected type
pub fn matches_token_type(token_type: &TokenType, expected: &TokenType) -> bool {
    match (token_type, expected) {
        (TokenType::IDENTIFIER(actual_val), TokenType::IDENTIFIER(expected_val)) => {
            // A generic IDENTIFIER (empty payload) matches any identifier
            expected_val.is_empty() || actual_val.eq_ignore_ascii_case(expected_val)
        }
        // Payload-carrying literals match on the variant alone
        _ => std::mem::discriminant(token_type) == std::mem::discriminant(expected),
    }
}
