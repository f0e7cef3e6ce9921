use lazy_static::lazy_static;
use regex::Regex;

use crate::{Location, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenError, TokenKind, LEXEME_LENGTH, RESERVED_LOOKUP};

/// A handler consumes the lexeme its pattern matched. Returning `None` means
/// the input was skipped (whitespace, comments, suppressed newlines).
pub type LexHandler = fn(&mut Lexer, &Regex) -> Option<Token>;

pub struct LexPattern {
    regex: Regex,
    handler: LexHandler,
}

/// Characters that make up operators. A run of these must form exactly one operator.
const OPERATOR_CHARACTERS: &str = "+-*/%=!<>&|";

lazy_static! {
    static ref PATTERNS: Vec<LexPattern> = vec![
        LexPattern { regex: Regex::new(r"^[ \t\r]+").unwrap(), handler: skip_handler },
        LexPattern { regex: Regex::new(r"^//[^\n]*").unwrap(), handler: skip_handler },
        LexPattern { regex: Regex::new(r"^\n").unwrap(), handler: newline_handler },
        LexPattern { regex: Regex::new(r"^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Delimiter, ";") },
        LexPattern { regex: Regex::new(r"^[0-9][0-9.]*").unwrap(), handler: numeric_handler },
        LexPattern { regex: Regex::new(r"^[\p{Alphabetic}_][\p{Alphabetic}0-9_]*").unwrap(), handler: symbol_handler },
        LexPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
        LexPattern { regex: Regex::new(r"^[(){}\[\]]").unwrap(), handler: closure_handler },
        LexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        LexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        LexPattern { regex: Regex::new(r"^[+\-*/%=!<>&|]+").unwrap(), handler: operator_handler },
    ];
}

/// Pull-based lexer over one source text.
///
/// Besides the read position it tracks the bracket depths that decide whether a
/// newline is a delimiter, and the kind of the last emitted token, which decides
/// whether `!` is a postfix factorial.
#[derive(Debug, Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    line: usize,
    column: usize,
    round_depth: usize,
    curly_depth: usize,
    square_depth: usize,
    previous_kind: Option<TokenKind>,
}

impl Lexer {
    pub fn new(source: String) -> Lexer {
        Lexer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            round_depth: 0,
            curly_depth: 0,
            square_depth: 0,
            previous_kind: None,
        }
    }

    /// Produces the next token. Once the source is exhausted this keeps
    /// returning `EOF`, after first reporting every unclosed bracket kind.
    pub fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                let token = self.end_of_file_token();
                self.previous_kind = Some(token.kind);
                return token;
            }

            let pattern = PATTERNS
                .iter()
                .find(|pattern| pattern.regex.is_match(self.remainder()));

            let produced = match pattern {
                Some(pattern) => (pattern.handler)(self, &pattern.regex),
                None => Some(self.unrecognizable_token()),
            };

            if let Some(token) = produced {
                self.previous_kind = Some(token.kind);
                return token;
            }
        }
    }

    /// Advances `n` bytes, keeping line and column in step.
    pub(crate) fn advance_n(&mut self, n: usize) {
        let end = (self.pos + n).min(self.source.len());

        for ch in self.source[self.pos..end].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }

        self.pos = end;
    }

    fn peek(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// Newlines only separate statements outside `(...)` and `[...]`.
    fn in_closure(&self) -> bool {
        self.round_depth > 0 || self.square_depth > 0
    }

    fn end_of_file_token(&mut self) -> Token {
        let location = self.location();

        if self.round_depth > 0 {
            self.round_depth = 0;
            return MK_TOKEN!(TokenError::UnclosedParenthesis, String::from("("), location, error);
        }
        if self.curly_depth > 0 {
            self.curly_depth = 0;
            return MK_TOKEN!(TokenError::UnclosedBrace, String::from("{"), location, error);
        }
        if self.square_depth > 0 {
            self.square_depth = 0;
            return MK_TOKEN!(TokenError::UnclosedBracket, String::from("["), location, error);
        }

        MK_TOKEN!(TokenKind::EOF, String::from("EOF"), location)
    }

    fn unrecognizable_token(&mut self) -> Token {
        let location = self.location();
        let ch = self.peek().unwrap_or_default();
        self.advance_n(ch.len_utf8());

        MK_TOKEN!(TokenError::Unrecognizable, ch.to_string(), location, error)
    }
}

/// Builds a regular token, or an `Overflow` error if the lexeme does not fit the buffer.
fn bounded_token(kind: TokenKind, lexeme: String, location: Location) -> Token {
    if lexeme.chars().count() > LEXEME_LENGTH {
        let truncated = lexeme.chars().take(LEXEME_LENGTH).collect();
        return MK_TOKEN!(TokenError::Overflow, truncated, location, error);
    }

    MK_TOKEN!(kind, lexeme, location)
}

fn matched_len(lexer: &Lexer, regex: &Regex) -> usize {
    regex.find(lexer.remainder()).map_or(0, |m| m.end())
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let matched = matched_len(lexer, regex);
    lexer.advance_n(matched);
    None
}

fn newline_handler(lexer: &mut Lexer, _regex: &Regex) -> Option<Token> {
    let location = lexer.location();
    lexer.advance_n(1);

    if lexer.in_closure() {
        return None;
    }

    Some(MK_TOKEN!(TokenKind::Delimiter, String::from("\\n"), location))
}

/// Openers are left for their own handlers so the bracket depths stay balanced.
fn is_numeric_terminator(ch: char) -> bool {
    ch.is_whitespace() || OPERATOR_CHARACTERS.contains(ch) || "()[]{},;:\"".contains(ch)
}

fn numeric_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let location = lexer.location();
    let run_length = matched_len(lexer, regex);
    let run = &lexer.remainder()[..run_length];

    let mut malformed = run.matches('.').count() > 1 || run.ends_with('.');

    // Anything glued to the number that cannot end it belongs to the same bad lexeme.
    let trailing: usize = lexer.remainder()[run_length..]
        .chars()
        .take_while(|ch| !is_numeric_terminator(*ch))
        .map(char::len_utf8)
        .sum();
    if trailing > 0 {
        malformed = true;
    }

    let length = run_length + trailing;
    let lexeme = lexer.remainder()[..length].to_string();
    lexer.advance_n(length);

    if malformed {
        return Some(MK_TOKEN!(TokenError::MalformedNumeric, lexeme, location, error));
    }

    Some(bounded_token(TokenKind::Numeric, lexeme, location))
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let location = lexer.location();
    let length = matched_len(lexer, regex);
    let value = lexer.remainder()[..length].to_string();
    lexer.advance_n(length);

    if value.starts_with('_') {
        match value.chars().nth(1) {
            Some(ch) if ch.is_alphabetic() || ch == '_' => {}
            _ => return Some(MK_TOKEN!(TokenError::OrphanUnderscore, value, location, error)),
        }
    }

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        return Some(MK_TOKEN!(*kind, value, location));
    }

    Some(bounded_token(TokenKind::Identifier, value, location))
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) -> Option<Token> {
    let location = lexer.location();
    lexer.advance_n(1);

    let mut value = String::new();

    loop {
        let Some(ch) = lexer.peek() else {
            let column = location.column.saturating_sub(1).max(1);
            return Some(MK_TOKEN!(
                TokenError::UnterminatedString,
                format!("\"{}", value),
                Location::new(location.line, column),
                error
            ));
        };
        lexer.advance_n(ch.len_utf8());

        match ch {
            '"' => break,
            '\\' => {
                let Some(escaped) = lexer.peek() else {
                    value.push('\\');
                    continue;
                };
                lexer.advance_n(escaped.len_utf8());

                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    '\\' => value.push('\\'),
                    '"' => value.push('"'),
                    '0' => value.push('\0'),
                    other => {
                        value.push('\\'); // Keep the backslash
                        value.push(other);
                    }
                }
            }
            _ => value.push(ch),
        }
    }

    Some(bounded_token(TokenKind::String, value, location))
}

fn closure_handler(lexer: &mut Lexer, _regex: &Regex) -> Option<Token> {
    let location = lexer.location();
    let ch = lexer.peek()?;
    lexer.advance_n(1);

    let kind = match ch {
        '(' => {
            lexer.round_depth += 1;
            TokenKind::OpenParen
        }
        '{' => {
            lexer.curly_depth += 1;
            TokenKind::OpenCurly
        }
        '[' => {
            lexer.square_depth += 1;
            TokenKind::OpenBracket
        }
        ')' if lexer.round_depth > 0 => {
            lexer.round_depth -= 1;
            TokenKind::CloseParen
        }
        '}' if lexer.curly_depth > 0 => {
            lexer.curly_depth -= 1;
            TokenKind::CloseCurly
        }
        ']' if lexer.square_depth > 0 => {
            lexer.square_depth -= 1;
            TokenKind::CloseBracket
        }
        _ => return Some(MK_TOKEN!(TokenError::UnmatchedClosure, ch.to_string(), location, error)),
    };

    Some(MK_TOKEN!(kind, ch.to_string(), location))
}

fn operator_handler(lexer: &mut Lexer, regex: &Regex) -> Option<Token> {
    let location = lexer.location();
    let run_length = matched_len(lexer, regex);
    let run = &lexer.remainder()[..run_length];

    // A trailing comment is not part of the operator.
    let length = run.find("//").unwrap_or(run_length);
    let lexeme = run[..length].to_string();
    lexer.advance_n(length);

    let kind = match lexeme.as_str() {
        "+" => TokenKind::Plus,
        "-" => TokenKind::Dash,
        "*" => TokenKind::Star,
        "/" => TokenKind::Slash,
        "%" => TokenKind::Percent,
        "=" => TokenKind::Assignment,
        "==" => TokenKind::Equals,
        "!=" => TokenKind::NotEquals,
        "<" => TokenKind::Less,
        "<=" => TokenKind::LessEquals,
        ">" => TokenKind::Greater,
        ">=" => TokenKind::GreaterEquals,
        "&&" => TokenKind::And,
        "||" => TokenKind::Or,
        "->" => TokenKind::Arrow,
        "!" if lexer.previous_kind.is_some_and(|kind| kind.allows_postfix()) => TokenKind::Factorial,
        "!" => TokenKind::Not,
        _ => return Some(MK_TOKEN!(TokenError::UndefinedOperator, lexeme, location, error)),
    };

    Some(MK_TOKEN!(kind, lexeme, location))
}

/// Lexes the whole source eagerly, up to and including the first `EOF` token.
pub fn tokenize(source: String) -> Vec<Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
