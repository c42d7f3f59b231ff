//! Filter decoder — parses a filter string back into aggregations.
//!
//! The decoder is a single pass over the input driven by a small state
//! machine:
//!
//! ```text
//! ExpectField -> ExpectTerm -> (InQuotedTerm | InUnquotedTerm) -> TermBoundary
//!                    ^                                              |
//!                    +---------------- '|' -------------------------+
//! ExpectField <---------------------- ',' --------------------------+
//! ```
//!
//! - The field name is everything before the first unescaped `:` of a clause.
//! - Quoted terms run to the next unescaped `"`; unquoted terms run to the
//!   next unescaped `|`, `,` or end of input and may contain `:`.
//! - `\"`, `\\`, `\,`, `\|` and `\:` unescape to the bare character anywhere;
//!   other backslash sequences are kept as written.
//! - A field seen twice is merged into its first occurrence, so field names
//!   are unique in the output.
//!
//! # Strictness
//!
//! Malformed input is rejected with [`FilterError::Parse`] rather than
//! guessed at: a clause without `:`, an empty field name, an empty clause,
//! an empty unquoted term, text after a closing quote, and an unterminated
//! quote all fail. Callers must not apply a filter that failed to decode.

use crate::error::{FilterError, Result};
use crate::types::{DecodedFilter, FieldAggregation, ResultTerm};

/// Decode a filter string into its fields and selected terms.
///
/// Every produced term has `selected: true` and no `matching_count`.
/// An empty string decodes to no fields.
///
/// # Example
/// ```
/// use refine_core::from_string;
/// let decoded = from_string(r#"field:term|two words,field2:blah\"stuff"#).unwrap();
/// assert_eq!(decoded.filter_fields[0].results[1].key, "two words");
/// assert_eq!(decoded.filter_fields[1].results[0].key, "blah\"stuff");
/// ```
pub fn from_string(filter: &str) -> Result<DecodedFilter> {
    let mut parser = Parser::new(filter);
    parser.run()?;
    Ok(DecodedFilter {
        filter_fields: parser.fields,
    })
}

/// Decode a filter string and serialize the result as JSON.
pub fn decode_json(filter: &str) -> Result<String> {
    let decoded = from_string(filter)?;
    Ok(serde_json::to_string(&decoded)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectField,
    ExpectTerm,
    InQuotedTerm,
    InUnquotedTerm,
    /// Just past a closing quote: only `|`, `,` or end of input may follow.
    TermBoundary,
}

struct Parser<'a> {
    input: &'a str,
    state: State,
    /// 0-based index of the clause being parsed.
    clause: usize,
    field: String,
    term: String,
    /// Index into `fields` of the current clause's field.
    current: usize,
    fields: Vec<FieldAggregation>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            state: State::ExpectField,
            clause: 0,
            field: String::new(),
            term: String::new(),
            current: 0,
            fields: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<()> {
        if self.input.is_empty() {
            return Ok(());
        }

        let input = self.input;
        let mut chars = input.char_indices();
        while let Some((pos, c)) = chars.next() {
            if c == '\\' {
                let escaped = chars.next().map(|(_, next)| next);
                self.push_escaped(pos, escaped)?;
                continue;
            }

            match self.state {
                State::ExpectField => match c {
                    ':' => self.finish_field(pos)?,
                    ',' => return Err(self.error(pos, "clause has no `field:` prefix")),
                    _ => self.field.push(c),
                },
                State::ExpectTerm => match c {
                    '"' => self.state = State::InQuotedTerm,
                    '|' | ',' => return Err(self.error(pos, "empty term")),
                    _ => {
                        self.term.push(c);
                        self.state = State::InUnquotedTerm;
                    }
                },
                State::InQuotedTerm => match c {
                    '"' => {
                        self.finish_term();
                        self.state = State::TermBoundary;
                    }
                    _ => self.term.push(c),
                },
                State::InUnquotedTerm => match c {
                    '|' => {
                        self.finish_term();
                        self.state = State::ExpectTerm;
                    }
                    ',' => {
                        self.finish_term();
                        self.next_clause();
                    }
                    _ => self.term.push(c),
                },
                State::TermBoundary => match c {
                    '|' => self.state = State::ExpectTerm,
                    ',' => self.next_clause(),
                    _ => {
                        return Err(self.error(
                            pos,
                            &format!("unexpected `{c}` after closing quote"),
                        ))
                    }
                },
            }
        }

        self.finish_input()
    }

    /// Handle a backslash escape at byte `pos`. `escaped` is the character
    /// after the backslash, if any.
    fn push_escaped(&mut self, pos: usize, escaped: Option<char>) -> Result<()> {
        let target = match self.state {
            State::ExpectField => &mut self.field,
            State::ExpectTerm => {
                self.state = State::InUnquotedTerm;
                &mut self.term
            }
            State::InQuotedTerm | State::InUnquotedTerm => &mut self.term,
            State::TermBoundary => {
                return Err(self.error(pos, "unexpected `\\` after closing quote"));
            }
        };
        match escaped {
            Some(c @ ('"' | '\\' | ',' | '|' | ':')) => target.push(c),
            Some(other) => {
                target.push('\\');
                target.push(other);
            }
            None => target.push('\\'),
        }
        Ok(())
    }

    fn finish_field(&mut self, pos: usize) -> Result<()> {
        if self.field.is_empty() {
            return Err(self.error(pos, "empty field name"));
        }
        let name = std::mem::take(&mut self.field);
        self.current = match self.fields.iter().position(|f| f.field == name) {
            Some(existing) => existing,
            None => {
                self.fields.push(FieldAggregation::new(name, Vec::new()));
                self.fields.len() - 1
            }
        };
        self.state = State::ExpectTerm;
        Ok(())
    }

    fn finish_term(&mut self) {
        let key = std::mem::take(&mut self.term);
        self.fields[self.current]
            .results
            .push(ResultTerm::selected(key));
    }

    fn next_clause(&mut self) {
        self.clause += 1;
        self.state = State::ExpectField;
    }

    fn finish_input(&mut self) -> Result<()> {
        let end = self.input.len();
        match self.state {
            State::ExpectField if self.field.is_empty() => {
                Err(self.error(end, "empty clause at end of filter"))
            }
            State::ExpectField => Err(self.error(end, "clause has no `field:` prefix")),
            State::ExpectTerm => Err(self.error(end, "missing term")),
            State::InQuotedTerm => Err(self.error(end, "unterminated quoted term")),
            State::InUnquotedTerm => {
                self.finish_term();
                Ok(())
            }
            State::TermBoundary => Ok(()),
        }
    }

    fn error(&self, position: usize, message: &str) -> FilterError {
        FilterError::Parse {
            clause: self.clause,
            position,
            message: message.to_string(),
        }
    }
}
