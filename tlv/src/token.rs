//! `TokenReader`: a [`TlvReader`] over an in-memory stream of decoded tokens.
//!
//! A token stream is the flattened form of an element tree:
//!
//! ```text
//! Leaf(tag=1, Signed(5))
//! Start(tag=2, Structure)
//!   Leaf(tag=3, Signed(7))
//! End
//! ```
//!
//! The stream is untrusted. The reader fails closed: an `Invalid` token is a
//! malformed element, a stream that stops inside an open container is
//! truncated, and an `End` with nothing open is malformed. Faults surface
//! when the cursor reaches them, never earlier.
//!
//! Tokens live behind an `Arc<[Token]>`, so [`TlvReader::snapshot`] copies
//! only the position and the open-container stack.

use std::sync::Arc;

use crate::element::{ContainerKind, ElementType, Tag, Value};
use crate::error::DecodeError;
use crate::reader::{Advance, TlvReader};

/// One decoded unit of a token stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A primitive element.
    Leaf { tag: Tag, value: Value },
    /// Opens a container; its members follow until the matching `End`.
    Start { tag: Tag, kind: ContainerKind },
    /// Closes the innermost open container.
    End,
    /// Bytes that failed to decode. Reading it is a [`DecodeError::Malformed`].
    Invalid { detail: String },
}

impl Token {
    #[must_use]
    pub fn leaf(tag: Tag, value: Value) -> Self {
        Self::Leaf { tag, value }
    }

    #[must_use]
    pub fn start(tag: Tag, kind: ContainerKind) -> Self {
        Self::Start { tag, kind }
    }

    #[must_use]
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::Invalid {
            detail: detail.into(),
        }
    }
}

/// Forward-only cursor over a shared token stream.
#[derive(Debug, Clone)]
pub struct TokenReader {
    tokens: Arc<[Token]>,
    /// Index where the search for the next sibling begins.
    cursor: usize,
    /// Index of the element under the cursor.
    current: Option<usize>,
    /// True while `current` is a container whose contents were neither
    /// entered nor skipped.
    current_unskipped: bool,
    /// `Start` indices of the entered containers, innermost last.
    open: Vec<usize>,
}

impl TokenReader {
    /// Create a reader positioned before the first top-level element.
    #[must_use]
    pub fn new(tokens: impl Into<Arc<[Token]>>) -> Self {
        Self {
            tokens: tokens.into(),
            cursor: 0,
            current: None,
            current_unskipped: false,
            open: Vec::new(),
        }
    }

    /// Number of containers currently entered.
    #[must_use]
    pub fn open_depth(&self) -> usize {
        self.open.len()
    }

    /// Index of the current element's token, if any.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.current
    }

    fn current_token(&self) -> Option<&Token> {
        self.current.and_then(|i| self.tokens.get(i))
    }

    fn current_value(&self) -> Option<&Value> {
        match self.current_token() {
            Some(Token::Leaf { value, .. }) => Some(value),
            _ => None,
        }
    }

    fn type_mismatch(&self, expected: ElementType) -> DecodeError {
        match self.current_token() {
            Some(Token::Leaf { value, .. }) => DecodeError::UnexpectedType {
                expected,
                found: value.element_type(),
            },
            Some(Token::Start { kind, .. }) => DecodeError::UnexpectedType {
                expected,
                found: ElementType::from(*kind),
            },
            _ => DecodeError::NoCurrentElement,
        }
    }

    /// Scan forward from `from` to just past the first `End` that closes the
    /// scope `from` lies in. Nested containers on the way are skipped.
    fn skip_scope(&self, from: usize) -> Result<usize, DecodeError> {
        let mut nested: usize = 0;
        let mut i = from;
        loop {
            match self.tokens.get(i) {
                None => {
                    return Err(DecodeError::Truncated {
                        detail: format!("container open at end of stream (token {i})"),
                    });
                }
                Some(Token::Start { .. }) => nested += 1,
                Some(Token::End) => {
                    if nested == 0 {
                        return Ok(i + 1);
                    }
                    nested -= 1;
                }
                Some(Token::Leaf { .. }) => {}
                Some(Token::Invalid { detail }) => {
                    return Err(DecodeError::Malformed {
                        detail: format!("token {i}: {detail}"),
                    });
                }
            }
            i += 1;
        }
    }
}

impl TlvReader for TokenReader {
    fn next(&mut self) -> Result<Advance, DecodeError> {
        if self.current_unskipped {
            self.cursor = self.skip_scope(self.cursor)?;
            self.current_unskipped = false;
        }
        match self.tokens.get(self.cursor) {
            None => {
                self.current = None;
                if self.open.is_empty() {
                    Ok(Advance::EndOfScope)
                } else {
                    Err(DecodeError::Truncated {
                        detail: format!(
                            "stream ended with {} container(s) open",
                            self.open.len()
                        ),
                    })
                }
            }
            Some(Token::End) => {
                if self.open.is_empty() {
                    return Err(DecodeError::Malformed {
                        detail: format!("token {}: end of container at top level", self.cursor),
                    });
                }
                // Stay on the `End` so repeated calls keep reporting end of scope.
                self.current = None;
                Ok(Advance::EndOfScope)
            }
            Some(Token::Invalid { detail }) => Err(DecodeError::Malformed {
                detail: format!("token {}: {detail}", self.cursor),
            }),
            Some(Token::Start { .. }) => {
                self.current = Some(self.cursor);
                self.cursor += 1;
                self.current_unskipped = true;
                Ok(Advance::Element)
            }
            Some(Token::Leaf { .. }) => {
                self.current = Some(self.cursor);
                self.cursor += 1;
                Ok(Advance::Element)
            }
        }
    }

    fn tag(&self) -> Tag {
        match self.current_token() {
            Some(Token::Leaf { tag, .. } | Token::Start { tag, .. }) => *tag,
            _ => Tag::ANONYMOUS,
        }
    }

    fn element_type(&self) -> ElementType {
        match self.current_token() {
            Some(Token::Leaf { value, .. }) => value.element_type(),
            Some(Token::Start { kind, .. }) => ElementType::from(*kind),
            _ => ElementType::Null,
        }
    }

    fn enter_container(&mut self) -> Result<(), DecodeError> {
        let Some(index) = self.current else {
            return Err(DecodeError::NoCurrentElement);
        };
        match self.tokens.get(index) {
            Some(Token::Start { .. }) if self.current_unskipped => {
                self.open.push(index);
                self.cursor = index + 1;
                self.current = None;
                self.current_unskipped = false;
                Ok(())
            }
            // Already skipped past (e.g. after exit_container): the contents
            // are behind the cursor and cannot be re-entered.
            Some(Token::Start { .. }) => Err(DecodeError::NoCurrentElement),
            Some(Token::Leaf { value, .. }) => Err(DecodeError::NotAContainer {
                found: value.element_type(),
            }),
            _ => Err(DecodeError::NoCurrentElement),
        }
    }

    fn exit_container(&mut self) -> Result<(), DecodeError> {
        let Some(&start) = self.open.last() else {
            return Err(DecodeError::ScopeUnderflow);
        };
        if self.current_unskipped {
            self.cursor = self.skip_scope(self.cursor)?;
            self.current_unskipped = false;
        }
        self.cursor = self.skip_scope(self.cursor)?;
        self.open.pop();
        self.current = Some(start);
        Ok(())
    }

    fn snapshot(&self) -> Self {
        self.clone()
    }

    fn get_i64(&self) -> Result<i64, DecodeError> {
        match self.current_value() {
            Some(Value::Signed(v)) => Ok(*v),
            _ => Err(self.type_mismatch(ElementType::SignedInteger)),
        }
    }

    fn get_u64(&self) -> Result<u64, DecodeError> {
        match self.current_value() {
            Some(Value::Unsigned(v)) => Ok(*v),
            _ => Err(self.type_mismatch(ElementType::UnsignedInteger)),
        }
    }

    fn get_bool(&self) -> Result<bool, DecodeError> {
        match self.current_value() {
            Some(Value::Bool(v)) => Ok(*v),
            _ => Err(self.type_mismatch(ElementType::Boolean)),
        }
    }

    fn get_f64(&self) -> Result<f64, DecodeError> {
        match self.current_value() {
            Some(Value::Float(v)) => Ok(*v),
            _ => Err(self.type_mismatch(ElementType::FloatingPoint)),
        }
    }

    fn get_str(&self) -> Result<&str, DecodeError> {
        match self.current_value() {
            Some(Value::Utf8(v)) => Ok(v),
            _ => Err(self.type_mismatch(ElementType::Utf8String)),
        }
    }

    fn get_bytes(&self) -> Result<&[u8], DecodeError> {
        match self.current_value() {
            Some(Value::Bytes(v)) => Ok(v),
            _ => Err(self.type_mismatch(ElementType::ByteString)),
        }
    }
}
