//! Token stream builders for the traversal benchmark suite.
//!
//! Streams are built once per benchmark input; readers over them share the
//! token buffer, so `reader()` is cheap enough to call inside a timed loop.

use std::sync::Arc;

use onboard_payload::from_tlv::{
    TAG_CUSTOM_FLOW, TAG_DISCRIMINATOR, TAG_PRODUCT_ID, TAG_SETUP_PIN_CODE, TAG_VENDOR_ID,
    TAG_VERSION,
};
use onboard_tlv::element::{ContainerKind, Tag, Value};
use onboard_tlv::token::{Token, TokenReader};

/// A prepared token buffer.
#[derive(Clone)]
pub struct Stream {
    tokens: Arc<[Token]>,
}

impl Stream {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into(),
        }
    }

    /// A fresh reader positioned before the first element.
    #[must_use]
    pub fn reader(&self) -> TokenReader {
        TokenReader::new(Arc::clone(&self.tokens))
    }
}

/// Context tag for the `i`th member, cycling through 0..=250.
fn ctx(i: usize) -> Tag {
    Tag::context(u8::try_from(i % 251).unwrap_or(0))
}

/// `n` unsigned leaves in one top-level scope, then a single `ctx:255` marker.
#[must_use]
pub fn wide(n: usize) -> Stream {
    let mut tokens: Vec<Token> = (0..n)
        .map(|i| Token::leaf(ctx(i), Value::Unsigned(i as u64)))
        .collect();
    tokens.push(Token::leaf(Tag::context(255), Value::Null));
    Stream::new(tokens)
}

/// `levels` nested structures around one `ctx:255` leaf.
#[must_use]
pub fn deep(levels: usize) -> Stream {
    let mut tokens = Vec::with_capacity(2 * levels + 1);
    for _ in 0..levels {
        tokens.push(Token::start(Tag::ANONYMOUS, ContainerKind::Structure));
    }
    tokens.push(Token::leaf(Tag::context(255), Value::Null));
    tokens.extend(std::iter::repeat(Token::End).take(levels));
    Stream::new(tokens)
}

/// A full tree: every container holds `breadth` members, down to `depth`
/// levels; the last top-level member is a `ctx:255` leaf.
#[must_use]
pub fn tree(breadth: usize, depth: usize) -> Stream {
    fn fill(tokens: &mut Vec<Token>, breadth: usize, depth: usize) {
        for i in 0..breadth {
            if depth == 0 {
                tokens.push(Token::leaf(ctx(i), Value::Signed(-1)));
            } else {
                tokens.push(Token::start(ctx(i), ContainerKind::List));
                fill(tokens, breadth, depth - 1);
                tokens.push(Token::End);
            }
        }
    }
    let mut tokens = Vec::new();
    fill(&mut tokens, breadth, depth);
    tokens.push(Token::leaf(Tag::context(255), Value::Null));
    Stream::new(tokens)
}

/// One setup payload structure with `extra` vendor members ahead of the
/// standard fields.
#[must_use]
pub fn payload(extra: usize) -> Stream {
    let uint = |tag: u8, v: u64| Token::leaf(Tag::context(tag), Value::Unsigned(v));
    let mut tokens = vec![Token::start(Tag::ANONYMOUS, ContainerKind::Structure)];
    for i in 0..extra {
        tokens.push(Token::leaf(Tag::profile(0xFFF1, 1), Value::Unsigned(i as u64)));
    }
    tokens.extend([
        uint(TAG_VERSION, 0),
        uint(TAG_VENDOR_ID, 0xFFF1),
        uint(TAG_PRODUCT_ID, 0x8001),
        Token::leaf(Tag::context(TAG_CUSTOM_FLOW), Value::Bool(true)),
        uint(TAG_DISCRIMINATOR, 15),
        uint(TAG_SETUP_PIN_CODE, 20_202_021),
        Token::End,
    ]);
    Stream::new(tokens)
}
