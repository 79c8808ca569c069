//! Token streams shared by the utilities' unit tests.

use crate::element::{ContainerKind, Tag, Value};
use crate::token::{Token, TokenReader};

pub(crate) fn int(tag: u8, v: i64) -> Token {
    Token::leaf(Tag::context(tag), Value::Signed(v))
}

pub(crate) fn open(tag: u8, kind: ContainerKind) -> Token {
    Token::start(Tag::context(tag), kind)
}

/// `{ 1: Int(5), 2: Structure { 3: Int(7) } }`
pub(crate) fn scenario() -> TokenReader {
    TokenReader::new(vec![
        int(1, 5),
        open(2, ContainerKind::Structure),
        int(3, 7),
        Token::End,
    ])
}

/// `levels` anonymous structures nested inside each other around one leaf.
pub(crate) fn nested_chain(levels: usize) -> TokenReader {
    let mut tokens = Vec::with_capacity(2 * levels + 1);
    for _ in 0..levels {
        tokens.push(Token::start(Tag::ANONYMOUS, ContainerKind::Structure));
    }
    tokens.push(Token::leaf(Tag::context(0), Value::Null));
    tokens.extend(std::iter::repeat(Token::End).take(levels));
    TokenReader::new(tokens)
}
