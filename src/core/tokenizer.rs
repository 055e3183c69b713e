// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/tokenizer.rs
//!
//! Line tokenizer for layout markup
//!
//! Splits one sanitized line into tags (open, close, self-closing),
//! declarations (`<?xml ?>`, `<!DOCTYPE>`) and text runs. Each lexeme
//! carries its byte span so the naming pass can edit the line in place.
//!
//! # Architecture
//! Built from nom combinators, the same way the rest of the crate parses.
//! A `<` that does not start a well-formed tag is kept as text, so the
//! tokenizer never fails on a line.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until, take_while1},
    character::complete::{char, multispace1},
    combinator::value,
    multi::{many0, many0_count},
    sequence::{delimited, preceded},
    IResult, Parser,
};
use std::ops::Range;

use crate::core::sanitizer::FOLD_MARKER;

/// A start or self-closing tag with its attributes in source order
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tag<'a> {
    pub name: &'a str,
    pub attributes: Vec<(&'a str, &'a str)>,
}

impl<'a> Tag<'a> {
    /// Value of the first attribute called `key`
    pub fn attr(&self, key: &str) -> Option<&'a str> {
        self.attributes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token<'a> {
    /// `<name attr="..">`
    Open(Tag<'a>),
    /// `<name attr=".."/>`
    SelfClosing(Tag<'a>),
    /// `</name>`
    Close(&'a str),
    /// Character data between tags
    Text(&'a str),
    /// `<?...?>` or `<!...>`
    Markup(&'a str),
}

impl Token<'_> {
    /// Tag name for open or self-closing tags
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Token::Open(tag) | Token::SelfClosing(tag) => Some(tag.name),
            _ => None,
        }
    }

    /// True for text made only of whitespace and fold markers
    pub fn is_blank(&self) -> bool {
        matches!(self, Token::Text(text) if text.replace(FOLD_MARKER, "").trim().is_empty())
    }
}

/// A token and its byte range within the line
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Lexeme<'a> {
    pub token: Token<'a>,
    pub span: Range<usize>,
}

/// Tokenizes one logical line
pub fn tokenize_line(line: &str) -> Vec<Lexeme<'_>> {
    let mut lexemes = Vec::new();
    let mut pos = 0;

    while pos < line.len() {
        let rest = &line[pos..];

        if rest.starts_with('<') {
            if let Ok((remaining, token)) = parse_markup(rest) {
                let end = pos + (rest.len() - remaining.len());
                lexemes.push(Lexeme { token, span: pos..end });
                pos = end;
                continue;
            }
        }

        // Text runs up to the next '<', a stray '<' included
        let skip = usize::from(rest.starts_with('<'));
        let len = rest[skip..].find('<').map_or(rest.len(), |i| i + skip);
        lexemes.push(Lexeme {
            token: Token::Text(&rest[..len]),
            span: pos..pos + len,
        });
        pos += len;
    }

    lexemes
}

/// Parses any markup construct starting with '<'
pub fn parse_markup(input: &str) -> IResult<&str, Token<'_>> {
    alt((parse_declaration, parse_close_tag, parse_tag)).parse(input)
}

/// Parses `<?...?>` and `<!...>`
pub fn parse_declaration(input: &str) -> IResult<&str, Token<'_>> {
    let (input, body) = alt((
        delimited(tag("<?"), take_until("?>"), tag("?>")),
        delimited(tag("<!"), take_until(">"), tag(">")),
    ))
    .parse(input)?;

    Ok((input, Token::Markup(body)))
}

/// Parses `</name>`
pub fn parse_close_tag(input: &str) -> IResult<&str, Token<'_>> {
    let (input, name) = delimited(tag("</"), parse_name, (separator, char('>'))).parse(input)?;
    Ok((input, Token::Close(name)))
}

/// Parses `<name attr="value" ...>` or the self-closing form
pub fn parse_tag(input: &str) -> IResult<&str, Token<'_>> {
    let (input, name) = preceded(char('<'), parse_name).parse(input)?;
    let (input, attributes) = many0(parse_attribute).parse(input)?;
    let (input, _) = separator(input)?;
    let (input, end) = alt((tag("/>"), tag(">"))).parse(input)?;

    let tag = Tag { name, attributes };
    let token = if end == "/>" {
        Token::SelfClosing(tag)
    } else {
        Token::Open(tag)
    };

    Ok((input, token))
}

/// Parses ` key="value"` (single or double quotes)
pub fn parse_attribute(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, _) = separator1(input)?;
    let (input, key) = parse_name(input)?;
    let (input, _) = (separator, char('='), separator).parse(input)?;
    let (input, value) = alt((
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
    ))
    .parse(input)?;

    Ok((input, (key, value)))
}

/// Element and attribute names
pub fn parse_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '.')).parse(input)
}

/// Whitespace inside a tag; fold markers count as whitespace since a tag
/// may have been split over several physical lines
fn separator(input: &str) -> IResult<&str, ()> {
    value((), many0_count(alt((multispace1, tag(FOLD_MARKER))))).parse(input)
}

fn separator1(input: &str) -> IResult<&str, ()> {
    let (rest, ()) = separator(input)?;
    if rest.len() == input.len() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Space,
        )));
    }
    Ok((rest, ()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_open_tag_with_attributes() {
        let (rest, token) = parse_tag(r#"<object class="GtkButton" id="Btn1">tail"#).unwrap();
        assert_eq!(rest, "tail");

        match token {
            Token::Open(tag) => {
                assert_eq!(tag.name, "object");
                assert_eq!(tag.attr("class"), Some("GtkButton"));
                assert_eq!(tag.attr("id"), Some("Btn1"));
                assert_eq!(tag.attr("missing"), None);
            }
            other => panic!("Expected open tag, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_self_closing_tag() {
        let (_, token) = parse_tag(r#"<requires lib="gtk+" version="3.20"/>"#).unwrap();
        assert!(matches!(token, Token::SelfClosing(ref t) if t.name == "requires"));
    }

    #[test]
    fn test_parse_single_quoted_attribute() {
        let (_, (key, value)) = parse_attribute(" handler='on_click'").unwrap();
        assert_eq!(key, "handler");
        assert_eq!(value, "on_click");
    }

    #[test]
    fn test_attribute_needs_leading_space() {
        assert!(parse_attribute(r#"id="x""#).is_err());
    }

    #[test]
    fn test_parse_close_tag() {
        let (rest, token) = parse_close_tag("</property >x").unwrap();
        assert_eq!(token, Token::Close("property"));
        assert_eq!(rest, "x");
    }

    #[test]
    fn test_tokenize_single_line_object() {
        let line = r#"<object class="GtkButton" id="Btn1"><property name="label">OK</property></object>"#;
        let lexemes = tokenize_line(line);

        assert_eq!(lexemes.len(), 5);
        assert_eq!(lexemes[0].token.tag_name(), Some("object"));
        assert_eq!(lexemes[1].token.tag_name(), Some("property"));
        assert_eq!(lexemes[2].token, Token::Text("OK"));
        assert_eq!(lexemes[3].token, Token::Close("property"));
        assert_eq!(lexemes[4].token, Token::Close("object"));
        assert_eq!(lexemes[4].span.end, line.len());
    }

    #[test]
    fn test_tokenize_declarations() {
        let lexemes = tokenize_line(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(lexemes.len(), 1);
        assert!(matches!(lexemes[0].token, Token::Markup(_)));
    }

    #[test]
    fn test_stray_angle_bracket_is_text() {
        let lexemes = tokenize_line("a < b <br/>");
        assert_eq!(lexemes[0].token, Token::Text("a "));
        assert_eq!(lexemes[1].token, Token::Text("< b "));
        assert_eq!(lexemes[2].token.tag_name(), Some("br"));
    }

    #[test]
    fn test_tag_split_over_folded_lines() {
        let line = r#"<property name="label"\n    translatable="yes">Hi</property>"#;
        let lexemes = tokenize_line(line);

        match &lexemes[0].token {
            Token::Open(tag) => assert_eq!(tag.attr("translatable"), Some("yes")),
            other => panic!("Expected open tag, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_text() {
        assert!(Token::Text("   ").is_blank());
        assert!(Token::Text(" \\n ").is_blank());
        assert!(!Token::Text(" x ").is_blank());
    }
}
