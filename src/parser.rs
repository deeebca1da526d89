/// A parser for `{identifier}` placeholder tokens in translation templates.
///
/// Splits a template string into an ordered list of segments, alternating
/// literal text and placeholders. A placeholder is a `{`, one or more
/// non-`}` characters, then `}`. Anything else, including `{}` and an
/// unclosed `{`, is literal text.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    /// Parameter name between the braces
    Placeholder(&'a str),
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser { input, position: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Consumes the current character and advances the position.
    fn consume(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(c) = c {
            self.position += c.len_utf8();
        }
        c
    }

    fn parse_text(&mut self) -> Segment<'a> {
        let start = self.position;
        // Always make progress, even when standing on a '{' that failed to
        // parse as a placeholder.
        self.consume();
        while let Some(c) = self.peek() {
            if c == '{' {
                break;
            }
            self.consume();
        }
        Segment::Text(&self.input[start..self.position])
    }

    fn parse_placeholder(&mut self) -> Option<Segment<'a>> {
        let start_pos = self.position;
        if self.consume() != Some('{') {
            self.position = start_pos;
            return None;
        }

        let name_start = self.position;
        while let Some(c) = self.peek() {
            if c == '}' {
                break;
            }
            self.consume();
        }
        let name = &self.input[name_start..self.position];

        // Reject `{}` and an unclosed brace, backtrack to literal text.
        if name.is_empty() || self.consume() != Some('}') {
            self.position = start_pos;
            return None;
        }
        Some(Segment::Placeholder(name))
    }

    pub fn parse(&mut self) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        while self.position < self.input.len() {
            match self.peek() {
                Some('{') => {
                    if let Some(segment) = self.parse_placeholder() {
                        segments.push(segment);
                    } else {
                        segments.push(self.parse_text());
                    }
                }
                _ => segments.push(self.parse_text()),
            }
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let mut parser = Parser::new("Hello, World!");
        assert_eq!(parser.parse(), vec![Segment::Text("Hello, World!")]);
    }

    #[test]
    fn test_single_placeholder() {
        let mut parser = Parser::new("Hello, {name}!");
        assert_eq!(
            parser.parse(),
            vec![
                Segment::Text("Hello, "),
                Segment::Placeholder("name"),
                Segment::Text("!"),
            ]
        );
    }

    #[test]
    fn test_adjacent_placeholders() {
        let mut parser = Parser::new("{a}{b}");
        assert_eq!(
            parser.parse(),
            vec![Segment::Placeholder("a"), Segment::Placeholder("b")]
        );
    }

    #[test]
    fn test_leading_and_trailing_placeholders() {
        let mut parser = Parser::new("{count} item");
        assert_eq!(
            parser.parse(),
            vec![Segment::Placeholder("count"), Segment::Text(" item")]
        );
    }

    #[test]
    fn test_empty_braces_are_text() {
        let mut parser = Parser::new("a{}b");
        assert_eq!(
            parser.parse(),
            vec![Segment::Text("a"), Segment::Text("{}b")]
        );
    }

    #[test]
    fn test_unclosed_brace_is_text() {
        let mut parser = Parser::new("oops {name");
        assert_eq!(
            parser.parse(),
            vec![Segment::Text("oops "), Segment::Text("{name")]
        );
    }

    #[test]
    fn test_empty_input() {
        let mut parser = Parser::new("");
        assert!(parser.parse().is_empty());
    }

    #[test]
    fn test_multibyte_text() {
        let mut parser = Parser::new("¡Hola, {name}!");
        assert_eq!(
            parser.parse(),
            vec![
                Segment::Text("¡Hola, "),
                Segment::Placeholder("name"),
                Segment::Text("!"),
            ]
        );
    }
}
