//! Arithmetic evaluation of fully substituted formula text.
//!
//! After cell references and range functions have been replaced with numbers,
//! a formula is plain arithmetic: numeric literals, parentheses, binary
//! `+ - * /` and unary `+`/`-`. This module parses that fixed grammar with a
//! small recursive-descent parser and computes the result as it goes.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```

use super::error::ArithError;

/// Maximum nesting of parentheses and unary signs.
const MAX_DEPTH: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

/// Evaluate an arithmetic expression.
pub fn evaluate_expression(expr: &str) -> Result<f64, ArithError> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(ArithError::Malformed("empty expression".to_string()));
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(token) = parser.peek() {
        return Err(ArithError::Malformed(format!(
            "unexpected '{}'",
            token.describe()
        )));
    }

    if value.is_finite() {
        Ok(value)
    } else {
        Err(ArithError::Overflow)
    }
}

fn tokenize(expr: &str) -> Result<Vec<Token>, ArithError> {
    let bytes = expr.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    while i < bytes.len() {
        let b = bytes[i];
        let token = match b {
            b' ' | b'\t' | b'\r' | b'\n' => {
                i += 1;
                continue;
            }
            b'+' => Token::Plus,
            b'-' => Token::Minus,
            b'*' => Token::Star,
            b'/' => Token::Slash,
            b'(' => Token::LParen,
            b')' => Token::RParen,
            b'0'..=b'9' | b'.' => {
                let end = scan_number(bytes, i);
                let literal = &expr[i..end];
                let n = literal.parse::<f64>().map_err(|_| {
                    ArithError::Malformed(format!("invalid number '{}'", literal))
                })?;
                tokens.push(Token::Number(n));
                i = end;
                continue;
            }
            _ => {
                let ch = expr[i..].chars().next().unwrap_or('?');
                return Err(ArithError::Malformed(format!("unexpected '{}'", ch)));
            }
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

/// Find the end of the numeric literal starting at `start`:
/// digits, an optional fraction, and an optional exponent.
fn scan_number(bytes: &[u8], start: usize) -> usize {
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = digits_from(start);
    if i < bytes.len() && bytes[i] == b'.' {
        i = digits_from(i + 1);
    }

    // Only consume an exponent marker when digits actually follow it.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            i = digits_from(j);
        }
    }
    i
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn descend(&mut self) -> Result<(), ArithError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ArithError::Malformed("expression nested too deeply".to_string()));
        }
        Ok(())
    }

    fn expr(&mut self) -> Result<f64, ArithError> {
        let mut value = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some(Token::Minus) => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, ArithError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(ArithError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    fn unary(&mut self) -> Result<f64, ArithError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(-value)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.descend()?;
                let value = self.unary()?;
                self.depth -= 1;
                Ok(value)
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> Result<f64, ArithError> {
        match self.advance() {
            Some(Token::Number(n)) => Ok(n),
            Some(Token::LParen) => {
                self.descend()?;
                let value = self.expr()?;
                self.depth -= 1;
                match self.advance() {
                    Some(Token::RParen) => Ok(value),
                    Some(token) => Err(ArithError::Malformed(format!(
                        "expected ')' but found '{}'",
                        token.describe()
                    ))),
                    None => Err(ArithError::Malformed("unbalanced parentheses".to_string())),
                }
            }
            Some(token) => Err(ArithError::Malformed(format!(
                "unexpected '{}'",
                token.describe()
            ))),
            None => Err(ArithError::Malformed("unexpected end of expression".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed(expr: &str) -> bool {
        matches!(evaluate_expression(expr), Err(ArithError::Malformed(_)))
    }

    #[test]
    fn test_precedence_and_associativity() {
        assert_eq!(evaluate_expression("1+2*3"), Ok(7.0));
        assert_eq!(evaluate_expression("(1+2)*3"), Ok(9.0));
        assert_eq!(evaluate_expression("10-4-3"), Ok(3.0));
        assert_eq!(evaluate_expression("64/4/2"), Ok(8.0));
        assert_eq!(evaluate_expression("2*3+4*5"), Ok(26.0));
    }

    #[test]
    fn test_unary_signs() {
        assert_eq!(evaluate_expression("-3"), Ok(-3.0));
        assert_eq!(evaluate_expression("2--3"), Ok(5.0));
        assert_eq!(evaluate_expression("2*-(1+1)"), Ok(-4.0));
        assert_eq!(evaluate_expression("+4"), Ok(4.0));
        assert_eq!(evaluate_expression("- - 2"), Ok(2.0));
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(evaluate_expression(".5 + 0.25"), Ok(0.75));
        assert_eq!(evaluate_expression("1e3"), Ok(1000.0));
        assert_eq!(evaluate_expression("2.5E-1"), Ok(0.25));
        assert_eq!(evaluate_expression(" 7 "), Ok(7.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate_expression("1/0"), Err(ArithError::DivisionByZero));
        assert_eq!(evaluate_expression("0/0"), Err(ArithError::DivisionByZero));
        assert_eq!(evaluate_expression("5/(2-2)"), Err(ArithError::DivisionByZero));
        assert_eq!(evaluate_expression("1/-0"), Err(ArithError::DivisionByZero));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(evaluate_expression("1e308*10"), Err(ArithError::Overflow));
    }

    #[test]
    fn test_malformed() {
        assert!(malformed(""));
        assert!(malformed("   "));
        assert!(malformed("1+"));
        assert!(malformed("(1+2"));
        assert!(malformed("1+2)"));
        assert!(malformed("()"));
        assert!(malformed("1 2"));
        assert!(malformed("1.2.3"));
        assert!(malformed("."));
        assert!(malformed("1e"));
        assert!(malformed("2**3"));
        assert!(malformed("alert(1)"));
        assert!(malformed("1;2"));
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(malformed(&deep));
        let signs = format!("{}1", "-".repeat(10_000));
        assert!(malformed(&signs));

        let fine = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(evaluate_expression(&fine), Ok(1.0));
    }
}
