//! Arithmetic over `+ - * / ( )` and integer literals.
//!
//! Formulas are sanitized down to this alphabet before evaluation, so the
//! lexer only ever sees digits and operators. Values are exact fractions
//! over `i128` and the result is floored, which makes `7/2` come out as 3
//! and `7/2*2` as 7. Anything that leaves the `i128` range, or a final
//! total outside `i64`, is a [`FormulaError::Overflow`].

use logos::Logos;
use std::fmt;

use crate::error::FormulaError;

/// Deepest run of nested parentheses or unary signs accepted.
pub const MAX_DEPTH: usize = 256;

/// Arithmetic token.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token<'a> {
    #[regex(r"[0-9]+", |lex| lex.slice())]
    Number(&'a str),

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => f.write_str(n),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
        }
    }
}

/// Keep only digits and arithmetic characters.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')'))
        .collect()
}

/// Evaluate an arithmetic expression and floor the result.
pub fn evaluate(source: &str) -> Result<i64, FormulaError> {
    let tokens = lex(source)?;
    if tokens.is_empty() {
        return Err(FormulaError::EmptyExpression);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some((token, position)) = parser.peek() {
        return Err(match token {
            Token::RParen => FormulaError::UnbalancedParens,
            other => FormulaError::UnexpectedToken {
                token: other.to_string(),
                position,
            },
        });
    }

    value.floor()
}

fn lex(source: &str) -> Result<Vec<(Token<'_>, usize)>, FormulaError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);
    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => tokens.push((token, span.start)),
            Err(()) => {
                return Err(FormulaError::UnexpectedToken {
                    token: source[span.clone()].to_string(),
                    position: span.start,
                });
            }
        }
    }
    Ok(tokens)
}

/// An exact fraction with a positive, reduced denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ratio {
    num: i128,
    den: i128,
}

impl Ratio {
    fn int(n: i128) -> Self {
        Self { num: n, den: 1 }
    }

    fn new(num: i128, den: i128) -> Result<Self, FormulaError> {
        if den == 0 {
            return Err(FormulaError::DivisionByZero);
        }
        let g = i128::try_from(gcd(num.unsigned_abs(), den.unsigned_abs()))
            .map_err(|_| FormulaError::Overflow)?;
        let (mut num, mut den) = (num / g, den / g);
        if den < 0 {
            num = num.checked_neg().ok_or(FormulaError::Overflow)?;
            den = den.checked_neg().ok_or(FormulaError::Overflow)?;
        }
        Ok(Self { num, den })
    }

    fn checked_add(self, other: Self) -> Result<Self, FormulaError> {
        let num = product(self.num, other.den)?
            .checked_add(product(other.num, self.den)?)
            .ok_or(FormulaError::Overflow)?;
        Self::new(num, product(self.den, other.den)?)
    }

    fn checked_sub(self, other: Self) -> Result<Self, FormulaError> {
        self.checked_add(other.checked_neg()?)
    }

    fn checked_mul(self, other: Self) -> Result<Self, FormulaError> {
        Self::new(product(self.num, other.num)?, product(self.den, other.den)?)
    }

    fn checked_div(self, other: Self) -> Result<Self, FormulaError> {
        if other.num == 0 {
            return Err(FormulaError::DivisionByZero);
        }
        Self::new(product(self.num, other.den)?, product(self.den, other.num)?)
    }

    fn checked_neg(self) -> Result<Self, FormulaError> {
        let num = self.num.checked_neg().ok_or(FormulaError::Overflow)?;
        Ok(Self { num, den: self.den })
    }

    fn floor(self) -> Result<i64, FormulaError> {
        // den is always positive, so Euclidean division rounds down.
        i64::try_from(self.num.div_euclid(self.den)).map_err(|_| FormulaError::Overflow)
    }
}

fn product(a: i128, b: i128) -> Result<i128, FormulaError> {
    a.checked_mul(b).ok_or(FormulaError::Overflow)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Recursive-descent parser that evaluates as it goes.
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := unary (('*' | '/') unary)*
/// unary   := ('+' | '-')* primary
/// primary := number | '(' expr ')'
/// ```
///
/// Parentheses recurse, so their nesting is capped at [`MAX_DEPTH`]. Sign
/// runs are folded in a loop and capped the same way.
struct Parser<'a> {
    tokens: Vec<(Token<'a>, usize)>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<(Token<'a>, usize)> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<(Token<'a>, usize)> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expr(&mut self) -> Result<Ratio, FormulaError> {
        let mut value = self.term()?;
        while let Some((token, _)) = self.peek() {
            match token {
                Token::Plus => {
                    self.pos += 1;
                    value = value.checked_add(self.term()?)?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value = value.checked_sub(self.term()?)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<Ratio, FormulaError> {
        let mut value = self.unary()?;
        while let Some((token, _)) = self.peek() {
            match token {
                Token::Star => {
                    self.pos += 1;
                    value = value.checked_mul(self.unary()?)?;
                }
                Token::Slash => {
                    self.pos += 1;
                    value = value.checked_div(self.unary()?)?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn unary(&mut self) -> Result<Ratio, FormulaError> {
        let mut negate = false;
        let mut signs = 0;
        while let Some((token, _)) = self.peek() {
            match token {
                Token::Minus => negate = !negate,
                Token::Plus => {}
                _ => break,
            }
            signs += 1;
            if signs > MAX_DEPTH {
                return Err(FormulaError::TooDeep { limit: MAX_DEPTH });
            }
            self.pos += 1;
        }
        let value = self.primary()?;
        if negate { value.checked_neg() } else { Ok(value) }
    }

    fn primary(&mut self) -> Result<Ratio, FormulaError> {
        match self.advance() {
            Some((Token::Number(digits), _)) => digits
                .parse::<i128>()
                .map(Ratio::int)
                .map_err(|_| FormulaError::Overflow),
            Some((Token::LParen, _)) => {
                self.depth += 1;
                if self.depth > MAX_DEPTH {
                    return Err(FormulaError::TooDeep { limit: MAX_DEPTH });
                }
                let value = self.expr()?;
                self.depth -= 1;
                match self.advance() {
                    Some((Token::RParen, _)) => Ok(value),
                    Some((token, position)) => Err(FormulaError::UnexpectedToken {
                        token: token.to_string(),
                        position,
                    }),
                    None => Err(FormulaError::UnbalancedParens),
                }
            }
            Some((Token::RParen, _)) => Err(FormulaError::UnbalancedParens),
            Some((token, position)) => Err(FormulaError::UnexpectedToken {
                token: token.to_string(),
                position,
            }),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_everything_else() {
        assert_eq!(sanitize("2 + abc(3) * 4!"), "2+(3)*4");
        assert_eq!(sanitize("1.5 + x"), "15+");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn precedence() {
        assert_eq!(evaluate("2+3*4"), Ok(14));
        assert_eq!(evaluate("(2+3)*4"), Ok(20));
        assert_eq!(evaluate("10-4-3"), Ok(3));
        assert_eq!(evaluate("24/4/2"), Ok(3));
    }

    #[test]
    fn division_floors() {
        assert_eq!(evaluate("7/2"), Ok(3));
        assert_eq!(evaluate("-7/2"), Ok(-4));
        assert_eq!(evaluate("7/2*2"), Ok(7));
        assert_eq!(evaluate("1/3+1/3+1/3"), Ok(1));
    }

    #[test]
    fn unary_signs() {
        assert_eq!(evaluate("-3+5"), Ok(2));
        assert_eq!(evaluate("+4"), Ok(4));
        assert_eq!(evaluate("2*-3"), Ok(-6));
        assert_eq!(evaluate("--3"), Ok(3));
        assert_eq!(evaluate("-+-3"), Ok(3));
    }

    #[test]
    fn whitespace_is_skipped() {
        assert_eq!(evaluate(" 1 +  2 "), Ok(3));
    }

    #[test]
    fn empty_is_an_error() {
        assert_eq!(evaluate(""), Err(FormulaError::EmptyExpression));
    }

    #[test]
    fn dangling_operator() {
        assert_eq!(evaluate("2+"), Err(FormulaError::UnexpectedEnd));
        assert_eq!(
            evaluate("*2"),
            Err(FormulaError::UnexpectedToken {
                token: "*".to_string(),
                position: 0,
            })
        );
    }

    #[test]
    fn unbalanced_parens() {
        assert_eq!(evaluate("(2+3"), Err(FormulaError::UnbalancedParens));
        assert_eq!(evaluate("2+3)"), Err(FormulaError::UnbalancedParens));
        assert_eq!(evaluate(")"), Err(FormulaError::UnbalancedParens));
    }

    #[test]
    fn juxtaposition_is_rejected() {
        assert!(matches!(
            evaluate("2(3)"),
            Err(FormulaError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(evaluate("4/0"), Err(FormulaError::DivisionByZero));
        assert_eq!(evaluate("4/(2-2)"), Err(FormulaError::DivisionByZero));
    }

    #[test]
    fn large_integers_are_exact() {
        assert_eq!(evaluate("9007199254740993"), Ok(9_007_199_254_740_993));
        assert_eq!(evaluate("9007199254740993+0"), Ok(9_007_199_254_740_993));
        assert_eq!(evaluate("9223372036854775807"), Ok(i64::MAX));
    }

    #[test]
    fn out_of_range_is_overflow() {
        let digits = "9".repeat(400);
        assert_eq!(evaluate(&digits), Err(FormulaError::Overflow));
        assert_eq!(evaluate("9223372036854775808"), Err(FormulaError::Overflow));
        let product = ["100000000000"; 4].join("*");
        assert_eq!(evaluate(&product), Err(FormulaError::Overflow));
    }

    #[test]
    fn nesting_at_the_limit_evaluates() {
        let source = format!("{}5{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(evaluate(&source), Ok(5));
        let signs = format!("{}5", "-".repeat(MAX_DEPTH));
        assert_eq!(evaluate(&signs), Ok(5));
    }

    #[test]
    fn deep_parens_are_rejected() {
        let source = format!("{}1{}", "(".repeat(20_000), ")".repeat(20_000));
        assert_eq!(
            evaluate(&source),
            Err(FormulaError::TooDeep { limit: MAX_DEPTH })
        );
    }

    #[test]
    fn long_sign_run_is_rejected() {
        let source = format!("{}1", "-".repeat(200_000));
        assert_eq!(
            evaluate(&source),
            Err(FormulaError::TooDeep { limit: MAX_DEPTH })
        );
    }

    #[test]
    fn depth_resets_between_siblings() {
        let group = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        let source = format!("{group}+{group}+{group}");
        assert_eq!(evaluate(&source), Ok(3));
    }
}
