//! 算术求值器
//!
//! 仅接受数字、+ - * /、括号、小数点与空白；先做字符白名单检查，再跑递归下降解析
//! （expr → term → factor → primary，支持一元正负号）。除零与语法错误作为固定文本
//! 结果返回，公开边界 evaluate 从不 panic。

use thiserror::Error;

/// 求值失败的固定消息（与对外文本一一对应）
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Invalid expression. Only numbers and operators (+, -, *, /, parentheses) are allowed.")]
    DisallowedCharacter,

    #[error("Error: Empty expression.")]
    EmptyExpression,

    #[error("Error: Division by zero.")]
    DivisionByZero,

    #[error("Error: Invalid syntax in expression.")]
    InvalidSyntax,
}

/// 对外边界：任何输入都得到文本结果，错误以固定消息返回
pub fn evaluate(expression: &str) -> String {
    match try_evaluate(expression) {
        Ok(result) => result,
        Err(e) => e.to_string(),
    }
}

/// 内部边界：供处理器区分成功与失败（失败时降低置信度）
pub fn try_evaluate(expression: &str) -> Result<String, CalcError> {
    let expression = expression.trim();

    if !is_valid_expression(expression) {
        return Err(CalcError::DisallowedCharacter);
    }
    if expression.is_empty() {
        return Err(CalcError::EmptyExpression);
    }

    let mut parser = Parser::new(expression);
    let value = parser.parse_expr()?;
    if parser.peek().is_some() {
        // 表达式已结束却还有残余字符，如 "1 2" 或 "(1+2))"
        return Err(CalcError::InvalidSyntax);
    }
    Ok(format_number(value))
}

/// 字符白名单：数字、四则运算符、括号、小数点、空白
fn is_valid_expression(expr: &str) -> bool {
    expr.chars().all(|c| {
        c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.') || c.is_whitespace()
    })
}

/// 整数值不带小数部分输出（"5" 而非 "5.0"）
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// 递归下降解析器：
/// expr   := term (('+'|'-') term)*
/// term   := factor (('*'|'/') factor)*
/// factor := ('+'|'-')* primary
/// primary:= number | '(' expr ')'
struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        self.peek();
        self.chars.next()
    }

    fn parse_expr(&mut self) -> Result<f64, CalcError> {
        let mut value = self.parse_term()?;
        while let Some(op) = self.peek() {
            match op {
                '+' => {
                    self.bump();
                    value += self.parse_term()?;
                }
                '-' => {
                    self.bump();
                    value -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_term(&mut self) -> Result<f64, CalcError> {
        let mut value = self.parse_factor()?;
        while let Some(op) = self.peek() {
            match op {
                '*' => {
                    self.bump();
                    value *= self.parse_factor()?;
                }
                '/' => {
                    self.bump();
                    let divisor = self.parse_factor()?;
                    if divisor == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_factor(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some('+') => {
                self.bump();
                self.parse_factor()
            }
            Some('-') => {
                self.bump();
                Ok(-self.parse_factor()?)
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some('(') => {
                self.bump();
                let value = self.parse_expr()?;
                if self.peek() != Some(')') {
                    return Err(CalcError::InvalidSyntax);
                }
                self.bump();
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.parse_number(),
            _ => Err(CalcError::InvalidSyntax),
        }
    }

    fn parse_number(&mut self) -> Result<f64, CalcError> {
        let mut literal = String::new();
        // 数字内部不允许空白，直接看原始流
        while matches!(self.chars.peek(), Some(&c) if c.is_ascii_digit() || c == '.') {
            literal.push(self.chars.next().unwrap());
        }
        literal.parse().map_err(|_| CalcError::InvalidSyntax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_arithmetic() {
        assert_eq!(evaluate("2 + 3"), "5");
        assert_eq!(evaluate("10 * 5"), "50");
        assert_eq!(evaluate("7 - 4"), "3");
        assert_eq!(evaluate("10 / 4"), "2.5");
    }

    #[test]
    fn precedence_and_parentheses() {
        assert_eq!(evaluate("2 + 3 * 4"), "14");
        assert_eq!(evaluate("(2 + 3) * 4"), "20");
        assert_eq!(evaluate("2 * (3 + 4) / 7"), "2");
    }

    #[test]
    fn unary_minus() {
        assert_eq!(evaluate("-5 + 3"), "-2");
        assert_eq!(evaluate("2 * -3"), "-6");
        assert_eq!(evaluate("-(2 + 3)"), "-5");
    }

    #[test]
    fn decimals() {
        assert_eq!(evaluate("1.5 + 2.5"), "4");
        assert_eq!(evaluate("0.1 * 10"), "1");
        assert_eq!(evaluate(".5 + .5"), "1");
    }

    #[test]
    fn integer_division_prints_without_fraction() {
        assert_eq!(evaluate("10 / 2"), "5");
    }

    #[test]
    fn division_by_zero_message() {
        assert_eq!(evaluate("10 / 0"), "Error: Division by zero.");
        assert_eq!(evaluate("1 / (2 - 2)"), "Error: Division by zero.");
    }

    #[test]
    fn disallowed_characters_message() {
        let expected =
            "Invalid expression. Only numbers and operators (+, -, *, /, parentheses) are allowed.";
        assert_eq!(evaluate("abc + 3"), expected);
        assert_eq!(evaluate("2 ** 3; import os"), expected);
        assert_eq!(evaluate("2 ^ 3"), expected);
    }

    #[test]
    fn empty_expression_message() {
        assert_eq!(evaluate(""), "Error: Empty expression.");
        assert_eq!(evaluate("   "), "Error: Empty expression.");
    }

    #[test]
    fn syntax_errors_message() {
        let expected = "Error: Invalid syntax in expression.";
        assert_eq!(evaluate("2 +"), expected);
        assert_eq!(evaluate("(2 + 3"), expected);
        assert_eq!(evaluate("2 3"), expected);
        assert_eq!(evaluate("1..2"), expected);
        assert_eq!(evaluate("()"), expected);
    }

    #[test]
    fn never_panics_on_operator_soup() {
        for expr in ["+", "-", "*", "/", "((((", "))))", "...", "1/ /2"] {
            let _ = evaluate(expr);
        }
    }
}
