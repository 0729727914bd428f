//! Line oriented scanner for systems of linear equations.
//!
//! Each line is scanned alternately for a term (`[sign] [number[^[sign]exponent]] [variable]`)
//! and an operator (`=`, `+` or `-`). Terms are folded into the implicit form
//! `coefficients * variables = rhs` as soon as they are read: variable terms accumulate into the
//! coefficient matrix and constant terms move to the right-hand side with their sign flipped.

use log::{debug, trace};
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{EquationSystem, ParseError, ParseStatus};

/// Limits on numeric literals.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of digits, and of characters including the decimal point, in a number.
    pub max_number_length: usize,
    /// Maximum number of digits in an exponent.
    pub max_exponent_length: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_number_length: 20,
            max_exponent_length: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Term,
    Operator,
}

/// Structural facts about the equation currently being parsed.
#[derive(Clone, Copy, Debug, Default)]
struct EquationFlags {
    equal_sign: bool,
    term_before_equal_sign: bool,
    term_after_equal_sign: bool,
    variable: bool,
}

impl EquationFlags {
    fn in_flight(&self) -> bool {
        self.equal_sign || self.term_before_equal_sign || self.term_after_equal_sign || self.variable
    }
}

/// A parsing session over the lines of one system of equations.
///
/// The session carries the scan state across lines, so an equation may continue on the next line
/// after a trailing operator. Use one session (and one [`EquationSystem`]) per input.
#[derive(Clone, Debug)]
pub struct EquationParser {
    config: ParserConfig,
    state: ScanState,
    /// row of the equation being parsed
    equation_index: usize,
    flags: EquationFlags,
    /// the last operator was a `-`
    negative_operator: bool,
    last_status: ParseStatus,
    error_position: usize,
    /// length of the last line passed to `parse`
    line_end: usize,
}

impl Default for EquationParser {
    fn default() -> Self {
        Self::new()
    }
}

impl EquationParser {
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        EquationParser {
            config,
            state: ScanState::Term,
            equation_index: 0,
            flags: EquationFlags::default(),
            negative_operator: false,
            last_status: ParseStatus::Success,
            error_position: 0,
            line_end: 0,
        }
    }

    /// Resets the session for a new system of equations.
    pub fn reset(&mut self) {
        *self = Self::with_config(self.config);
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// The status returned by the last call to [`EquationParser::parse`] or
    /// [`EquationParser::finish`].
    pub fn last_status(&self) -> ParseStatus {
        self.last_status
    }

    /// Character offset of the last error. Only meaningful when `last_status()` is an error.
    pub fn error_position(&self) -> usize {
        self.error_position
    }

    /// Number of equations completed so far.
    pub fn equation_index(&self) -> usize {
        self.equation_index
    }

    /// Parses one line of input into `system`.
    ///
    /// Returns `Ok(ParseStatus::Success)` when the line completed an equation or left one in
    /// flight after a trailing operator, and `Ok(ParseStatus::SuccessNoEquation)` for a line with
    /// no content. A completed equation is validated immediately and, if valid, advances
    /// `system.equation_count`.
    ///
    /// The first error stops the scan. Terms read before the error have already been written to
    /// `system`, so neither the session nor the system should be used after an error.
    pub fn parse(
        &mut self,
        line: &str,
        system: &mut EquationSystem,
    ) -> Result<ParseStatus, ParseError> {
        let chars: Vec<char> = line.chars().collect();
        let mut cursor = Cursor::new(&chars);
        self.line_end = chars.len();

        let result = self.scan_line(&mut cursor, system);
        self.record(result)
    }

    /// Validates the end of the input. An equation left in flight by a trailing operator on the
    /// last line is reported as an error.
    pub fn finish(&mut self) -> Result<ParseStatus, ParseError> {
        let result = if self.state == ScanState::Term && self.flags.in_flight() {
            let status = match self.equation_status() {
                // the equation itself is fine but the trailing operator has no term
                ParseStatus::Success => ParseStatus::ErrorNoTermEncountered,
                status => status,
            };
            Err(ParseError::new(status, self.line_end))
        } else {
            Ok(ParseStatus::Success)
        };
        self.record(result)
    }

    fn record(
        &mut self,
        result: Result<ParseStatus, ParseError>,
    ) -> Result<ParseStatus, ParseError> {
        match result {
            Ok(status) => {
                self.last_status = status;
                self.error_position = 0;
            }
            Err(err) => {
                self.last_status = err.status;
                self.error_position = err.position;
            }
        }
        result
    }

    fn scan_line(
        &mut self,
        cursor: &mut Cursor,
        system: &mut EquationSystem,
    ) -> Result<ParseStatus, ParseError> {
        loop {
            cursor.skip_whitespace();
            if cursor.at_end() {
                break;
            }

            match self.state {
                ScanState::Term => {
                    self.parse_term(cursor, system)?;
                    self.state = ScanState::Operator;
                }
                ScanState::Operator => {
                    if self.parse_operator(cursor)? {
                        self.state = ScanState::Term;
                    } else {
                        return Err(ParseError::new(
                            ParseStatus::ErrorIllegalEquation,
                            cursor.pos,
                        ));
                    }
                }
            }
        }

        match self.state {
            // the line ended right after a term, so the equation is complete
            ScanState::Operator => self.complete_equation(system, cursor.pos),
            ScanState::Term if self.flags.in_flight() => Ok(ParseStatus::Success),
            ScanState::Term => Ok(ParseStatus::SuccessNoEquation),
        }
    }

    fn complete_equation(
        &mut self,
        system: &mut EquationSystem,
        position: usize,
    ) -> Result<ParseStatus, ParseError> {
        match self.equation_status() {
            ParseStatus::Success => {
                debug!(
                    "equation {} complete, {} variables so far",
                    self.equation_index,
                    system.variable_count()
                );
                self.reset_for_new_equation();
                system.equation_count = self.equation_index;
                Ok(ParseStatus::Success)
            }
            status => Err(ParseError::new(status, position)),
        }
    }

    /// Classifies the current equation from its flags.
    fn equation_status(&self) -> ParseStatus {
        let flags = &self.flags;
        if !flags.in_flight() {
            ParseStatus::SuccessNoEquation
        } else if !flags.equal_sign {
            ParseStatus::ErrorNoEqualSign
        } else if !flags.term_before_equal_sign {
            ParseStatus::ErrorNoTermBeforeEqualSign
        } else if !flags.term_after_equal_sign {
            ParseStatus::ErrorNoTermAfterEqualSign
        } else if !flags.variable {
            ParseStatus::ErrorNoVariableInEquation
        } else {
            ParseStatus::Success
        }
    }

    fn reset_for_new_equation(&mut self) {
        self.flags = EquationFlags::default();
        self.negative_operator = false;
        self.state = ScanState::Term;
        self.equation_index += 1;
    }

    /// Reads one term and adds it to `system`.
    fn parse_term(
        &mut self,
        cursor: &mut Cursor,
        system: &mut EquationSystem,
    ) -> Result<(), ParseError> {
        let negative_number = cursor.take_sign() == Some(true);
        cursor.skip_whitespace();

        let number_start = cursor.pos;
        let number = match self.scan_number(cursor)? {
            Some(mantissa) if cursor.peek() == Some('^') => {
                cursor.bump();
                let exponent = self.scan_exponent(cursor)?;
                Some(format!("{mantissa}e{exponent}"))
            }
            number => number,
        };

        cursor.skip_whitespace();
        let variable = cursor.take_variable_name();

        // terms after the equal sign move to the left-hand side
        let negative = self.flags.equal_sign ^ self.negative_operator ^ negative_number;

        let magnitude = match &number {
            Some(text) => text
                .parse::<f64>()
                .map_err(|_| ParseError::new(ParseStatus::ErrorIllegalEquation, number_start))?,
            None => 1.0,
        };
        let value = if negative { -magnitude } else { magnitude };

        match (variable, number) {
            (Some(name), _) => {
                self.flags.variable = true;
                let col = system.variable_index(&name);
                trace!("A[{}, {}] += {}", self.equation_index, col, value);
                system.matrix.add_assign(self.equation_index, col, value);
            }
            (None, Some(_)) => {
                trace!("b[{}] -= {}", self.equation_index, value);
                system.rhs.add_assign(self.equation_index, -value);
            }
            (None, None) => {
                return Err(ParseError::new(
                    ParseStatus::ErrorNoTermEncountered,
                    cursor.pos,
                ));
            }
        }

        if self.flags.equal_sign {
            self.flags.term_after_equal_sign = true;
        } else {
            self.flags.term_before_equal_sign = true;
        }

        cursor.skip_whitespace();
        Ok(())
    }

    /// Reads an `=` and/or a `+`/`-`. Returns `false` if neither is present.
    fn parse_operator(&mut self, cursor: &mut Cursor) -> Result<bool, ParseError> {
        cursor.skip_whitespace();
        self.negative_operator = false;

        let mut have_equal_sign = false;
        if cursor.peek() == Some('=') {
            if self.flags.equal_sign {
                return Err(ParseError::new(
                    ParseStatus::ErrorMultipleEqualSigns,
                    cursor.pos,
                ));
            }
            self.flags.equal_sign = true;
            have_equal_sign = true;
            cursor.bump();
        }

        let sign = cursor.take_sign();
        if let Some(negative) = sign {
            self.negative_operator = negative;
        }

        Ok(have_equal_sign || sign.is_some())
    }

    /// Reads a decimal literal. Returns `None` if there is no digit at the cursor.
    fn scan_number(&self, cursor: &mut Cursor) -> Result<Option<String>, ParseError> {
        let start = cursor.pos;
        let max = self.config.max_number_length;

        let mut text = String::new();
        let mut digits = 0;
        let mut decimal_points = 0;

        while let Some(c) = cursor.peek() {
            if c.is_ascii_digit() {
                digits += 1;
                if digits > max {
                    return Err(ParseError::new(ParseStatus::ErrorTooManyDigits, cursor.pos));
                }
            } else if c == '.' {
                decimal_points += 1;
                if decimal_points > 1 {
                    return Err(ParseError::new(
                        ParseStatus::ErrorMultipleDecimalPoints,
                        cursor.pos,
                    ));
                }
            } else {
                break;
            }
            text.push(c);
            cursor.bump();
        }

        if text.len() > max {
            return Err(ParseError::new(ParseStatus::ErrorTooManyDigits, cursor.pos));
        }

        match (digits, decimal_points) {
            (0, 0) => Ok(None),
            // a lone decimal point
            (0, _) => Err(ParseError::new(ParseStatus::ErrorIllegalEquation, start)),
            _ => Ok(Some(text)),
        }
    }

    /// Reads the exponent after a `^`, returning it with its sign, e.g. `-3`.
    fn scan_exponent(&self, cursor: &mut Cursor) -> Result<String, ParseError> {
        let negative = cursor.take_sign() == Some(true);

        let mut digits = String::new();
        while let Some(c) = cursor.peek() {
            if !(c.is_ascii_digit() || c == '.') {
                break;
            }
            digits.push(c);
            cursor.bump();
        }

        if digits.is_empty() {
            return Err(ParseError::new(
                ParseStatus::ErrorMissingExponent,
                cursor.pos,
            ));
        }
        if digits.len() > self.config.max_exponent_length || digits.contains('.') {
            return Err(ParseError::new(
                ParseStatus::ErrorIllegalExponent,
                cursor.pos,
            ));
        }

        Ok(if negative { format!("-{digits}") } else { digits })
    }
}

/// Position in a line, counted in characters.
struct Cursor<'a> {
    chars: &'a [char],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(chars: &'a [char]) -> Self {
        Cursor { chars, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// Consumes a `+` or `-`, returning `Some(true)` for a minus.
    fn take_sign(&mut self) -> Option<bool> {
        let negative = match self.peek()? {
            '+' => false,
            '-' => true,
            _ => return None,
        };
        self.bump();
        Some(negative)
    }

    fn take_variable_name(&mut self) -> Option<String> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !(c.is_alphabetic() || c == '_') {
                break;
            }
            name.push(c);
            self.bump();
        }
        (!name.is_empty()).then_some(name)
    }
}
