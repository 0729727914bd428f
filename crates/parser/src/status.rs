use std::fmt;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseStatus {
    Success,
    /// The input held no equation at all (e.g. a blank line).
    SuccessNoEquation,
    ErrorIllegalEquation,
    ErrorNoEqualSign,
    ErrorMultipleEqualSigns,
    ErrorNoTermBeforeEqualSign,
    ErrorNoTermAfterEqualSign,
    /// Neither a number nor a variable where a term was expected.
    ErrorNoTermEncountered,
    ErrorNoVariableInEquation,
    ErrorMultipleDecimalPoints,
    /// A numeric literal longer than the configured maximum.
    ErrorTooManyDigits,
    /// A `^` not followed by any exponent digits.
    ErrorMissingExponent,
    /// An exponent that is too long or is not an integer.
    ErrorIllegalExponent,
}

impl ParseStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseStatus::Success | ParseStatus::SuccessNoEquation)
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Human readable description of the status.
    pub fn description(&self) -> &'static str {
        match self {
            ParseStatus::Success | ParseStatus::SuccessNoEquation => {
                "The equation was parsed successfully."
            }
            ParseStatus::ErrorIllegalEquation => "The equation syntax is illegal.",
            ParseStatus::ErrorNoEqualSign => "There is no equal sign in the equation.",
            ParseStatus::ErrorMultipleEqualSigns => {
                "There are multiple equal signs in the equation."
            }
            ParseStatus::ErrorNoTermBeforeEqualSign => {
                "There is no term before the equal sign in the equation."
            }
            ParseStatus::ErrorNoTermAfterEqualSign => {
                "There is no term after the equal sign in the equation."
            }
            ParseStatus::ErrorNoTermEncountered => "A number or a variable was expected.",
            ParseStatus::ErrorNoVariableInEquation => "There is no variable in the equation.",
            ParseStatus::ErrorMultipleDecimalPoints => {
                "A number contains more than one decimal point."
            }
            ParseStatus::ErrorTooManyDigits => "A number contains more than 20 digits.",
            ParseStatus::ErrorMissingExponent => {
                "A number contains the '^' character and is missing an exponent."
            }
            ParseStatus::ErrorIllegalExponent => "A number contains an illegal exponent.",
        }
    }
}

impl fmt::Display for ParseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_variants() {
        assert!(ParseStatus::Success.is_success());
        assert!(ParseStatus::SuccessNoEquation.is_success());
        assert!(ParseStatus::ErrorNoEqualSign.is_error());
        assert_eq!(
            ParseStatus::SuccessNoEquation.description(),
            ParseStatus::Success.description()
        );
    }

    #[test]
    fn test_display_is_description() {
        assert_eq!(
            ParseStatus::ErrorMultipleEqualSigns.to_string(),
            "There are multiple equal signs in the equation."
        );
        assert_eq!(
            ParseStatus::ErrorMissingExponent.to_string(),
            "A number contains the '^' character and is missing an exponent."
        );
    }
}
