//! Core domain model for namedex Soundex encoding.
//!
//! This crate defines the values that flow through the encoder:
//! - `PhoneticClass`: the seven sound groups a letter can fall into
//! - `ClassifiedLetter`: a letter paired with its class
//! - `Code`: the finished four-character Soundex code
//! - `SoundexError`: the ways a name can be rejected

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned when a name cannot be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SoundexError {
    #[error("name must not be empty")]
    EmptyInput,
    #[error("name contains non-alphabetic character {0:?}")]
    InvalidCharacter(char),
}

/// Errors from parsing a string as a `Code`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodeParseError {
    #[error("code must be 4 characters, got {0}")]
    Length(usize),
    #[error("code must start with a letter, got {0:?}")]
    Head(char),
    #[error("code digit must be 0-6, got {0:?}")]
    Digit(char),
}

/// Sound group of a letter.
///
/// `Drop` covers vowels, y, h and w. The other six carry the digits 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneticClass {
    /// Vowels, y, h, w: no digit
    Drop,
    /// b f p v
    B,
    /// c g j k q s x z
    C,
    /// d t
    D,
    /// l
    L,
    /// m n
    M,
    /// r
    R,
}

use PhoneticClass::{Drop as X, B, C, D, L, M, R};

/// Class of every ASCII letter, indexed by `letter - 'a'`.
pub const CLASS_TABLE: [PhoneticClass; 26] = [
    X, B, C, D, X, B, C, X, X, C, C, L, M, // a..m
    M, X, B, C, R, C, D, X, B, X, C, X, C, // n..z
];

impl PhoneticClass {
    pub const ALL: [PhoneticClass; 7] = [X, B, C, D, L, M, R];

    /// Look up the class of a lowercase letter.
    ///
    /// Anything outside `a..=z` is `Drop`: it can never contribute a digit.
    pub fn of(letter: char) -> Self {
        if letter.is_ascii_lowercase() {
            CLASS_TABLE[(letter as u8 - b'a') as usize]
        } else {
            Self::Drop
        }
    }

    /// Digit written for this class, if any.
    pub fn digit(self) -> Option<char> {
        match self {
            Self::Drop => None,
            Self::B => Some('1'),
            Self::C => Some('2'),
            Self::D => Some('3'),
            Self::L => Some('4'),
            Self::M => Some('5'),
            Self::R => Some('6'),
        }
    }

    /// Letters belonging to this class.
    pub fn members(self) -> &'static [char] {
        match self {
            Self::Drop => &['a', 'e', 'i', 'o', 'u', 'y', 'h', 'w'],
            Self::B => &['b', 'f', 'p', 'v'],
            Self::C => &['c', 'g', 'j', 'k', 'q', 's', 'x', 'z'],
            Self::D => &['d', 't'],
            Self::L => &['l'],
            Self::M => &['m', 'n'],
            Self::R => &['r'],
        }
    }
}

/// A normalized letter together with its phonetic class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedLetter {
    pub letter: char,
    pub class: PhoneticClass,
}

impl ClassifiedLetter {
    pub fn new(letter: char) -> Self {
        Self {
            letter,
            class: PhoneticClass::of(letter),
        }
    }

    /// Whether this is one of the letters that may bridge two consonants.
    pub fn is_bridge(&self) -> bool {
        matches!(self.letter, 'h' | 'w')
    }
}

/// A four-character Soundex code: head letter plus three digits.
///
/// The head keeps the case it had in the encoded name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(String);

impl Code {
    /// Assemble a code from its parts.
    pub fn new(head: char, digits: [char; 3]) -> Self {
        let mut code = String::with_capacity(head.len_utf8() + 3);
        code.push(head);
        code.extend(digits);
        Self(code)
    }

    /// The retained first letter of the name.
    pub fn head(&self) -> char {
        self.0.chars().next().unwrap_or_default()
    }

    /// The three-digit tail.
    pub fn digits(&self) -> &str {
        &self.0[self.head().len_utf8()..]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for Code {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Code {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Code {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for Code {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}

impl FromStr for Code {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let &[head, d1, d2, d3] = chars.as_slice() else {
            return Err(CodeParseError::Length(chars.len()));
        };
        if !head.is_alphabetic() {
            return Err(CodeParseError::Head(head));
        }
        for d in [d1, d2, d3] {
            if !('0'..='6').contains(&d) {
                return Err(CodeParseError::Digit(d));
            }
        }
        Ok(Self::new(head, [d1, d2, d3]))
    }
}

impl TryFrom<String> for Code {
    type Error = CodeParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_every_letter_in_exactly_one_class() {
        for letter in 'a'..='z' {
            let owners: Vec<PhoneticClass> = PhoneticClass::ALL
                .into_iter()
                .filter(|class| class.members().contains(&letter))
                .collect();
            assert_eq!(owners, vec![PhoneticClass::of(letter)], "letter {letter}");
        }
    }

    #[test]
    fn test_members_cover_table() {
        let total: usize = PhoneticClass::ALL.iter().map(|c| c.members().len()).sum();
        assert_eq!(total, 26);
    }

    #[test]
    fn test_non_ascii_is_drop() {
        assert_eq!(PhoneticClass::of('é'), PhoneticClass::Drop);
        assert_eq!(PhoneticClass::of('ß'), PhoneticClass::Drop);
        assert_eq!(PhoneticClass::of('B'), PhoneticClass::Drop);
    }

    #[test]
    fn test_digits() {
        assert_eq!(PhoneticClass::Drop.digit(), None);
        let digits: String = PhoneticClass::ALL.iter().filter_map(|c| c.digit()).collect();
        assert_eq!(digits, "123456");
    }

    #[test]
    fn test_bridge_letters() {
        assert!(ClassifiedLetter::new('h').is_bridge());
        assert!(ClassifiedLetter::new('w').is_bridge());
        assert!(!ClassifiedLetter::new('y').is_bridge());
    }

    #[test]
    fn test_code_parts() {
        let code = Code::new('R', ['1', '6', '3']);
        assert_eq!(code, "R163");
        assert_eq!(code.head(), 'R');
        assert_eq!(code.digits(), "163");
        assert_eq!(code.len(), 4);
    }

    #[test]
    fn test_code_parse() {
        assert_eq!("A261".parse::<Code>(), Ok(Code::new('A', ['2', '6', '1'])));
        assert_eq!("A26".parse::<Code>(), Err(CodeParseError::Length(3)));
        assert_eq!("1261".parse::<Code>(), Err(CodeParseError::Head('1')));
        assert_eq!("A271".parse::<Code>(), Err(CodeParseError::Digit('7')));
    }

    #[test]
    fn test_code_serialization() {
        let code = Code::new('m', ['2', '3', '5']);
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"m235\"");
        let parsed: Code = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, code);
        assert!(serde_json::from_str::<Code>("\"m2x5\"").is_err());
    }

    #[test]
    fn test_class_serialization() {
        let letter = ClassifiedLetter::new('s');
        let json = serde_json::to_string(&letter).unwrap();
        assert_eq!(json, r#"{"letter":"s","class":"c"}"#);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(SoundexError::EmptyInput.to_string(), "name must not be empty");
        assert_eq!(
            SoundexError::InvalidCharacter('3').to_string(),
            "name contains non-alphabetic character '3'"
        );
    }
}
