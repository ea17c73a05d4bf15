//! American Soundex encoding for personal names and surnames.
//!
//! The encoder is a straight pipeline of pure stages:
//! - `normalize`: reject empty or non-alphabetic input, lowercase
//! - `classify`: pair every letter with its phonetic class
//! - `collapse`: merge adjacent letters of the same class (h/w bridge)
//! - `drop_head`: discard the first letter's class
//! - `remove_classless`: keep only digit-bearing letters
//! - `fixed_width`: pad or truncate to three digits
//!
//! `encode` runs them in order and prepends the name's original first
//! character.

use namedex_model::{ClassifiedLetter, Code, SoundexError};
use tracing::{debug, trace};

pub use namedex_model::{PhoneticClass, CLASS_TABLE};

/// Number of digits in a code.
pub const DIGITS: usize = 3;

/// Compute the Soundex code of a name.
///
/// The head of the code keeps the case it has in `name`.
pub fn encode(name: &str) -> Result<Code, SoundexError> {
    let normalized = normalize(name)?;
    let head = name.chars().next().ok_or(SoundexError::EmptyInput)?;

    let collapsed = collapse(&classify(&normalized));
    let Some(tail) = drop_head(&collapsed) else {
        unreachable!("collapse always keeps the first letter of a non-empty name");
    };
    let digits = remove_classless(tail);

    let code = Code::new(head, fixed_width(&digits));
    trace!(name, code = %code, "encoded name");
    Ok(code)
}

/// Validate a name and lowercase it, one character out per character in.
pub fn normalize(name: &str) -> Result<Vec<char>, SoundexError> {
    if name.is_empty() {
        debug!("rejected empty name");
        return Err(SoundexError::EmptyInput);
    }

    name.chars()
        .enumerate()
        .map(|(position, ch)| {
            if ch.is_alphabetic() {
                // Multi-char lowercase expansions keep their first char
                Ok(ch.to_lowercase().next().unwrap_or(ch))
            } else {
                debug!(name, position, character = ?ch, "rejected non-alphabetic character");
                Err(SoundexError::InvalidCharacter(ch))
            }
        })
        .collect()
}

/// Pair each normalized letter with its phonetic class.
pub fn classify(letters: &[char]) -> Vec<ClassifiedLetter> {
    letters.iter().map(|&letter| ClassifiedLetter::new(letter)).collect()
}

/// Remove letters whose class repeats the last retained class.
///
/// An `h` or `w` sitting between two letters of the same class is removed
/// as well, so the consonant after it collapses into the one before it.
/// The first letter is always retained.
pub fn collapse(letters: &[ClassifiedLetter]) -> Vec<ClassifiedLetter> {
    let Some((&first, rest)) = letters.split_first() else {
        return Vec::new();
    };

    let mut kept = Vec::with_capacity(letters.len());
    kept.push(first);
    let mut last = first.class;

    for (i, &current) in rest.iter().enumerate() {
        if current.class == last {
            continue;
        }
        if current.is_bridge() && rest.get(i + 1).is_some_and(|next| next.class == last) {
            continue;
        }
        kept.push(current);
        last = current.class;
    }

    kept
}

/// Discard the first letter, which the code carries as its head.
///
/// Returns `None` only for an empty sequence.
pub fn drop_head(letters: &[ClassifiedLetter]) -> Option<&[ClassifiedLetter]> {
    letters.split_first().map(|(_, rest)| rest)
}

/// Digits of every letter that has one, in order.
pub fn remove_classless(letters: &[ClassifiedLetter]) -> Vec<char> {
    letters.iter().filter_map(|l| l.class.digit()).collect()
}

/// Right-pad with '0' or truncate to exactly three digits.
pub fn fixed_width(digits: &[char]) -> [char; DIGITS] {
    let mut out = ['0'; DIGITS];
    for (slot, &digit) in out.iter_mut().zip(digits) {
        *slot = digit;
    }
    out
}
