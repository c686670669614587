//! Alphabets, and the fixed tables of them the generator knows about.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::{Error, Result};

/// An ordered set of distinct symbols to draw characters from.
///
/// Clones share storage, so passing an alphabet around (or into a worker thread) is cheap.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Alphabet(Arc<[char]>);

impl Alphabet {
    pub fn new(symbols: &str) -> Result<Alphabet> {
        let mut seen = HashSet::new();
        for ch in symbols.chars() {
            if !seen.insert(ch) {
                return Err(Error::DuplicateSymbol(ch));
            }
        }
        if seen.is_empty() {
            return Err(Error::EmptyAlphabet);
        }
        Ok(Alphabet(symbols.chars().collect()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; an `Alphabet` can't be constructed empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.0
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0.iter().collect::<String>();
        f.debug_tuple("Alphabet").field(&s).finish()
    }
}

impl FromStr for Alphabet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Alphabet> {
        Alphabet::new(s)
    }
}

static LOWER_CHARS: &str = "abcdefghijklmnopqrstuvwxyz";
static UPPER_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
static DIGIT_CHARS: &str = "0123456789";
static SPECIAL_CHARS: &str = " !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

static HEXADECIMAL_CHARS: &str = "0123456789abcdef";
static BASE32_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";
static BASE58_CHARS: &str = "ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz123456789";
static BASE64_CHARS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

pub static LOWER: Lazy<Alphabet> = Lazy::new(|| builtin(LOWER_CHARS));
pub static UPPER: Lazy<Alphabet> = Lazy::new(|| builtin(UPPER_CHARS));
pub static DIGITS: Lazy<Alphabet> = Lazy::new(|| builtin(DIGIT_CHARS));
pub static SPECIAL: Lazy<Alphabet> = Lazy::new(|| builtin(SPECIAL_CHARS));

static HEXADECIMAL: Lazy<Alphabet> = Lazy::new(|| builtin(HEXADECIMAL_CHARS));
static BASE32: Lazy<Alphabet> = Lazy::new(|| builtin(BASE32_CHARS));
static BASE58: Lazy<Alphabet> = Lazy::new(|| builtin(BASE58_CHARS));
static BASE64: Lazy<Alphabet> = Lazy::new(|| builtin(BASE64_CHARS));

fn builtin(symbols: &'static str) -> Alphabet {
    Alphabet::new(symbols).expect("built-in alphabets are non-empty and free of duplicates")
}

/// A named encoding alphabet, for passwords with no per-category requirements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scheme {
    Hexadecimal,
    Base32,
    Base58,
    Base64,
}

impl Scheme {
    pub const ALL: [Scheme; 4] = [
        Scheme::Hexadecimal,
        Scheme::Base32,
        Scheme::Base58,
        Scheme::Base64,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Hexadecimal => "hexadecimal",
            Scheme::Base32 => "base32",
            Scheme::Base58 => "base58",
            Scheme::Base64 => "base64",
        }
    }

    pub fn alphabet(self) -> &'static Alphabet {
        match self {
            Scheme::Hexadecimal => &*HEXADECIMAL,
            Scheme::Base32 => &*BASE32,
            Scheme::Base58 => &*BASE58,
            Scheme::Base64 => &*BASE64,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Scheme> {
        let lower = s.to_lowercase();
        Scheme::ALL
            .into_iter()
            .find(|scheme| scheme.name() == lower)
            .ok_or_else(|| Error::InvalidEncodingScheme(s.to_owned()))
    }
}
