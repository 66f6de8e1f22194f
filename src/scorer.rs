//! Letter-by-letter scoring of a guess against the target name.
//!
//! Scoring is the classic two-pass Wordle match: exact positions first, then
//! presence against whatever target letters are still unused. Comparison is
//! case-insensitive and ignores accents, so `evoli` scores all green against
//! `Évoli`.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterVerdict {
    Correct, // Green
    Present, // Yellow
    Absent,  // Gray
}

impl LetterVerdict {
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Self::Correct),
            'Y' => Some(Self::Present),
            'X' => Some(Self::Absent),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Maps one character to its lowercase, unaccented form.
///
/// Always returns exactly one character so folded strings keep the same
/// positions as the raw input.
#[must_use]
pub fn fold_char(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => 'c',
        'ď' | 'đ' => 'd',
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => 'e',
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => 'g',
        'ĥ' | 'ħ' => 'h',
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => 'i',
        'ĵ' => 'j',
        'ķ' => 'k',
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => 'l',
        'ñ' | 'ń' | 'ņ' | 'ň' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => 'o',
        'ŕ' | 'ŗ' | 'ř' => 'r',
        'ś' | 'ŝ' | 'ş' | 'š' => 's',
        'ţ' | 'ť' | 'ŧ' => 't',
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => 'u',
        'ŵ' => 'w',
        'ý' | 'ÿ' | 'ŷ' => 'y',
        'ź' | 'ż' | 'ž' => 'z',
        other => other,
    }
}

#[must_use]
pub fn normalize(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// True when the guess names the target, ignoring case and accents.
#[must_use]
pub fn matches_target(guess: &str, target: &str) -> bool {
    normalize(guess) == normalize(target)
}

#[must_use]
pub fn is_solved(verdicts: &[LetterVerdict]) -> bool {
    !verdicts.is_empty() && verdicts.iter().all(|v| *v == LetterVerdict::Correct)
}

/// Scores `guess` against `target`, one verdict per guessed character.
#[must_use]
pub fn score(guess: &str, target: &str) -> Vec<LetterVerdict> {
    let guess_chars: Vec<char> = guess.chars().map(fold_char).collect();
    let mut pool: Vec<Option<char>> = target.chars().map(|c| Some(fold_char(c))).collect();
    let mut verdicts = vec![LetterVerdict::Absent; guess_chars.len()];
    let overlap = guess_chars.len().min(pool.len());

    // First pass: greens
    for i in 0..overlap {
        if pool[i] == Some(guess_chars[i]) {
            verdicts[i] = LetterVerdict::Correct;
            pool[i] = None; // Mark as used
        }
    }

    // Second pass: yellows
    for i in 0..overlap {
        if verdicts[i] == LetterVerdict::Correct {
            continue;
        }
        if let Some(pos) = pool.iter().position(|&c| c == Some(guess_chars[i])) {
            verdicts[i] = LetterVerdict::Present;
            pool[pos] = None;
        }
    }

    verdicts
}
