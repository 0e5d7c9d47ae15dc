//! Human cell references: `"а, 1"`, `"d 7"`, `"к10"`, `"восемь четыре"`.
//!
//! Decoding runs a short pipeline: the input is split into a column and a row
//! token by the first matching pattern, each token goes through the
//! speech-recognition correction table, and then resolves as a numeral, a
//! number word or (column only) a letter. Letters are Cyrillic; Latin input
//! is transliterated first so that `d` reads as `д`.

use alloc::string::{String, ToString};
use alloc::format;

use crate::core::{Axis, ParseError, Position, MAX_BOARD_SIZE};

/// Column letters, one per column.
pub const LETTERS: [char; MAX_BOARD_SIZE] = ['а', 'б', 'в', 'г', 'д', 'е', 'ж', 'з', 'и', 'к'];

/// Number words for 1 through 10.
pub const NUMBER_WORDS: [&str; MAX_BOARD_SIZE] = [
    "один", "два", "три", "четыре", "пять", "шесть", "семь", "восемь", "девять", "десять",
];

/// Words a speech recognizer tends to produce instead of a coordinate.
const CORRECTIONS: [(&str, &str); 4] = [
    ("the", "з"),
    ("за", "з"),
    ("уже", "ж"),
    ("трень", "3"),
];

/// Latin to Cyrillic, longest sequences first.
const TRANSLIT: [(&str, char); 29] = [
    ("shch", 'щ'),
    ("zh", 'ж'),
    ("kh", 'х'),
    ("ts", 'ц'),
    ("ch", 'ч'),
    ("sh", 'ш'),
    ("yu", 'ю'),
    ("ya", 'я'),
    ("a", 'а'),
    ("b", 'б'),
    ("v", 'в'),
    ("g", 'г'),
    ("d", 'д'),
    ("e", 'е'),
    ("z", 'з'),
    ("i", 'и'),
    ("j", 'й'),
    ("k", 'к'),
    ("l", 'л'),
    ("m", 'м'),
    ("n", 'н'),
    ("o", 'о'),
    ("p", 'п'),
    ("r", 'р'),
    ("s", 'с'),
    ("t", 'т'),
    ("u", 'у'),
    ("f", 'ф'),
    ("h", 'х'),
];

type SplitPattern = fn(&str) -> Option<(&str, &str)>;

/// Tried in order; the first that matches the whole input wins.
const SPLIT_PATTERNS: [SplitPattern; 2] = [split_glued, split_separated];

fn is_letter(c: char) -> bool {
    c.is_ascii_lowercase() || ('а'..='я').contains(&c)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `a1`, `к10`: letters immediately followed by digits.
fn split_glued(text: &str) -> Option<(&str, &str)> {
    let at = text.find(|c: char| !is_letter(c))?;
    let (column, row) = text.split_at(at);
    let all_digits = row.chars().all(|c| c.is_ascii_digit());
    (!column.is_empty() && !row.is_empty() && all_digits).then_some((column, row))
}

/// `a 1`, `а, один`, `7 10`: two words separated by blanks and/or commas.
fn split_separated(text: &str) -> Option<(&str, &str)> {
    let mut tokens = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty());
    let column = tokens.next()?;
    let row = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }
    let is_word = |t: &str| t.chars().all(is_word_char);
    (is_word(column) && is_word(row)).then_some((column, row))
}

fn correct(token: &str) -> &str {
    CORRECTIONS
        .iter()
        .find(|(heard, _)| *heard == token)
        .map_or(token, |(_, meant)| *meant)
}

/// Replace Latin look-alikes with their Cyrillic counterparts.
pub fn transliterate(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut rest = token;
    'outer: while let Some(c) = rest.chars().next() {
        for (latin, cyrillic) in TRANSLIT {
            if let Some(tail) = rest.strip_prefix(latin) {
                out.push(cyrillic);
                rest = tail;
                continue 'outer;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

fn try_number(token: &str) -> Option<usize> {
    let token = correct(token);
    let n: usize = if token.chars().all(|c| c.is_ascii_digit()) {
        token.parse().ok()?
    } else {
        NUMBER_WORDS.iter().position(|w| *w == token)? + 1
    };
    (1..=MAX_BOARD_SIZE).contains(&n).then_some(n)
}

fn try_letter(token: &str) -> Option<usize> {
    let letter = transliterate(correct(token));
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => LETTERS.iter().position(|&l| l == c).map(|i| i + 1),
        _ => None,
    }
}

/// Decode a cell reference into a position.
///
/// The column may be a numeral, a number word or a letter; the row must be a
/// numeral or a number word. Both resolve to `1..=10`; fitting the actual
/// board is checked where the position is used.
pub fn parse_position(text: &str) -> Result<Position, ParseError> {
    let lowered = text.trim().to_lowercase();
    let (column, row) = SPLIT_PATTERNS
        .iter()
        .find_map(|split| split(&lowered))
        .ok_or_else(|| ParseError::Unrecognized(text.to_string()))?;

    let x = try_number(column)
        .or_else(|| try_letter(column))
        .ok_or_else(|| ParseError::Axis {
            axis: Axis::X,
            token: column.to_string(),
        })?;
    let y = try_number(row).ok_or_else(|| ParseError::Axis {
        axis: Axis::Y,
        token: row.to_string(),
    })?;
    Ok(Position::new(x, y))
}

/// Render `"x, y"`, with the column as a letter unless `numeric_column` is set.
pub fn format_position(pos: Position, numeric_column: bool) -> String {
    match LETTERS.get(pos.x.wrapping_sub(1)) {
        Some(letter) if !numeric_column => format!("{}, {}", letter, pos.y),
        _ => format!("{}, {}", pos.x, pos.y),
    }
}
