//! Norwegian (bokmål) string ordering.
//!
//! Letters sort a–z followed by æ, ø, å. The digraph "aa" sorts as å, the
//! Swedish/German letters ä and ö sort with æ and ø, ü sorts as y, and the
//! usual accented vowels sort with their base letter.
//!
//! Strings are compared in levels: base letters over the whole string first,
//! then accents, then case (lowercase first).

use std::cmp::Ordering;

/// Character classes, in the order they sort at the primary level
const CLASS_SPACE: u8 = 0;
const CLASS_PUNCT: u8 = 1;
const CLASS_DIGIT: u8 = 2;
const CLASS_LETTER: u8 = 3;

/// Positions of the three letters that follow z
const AE: u32 = 26;
const OE: u32 = 27;
const AA: u32 = 28;

/// Offset for letters outside the Norwegian alphabet so they land after å
const FOREIGN_LETTER_BASE: u32 = 100;

/// Accent weight of "aa": after å, before any accented letter
const DIGRAPH_ACCENT: u32 = 1;

/// One collation unit: a character, or the "aa" digraph
#[derive(Debug, Clone, Copy)]
struct Element {
    primary: (u8, u32),
    accent: u32,
}

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn primary_weight(c: char) -> (u8, u32) {
    let lower = fold_case(c);
    let letter = |base: char| (CLASS_LETTER, base as u32 - 'a' as u32);

    match lower {
        'a'..='z' => letter(lower),
        'æ' | 'ä' => (CLASS_LETTER, AE),
        'ø' | 'ö' => (CLASS_LETTER, OE),
        'å' => (CLASS_LETTER, AA),
        'ü' => letter('y'),
        'á' | 'à' | 'â' => letter('a'),
        'é' | 'è' | 'ê' | 'ë' => letter('e'),
        'í' | 'ì' | 'î' | 'ï' => letter('i'),
        'ó' | 'ò' | 'ô' => letter('o'),
        'ú' | 'ù' | 'û' => letter('u'),
        'ç' => letter('c'),
        'ñ' => letter('n'),
        '0'..='9' => (CLASS_DIGIT, lower as u32 - '0' as u32),
        c if c.is_alphabetic() => (CLASS_LETTER, FOREIGN_LETTER_BASE + c as u32),
        c if c.is_whitespace() => (CLASS_SPACE, 0),
        c => (CLASS_PUNCT, c as u32),
    }
}

/// 0 for letters of the Norwegian alphabet, otherwise the character itself
fn accent_weight(c: char) -> u32 {
    match fold_case(c) {
        'a'..='z' | 'æ' | 'ø' | 'å' => 0,
        c if c.is_alphabetic() => c as u32,
        _ => 0,
    }
}

fn elements(s: &str) -> Vec<Element> {
    let mut out = Vec::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if fold_case(c) == 'a' && chars.peek().map(|&n| fold_case(n)) == Some('a') {
            chars.next();
            out.push(Element {
                primary: (CLASS_LETTER, AA),
                accent: DIGRAPH_ACCENT,
            });
        } else {
            out.push(Element {
                primary: primary_weight(c),
                accent: accent_weight(c),
            });
        }
    }
    out
}

/// Case-insensitive comparison that ignores everything except the base letter.
fn compare_primary(a: &str, b: &str) -> Ordering {
    let (a, b) = (elements(a), elements(b));
    a.iter().map(|e| e.primary).cmp(b.iter().map(|e| e.primary))
}

/// Compare two strings the way a Norwegian reader expects them ordered.
pub fn compare_nb(a: &str, b: &str) -> Ordering {
    let (ea, eb) = (elements(a), elements(b));

    ea.iter()
        .map(|e| e.primary)
        .cmp(eb.iter().map(|e| e.primary))
        .then_with(|| ea.iter().map(|e| e.accent).cmp(eb.iter().map(|e| e.accent)))
        .then_with(|| a.chars().map(char::is_uppercase).cmp(b.chars().map(char::is_uppercase)))
        .then_with(|| a.cmp(b))
}
