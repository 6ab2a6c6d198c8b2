/// Lowercases `text` and capitalizes the first letter of every word.
///
/// Word boundaries are whitespace and ASCII characters other than letters,
/// digits and `_`, so "D'OESTE" becomes "D'Oeste".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = is_separator(ch);
    }

    out
}

fn is_separator(ch: char) -> bool {
    if ch.is_ascii() {
        !(ch.is_ascii_alphanumeric() || ch == '_')
    } else {
        ch.is_whitespace()
    }
}
