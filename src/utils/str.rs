/// Shortens `content` longer than `max_len` characters to its first and last
/// `max_len / 2` characters joined by an ellipsis.
pub fn line_trunc(content: &str, max_len: usize) -> String {
    let chars: Vec<char> = content.chars().collect();
    if chars.len() <= max_len {
        return content.to_owned();
    }
    let half = max_len / 2;
    let mut s: String = chars[..half].iter().collect();
    s.push('…');
    s.extend(chars[chars.len() - half..].iter());
    s
}

/// Formats an integer with `,` thousands separators.
pub fn comma(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
