//! Display formatting for generated tokens.

/// Group a token for display: 6-digit tokens in threes ("287 082"),
/// 8-digit tokens in fours ("1234 5678"). Any other digit count is
/// returned unmodified, and an empty token stays empty.
pub fn format_token(token: &str, digits: u8) -> String {
    let group = match digits {
        6 => 3,
        8 => 4,
        _ => return token.to_string(),
    };
    let mut out = String::with_capacity(token.len() + token.len() / group);
    for (i, ch) in token.chars().enumerate() {
        if i > 0 && i % group == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
