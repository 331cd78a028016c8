use std::borrow::Cow;

/// Normalize CRLF and lone CR to LF.
pub fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if !s.contains('\r') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut it = s.chars().peekable();
    while let Some(ch) = it.next() {
        match ch {
            '\r' => {
                if it.peek() == Some(&'\n') {
                    let _ = it.next();
                }
                out.push('\n');
            }
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Lines of `s` after newline normalization. A trailing newline yields a
/// final empty line, matching what an editor displays.
pub fn split_lines(s: &str) -> Vec<String> {
    normalize_newlines(s).split('\n').map(str::to_owned).collect()
}
