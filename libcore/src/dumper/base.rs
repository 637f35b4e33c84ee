/// Replaces each `%n` marker of `template` with the text `child(n)` returns.
///
/// Substituted text is not scanned again. Markers without a child (`child`
/// returns `None`) and `%` without digits are kept verbatim.
pub fn fill_template<F>(template: &str, mut child: F) -> String
where
    F: FnMut(usize) -> Option<String>,
{
    let mut string = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            string.push(c);
            continue;
        }
        let mut digits = String::new();
        while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
            digits.push(*d);
            chars.next();
        }
        let filled = digits.parse::<usize>().ok().and_then(&mut child);
        match filled {
            Some(text) => string.push_str(&text),
            None => {
                string.push('%');
                string.push_str(&digits);
            }
        }
    }
    string
}
