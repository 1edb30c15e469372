/// Turns a compact identifier into a Title Case label.
///
/// A space is inserted before every internal capital and the first character is uppercased:
/// `largeIntestine` becomes `Large Intestine`, `liver` becomes `Liver`.
pub fn format_label(identifier: &str) -> String {
    let identifier = identifier.trim();
    let mut out = String::with_capacity(identifier.len() + 4);
    for (idx, ch) in identifier.chars().enumerate() {
        if idx == 0 {
            out.extend(ch.to_uppercase());
            continue;
        }
        if ch.is_uppercase() {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}
