//! Small display helpers shared by statblock renderers.

/// Render a bonus with an explicit sign: `+3`, `-1`, `+0`.
pub fn signed(n: i64) -> String {
    if n >= 0 { format!("+{n}") } else { n.to_string() }
}

/// Turn a snake_case key into display text: `passive_perception` →
/// `Passive perception`.
pub fn humanize(s: &str) -> String {
    let spaced = s.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

/// The ability modifier for a score: `floor((score - 10) / 2)`.
pub fn ability_modifier(score: i64) -> i64 {
    (score - 10).div_euclid(2)
}
