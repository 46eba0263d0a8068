/// Remap a file stem into an identifier-safe colormap name.
///
/// A stem starting with a digit or an underscore is prefixed with `N`;
/// a stem containing `-` or `+` has those characters replaced with `_`
/// and gains a `cmaps_` prefix.
pub fn safe_name(stem: &str) -> String {
    let mut name = stem.to_string();

    if name.starts_with(|c: char| c.is_ascii_digit()) || name.starts_with('_') {
        name.insert(0, 'N');
    }

    if name.contains('-') || name.contains('+') {
        name = format!("cmaps_{}", name.replace(['-', '+'], "_"));
    }

    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_stems_pass_through() {
        assert_eq!(safe_name("amwg"), "amwg");
        assert_eq!(safe_name("BlAqGrYeOrRe"), "BlAqGrYeOrRe");
    }

    #[test]
    fn leading_digit_is_prefixed() {
        assert_eq!(safe_name("3gauss"), "N3gauss");
        assert_eq!(safe_name("3saw"), "N3saw");
    }

    #[test]
    fn leading_underscore_is_prefixed() {
        assert_eq!(safe_name("_hidden"), "N_hidden");
    }

    #[test]
    fn plus_and_minus_are_remapped() {
        assert_eq!(safe_name("rainbow+gray"), "cmaps_rainbow_gray");
        assert_eq!(safe_name("blue-red"), "cmaps_blue_red");
        assert_eq!(safe_name("a-b+c"), "cmaps_a_b_c");
    }
}
