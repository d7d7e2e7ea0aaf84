use crate::constants::NORMALIZATION_KEPT_PUNCTUATION;

/// Lexical normalization of a mention name.
///
/// Lower-cases, drops every character outside letters, digits, whitespace
/// and `- ( ) / +`, then collapses whitespace runs to one space and trims.
/// `"  400+ Wh/kg  Cells!"` becomes `"400+ wh/kg cells"`.
pub fn normalize_name(raw: &str) -> String {
    let filtered: String = raw
        .to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if c.is_alphanumeric() || NORMALIZATION_KEPT_PUNCTUATION.contains(&c) {
                Some(c)
            } else {
                None
            }
        })
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-case the first letter of every word, leaving the rest untouched.
/// Words are delimited by spaces, hyphens and slashes.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for c in name.trim().chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
            at_word_start = false;
        } else {
            out.push(c);
            if c == ' ' || c == '-' || c == '/' {
                at_word_start = true;
            }
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize_name("  Solid-State\t  Battery "), "solid-state battery");
    }

    #[test]
    fn keeps_performance_tokens() {
        assert_eq!(normalize_name("400+ Wh/kg Cells!"), "400+ wh/kg cells");
    }

    #[test]
    fn keeps_parentheses() {
        assert_eq!(
            normalize_name("Vertical Take-Off (VTOL)"),
            "vertical take-off (vtol)"
        );
    }

    #[test]
    fn strips_other_punctuation() {
        assert_eq!(normalize_name("Li-ion, \"high-nickel\"; cathode."), "li-ion high-nickel cathode");
    }

    #[test]
    fn punctuation_only_becomes_empty() {
        assert_eq!(normalize_name("!!! ..."), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_name("Distributed  Electric-Propulsion (DEP) !");
        assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("solid-state battery"), "Solid-State Battery");
        assert_eq!(title_case("tiltrotor system"), "Tiltrotor System");
    }

    #[test]
    fn title_case_uppercases_first_letter_and_keeps_the_rest() {
        assert_eq!(title_case("eVTOL flight control"), "EVTOL Flight Control");
        assert_eq!(title_case("LiDAR sensing"), "LiDAR Sensing");
    }
}
