/// Deterministic id slug: lower-case, every run of non-alphanumeric
/// characters collapsed to one underscore, leading/trailing underscores trimmed.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;
    for c in name.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.push(c);
        } else {
            pending_separator = true;
        }
    }
    if slug.is_empty() {
        "technology".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_separator_runs() {
        assert_eq!(slugify("Solid-State  Battery"), "solid_state_battery");
    }

    #[test]
    fn trims_edges() {
        assert_eq!(slugify("  (Tilt-Rotor) "), "tilt_rotor");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(slugify("400+ Wh/kg Cell"), "400_wh_kg_cell");
    }

    #[test]
    fn empty_name_gets_placeholder() {
        assert_eq!(slugify("---"), "technology");
    }
}
