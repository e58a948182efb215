const RESERVED: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Replaces the characters that cannot appear in a file name on common filesystems
/// (`\ / : * ? " < > |`) with underscores.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("A:B/C*D"), "A_B_C_D");
        assert_eq!(sanitize_filename(r#"a\b?c"d<e>f|g"#), "a_b_c_d_e_f_g");
    }

    #[test]
    fn test_sanitize_keeps_other_characters() {
        assert_eq!(sanitize_filename("A - Sample"), "A - Sample");
        assert_eq!(sanitize_filename("B - 高橋君"), "B - 高橋君");
    }
}
