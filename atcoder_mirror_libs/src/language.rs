use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Language name patterns and the file extension used for them.
///
/// Patterns are evaluated from the top and the first match wins, so more specific names
/// (`C++`, `C#`, `Objective-C`, `JavaScript`, `Perl6`) must stay above the names they contain.
const EXTENSIONS: &[(&str, &str)] = &[
    (r"\bC\+\+", "cpp"),
    (r"Bash", "sh"),
    (r"C#", "cs"),
    (r"JavaScript", "js"),
    (r"TypeScript", "ts"),
    (r"OpenJDK|\bJava\b", "java"),
    (r"Haskell", "hs"),
    (r"OCaml", "ml"),
    (r"Raku|Perl6", "p6"),
    (r"Perl", "pl"),
    (r"PHP", "php"),
    (r"Python|Cpython|PyPy", "py"),
    (r"Pascal", "pas"),
    (r"Ruby", "rb"),
    (r"Scala", "scala"),
    (r"Visual Basic", "vb"),
    (r"Objective-C", "m"),
    (r"Swift", "swift"),
    (r"Rust", "rs"),
    (r"\bGo\b", "go"),
    (r"\bSed\b", "sed"),
    (r"\bAwk\b", "awk"),
    (r"Brainfuck", "bf"),
    (r"Standard ML", "ml"),
    (r"Crystal", "cr"),
    (r"Julia", "jl"),
    (r"Octave", "m"),
    (r"\bNim\b", "nim"),
    (r"Kotlin", "kt"),
    (r"COBOL", "cob"),
    (r"\bC\d*\b", "c"),
];

static TABLE: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    EXTENSIONS
        .iter()
        .map(|(pattern, extension)| {
            let regex = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .unwrap();
            (regex, *extension)
        })
        .collect()
});

/// Resolves the file extension (without a leading dot) for a free-text language name
/// such as `C++ (GCC 9.2.1)`.
///
/// Returns `None` when no pattern matches.
pub fn resolve_extension(language: &str) -> Option<&'static str> {
    TABLE
        .iter()
        .find(|(regex, _)| regex.is_match(language))
        .map(|(_, extension)| *extension)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(TABLE.len(), EXTENSIONS.len());
    }

    #[test]
    fn test_resolve_extension() {
        let cases = vec![
            ("C++ (GCC 9.2.1)", Some("cpp")),
            ("C++ 20 (gcc 12.2)", Some("cpp")),
            ("C (GCC 9.2.1)", Some("c")),
            ("C23 (GCC 12.2.0)", Some("c")),
            ("C23 (Clang 16.0.6)", Some("c")),
            ("C++23 (GCC 12.2)", Some("cpp")),
            ("C# (.NET Core 3.1.201)", Some("cs")),
            ("Python (3.8.2)", Some("py")),
            ("Python (CPython 3.11.4)", Some("py")),
            ("PyPy3 (7.3.0)", Some("py")),
            ("Java (OpenJDK 11.0.6)", Some("java")),
            ("Java (OpenJDK 17)", Some("java")),
            ("JavaScript (Node.js 12.16.1)", Some("js")),
            ("TypeScript (3.8)", Some("ts")),
            ("Rust (1.42.0)", Some("rs")),
            ("Go (1.14.1)", Some("go")),
            ("Perl (5.26.1)", Some("pl")),
            ("Perl6 (rakudo-star 2016.01)", Some("p6")),
            ("Raku (Rakudo 2020.02.1)", Some("p6")),
            ("Objective-C (Clang 10.0.0)", Some("m")),
            ("Visual Basic (.NET Core 3.1.101)", Some("vb")),
            ("Bash (5.0.11)", Some("sh")),
            ("Kotlin (1.3.71)", Some("kt")),
        ];

        for (language, expected) in cases {
            assert_eq!(resolve_extension(language), expected, "{}", language);
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(resolve_extension("python3"), Some("py"));
        assert_eq!(resolve_extension("RUST"), Some("rs"));
    }

    #[test]
    fn test_unresolved_language() {
        assert_eq!(resolve_extension("Whitespace (0.3)"), None);
        assert_eq!(resolve_extension(""), None);
    }
}
