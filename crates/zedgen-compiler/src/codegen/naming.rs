//! Pure string transforms used to name generated items.

/// Keywords, strict and reserved, that cannot name a struct or module.
const RESERVED: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Letters, digits and underscores, not starting with a digit.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Whether `name` can be declared as a struct or module: an identifier that
/// is neither `_` nor a keyword.
pub fn is_item_name(name: &str) -> bool {
    name != "_" && is_identifier(name) && !RESERVED.contains(&name)
}

/// Upper-cases the first character.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strips `-` and `_` and lower-cases (`Hello-World_Test` to `helloworldtest`).
pub fn package_name(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// `snake_case_example` to `SnakeCaseExample`.
pub fn snake_to_pascal(s: &str) -> String {
    s.split('_').map(upper_first).collect()
}

/// Constant-style name: `super_admin` to `SUPER_ADMIN`.
pub fn screaming_snake(s: &str) -> String {
    s.to_uppercase()
}

/// Rust string literal for `s`.
pub fn quote(s: &str) -> String {
    format!("{s:?}")
}

/// The path segment a type name is derived from: the second segment when
/// the path has several, the only segment otherwise.
fn naming_segment(object_type: &str) -> &str {
    let mut segments = object_type.split('/');
    let first = segments.next().unwrap_or_default();
    segments.next().unwrap_or(first)
}

/// Type name for an object type path.
///
/// `platform/user` gives `User`, `namespace/platform/user` gives `Platform`.
pub fn type_name(object_type: &str) -> String {
    upper_first(&package_name(naming_segment(object_type)))
}

/// Type name from the last path segment, underscores kept:
/// `namespace/platform/public_forum` gives `Public_forum`.
pub fn type_name_with_underscores(object_type: &str) -> String {
    upper_first(object_type.rsplit('/').next().unwrap_or_default())
}

/// Stem of the generated file for a definition name, e.g. `user_gen`.
pub fn module_name(definition_name: &str) -> String {
    format!("{}_gen", package_name(definition_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_first() {
        let cases = [
            ("", ""),
            ("hello", "Hello"),
            ("HELLO", "HELLO"),
            ("h", "H"),
            ("hello_world", "Hello_world"),
        ];
        for (input, expected) in cases {
            assert_eq!(upper_first(input), expected, "upper_first({input:?})");
        }
    }

    #[test]
    fn test_package_name() {
        let cases = [
            ("hello-world", "helloworld"),
            ("hello_world", "helloworld"),
            ("Hello-World_Test", "helloworldtest"),
            ("simple", "simple"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(package_name(input), expected, "package_name({input:?})");
        }
    }

    #[test]
    fn test_snake_to_pascal() {
        let cases = [
            ("hello_world", "HelloWorld"),
            ("test_case", "TestCase"),
            ("single", "Single"),
            ("", ""),
            ("snake_case_example", "SnakeCaseExample"),
        ];
        for (input, expected) in cases {
            assert_eq!(snake_to_pascal(input), expected, "snake_to_pascal({input:?})");
        }
    }

    #[test]
    fn test_type_name() {
        let cases = [
            ("user", "User"),
            ("platform/user", "User"),
            ("namespace/platform/user", "Platform"),
            ("", ""),
            ("hello-world", "Helloworld"),
            ("platform/private_forum", "Privateforum"),
        ];
        for (input, expected) in cases {
            assert_eq!(type_name(input), expected, "type_name({input:?})");
        }
    }

    #[test]
    fn test_type_name_with_underscores() {
        let cases = [
            ("user", "User"),
            ("private_forum", "Private_forum"),
            ("platform/private_forum", "Private_forum"),
            ("namespace/platform/public_forum", "Public_forum"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(
                type_name_with_underscores(input),
                expected,
                "type_name_with_underscores({input:?})"
            );
        }
    }

    #[test]
    fn test_is_item_name() {
        let cases = [
            ("User", true),
            ("user_gen", true),
            ("_gen", true),
            ("Straße", true),
            ("", false),
            ("_", false),
            ("1", false),
            ("1_gen", false),
            ("Self", false),
            ("self", false),
            ("crate", false),
            ("user.gen", false),
        ];
        for (input, expected) in cases {
            assert_eq!(is_item_name(input), expected, "is_item_name({input:?})");
        }
    }

    #[test]
    fn test_quote_and_constant_names() {
        assert_eq!(quote("platform/user"), "\"platform/user\"");
        assert_eq!(screaming_snake("super_admin"), "SUPER_ADMIN");
        assert_eq!(screaming_snake("straße"), screaming_snake("strasse"));
        assert_eq!(module_name("private_forum"), "privateforum_gen");
    }
}
