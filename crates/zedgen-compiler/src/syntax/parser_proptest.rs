//! Property-based tests for the scanner and parser.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::model::flatten_subject_types;
    use crate::syntax::{
        filter_comments, parse_schema, scan, Operator, PermExpr, RelationExpr, TokenKind,
    };

    const PUNCTUATION: &[(&str, TokenKind)] = &[
        ("{", TokenKind::LBrace),
        ("}", TokenKind::RBrace),
        ("(", TokenKind::LParen),
        (")", TokenKind::RParen),
        (":", TokenKind::Colon),
        ("|", TokenKind::Pipe),
        ("&", TokenKind::Ampersand),
        ("+", TokenKind::Plus),
        ("-", TokenKind::Minus),
        ("=", TokenKind::Equal),
        ("->", TokenKind::Arrow),
        (":*", TokenKind::Wildcard),
    ];

    /// Strategy to generate identifiers that are not reserved words
    fn name_strategy() -> impl Strategy<Value = String> {
        "[a-z_][a-z0-9_]{0,10}".prop_filter("reserved word", |s| TokenKind::keyword(s).is_none())
    }

    /// Strategy to generate schema fragments, some of them comments
    fn piece_strategy() -> impl Strategy<Value = (String, bool)> {
        prop_oneof![
            name_strategy().prop_map(|s| (s, false)),
            prop::sample::select(PUNCTUATION).prop_map(|(lit, _)| (lit.to_string(), false)),
            "[a-z ]{0,10}".prop_map(|s| (format!("//{s}\n"), true)),
            "[a-z ]{0,10}".prop_map(|s| (format!("/*{s}*/"), true)),
        ]
    }

    /// Strategy to generate permission expression trees
    fn perm_expr_strategy() -> impl Strategy<Value = PermExpr> {
        let leaf = name_strategy().prop_map(PermExpr::identifier);
        let chain = (name_strategy(), prop::collection::vec(name_strategy(), 0..3)).prop_map(
            |(first, targets)| {
                targets.into_iter().fold(PermExpr::identifier(first), |left, target| {
                    PermExpr::binary(Operator::Arrow, left, PermExpr::identifier(target))
                })
            },
        );
        prop_oneof![leaf, chain].prop_recursive(4, 32, 2, |inner| {
            (
                prop::sample::select(vec![
                    Operator::Union,
                    Operator::Intersection,
                    Operator::Exclusion,
                ]),
                inner.clone(),
                inner,
            )
                .prop_map(|(op, left, right)| PermExpr::binary(op, left, right))
        })
    }

    fn kinds_and_literals(input: &str) -> Vec<(TokenKind, String)> {
        filter_comments(scan(input))
            .into_iter()
            .map(|t| (t.kind, t.literal))
            .collect()
    }

    #[test]
    fn test_every_punctuation_literal_scans_to_one_token() {
        for (literal, kind) in PUNCTUATION {
            let tokens = scan(&format!(" {literal} "));
            assert_eq!(tokens.len(), 2, "unexpected tokens for {literal:?}: {tokens:?}");
            assert_eq!(tokens[0].kind, *kind);
            assert_eq!(tokens[0].literal, *literal);
            assert_eq!((tokens[0].line, tokens[0].column), (1, 2));
            assert_eq!(tokens[1].kind, TokenKind::Eof);
        }
    }

    proptest! {
        #[test]
        fn test_identifier_scans_to_single_token(name in name_strategy()) {
            let tokens = scan(&name);
            prop_assert_eq!(tokens.len(), 2);
            prop_assert_eq!(tokens[0].kind, TokenKind::Identifier);
            prop_assert_eq!(&tokens[0].literal, &name);
        }

        #[test]
        fn test_scan_always_ends_with_single_eof(input in "\\PC{0,40}") {
            let tokens = scan(&input);
            let eof_count = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
            prop_assert_eq!(eof_count, 1);
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        }

        #[test]
        fn test_filtered_tokens_contain_no_comments(
            pieces in prop::collection::vec(piece_strategy(), 0..20)
        ) {
            let text: Vec<&str> = pieces.iter().map(|(s, _)| s.as_str()).collect();
            let tokens = filter_comments(scan(&text.join(" ")));
            prop_assert!(tokens.iter().all(|t| t.kind != TokenKind::Comment));
        }

        #[test]
        fn test_removing_comments_before_scanning_is_equivalent(
            pieces in prop::collection::vec(piece_strategy(), 0..20)
        ) {
            let with_comments: Vec<&str> = pieces.iter().map(|(s, _)| s.as_str()).collect();
            let without_comments: Vec<&str> = pieces
                .iter()
                .filter(|(_, is_comment)| !is_comment)
                .map(|(s, _)| s.as_str())
                .collect();

            prop_assert_eq!(
                kinds_and_literals(&with_comments.join(" ")),
                kinds_and_literals(&without_comments.join(" "))
            );
        }

        #[test]
        fn test_union_flattens_in_order(names in prop::collection::vec(name_strategy(), 1..8)) {
            let schema = format!("definition doc {{ relation r: {} }}", names.join(" | "));
            let definitions = parse_schema(&schema).unwrap();
            let expression: &RelationExpr = &definitions[0].relations[0].expression;
            prop_assert_eq!(flatten_subject_types(expression), names);
        }

        #[test]
        fn test_arrow_binds_tighter_than_plus(
            a in name_strategy(),
            b in name_strategy(),
            c in name_strategy()
        ) {
            let schema = format!("definition doc {{ permission p = {a}->{b} + {c} }}");
            let definitions = parse_schema(&schema).unwrap();
            let expected = PermExpr::binary(
                Operator::Union,
                PermExpr::binary(Operator::Arrow, PermExpr::identifier(a), PermExpr::identifier(b)),
                PermExpr::identifier(c),
            );
            prop_assert_eq!(&definitions[0].permissions[0].expression, &expected);
        }

        #[test]
        fn test_rendered_expression_parses_to_same_tree(expr in perm_expr_strategy()) {
            let schema = format!("definition doc {{ permission p = {expr} }}");
            let definitions = parse_schema(&schema).unwrap();
            prop_assert_eq!(&definitions[0].permissions[0].expression, &expr);
        }
    }
}
