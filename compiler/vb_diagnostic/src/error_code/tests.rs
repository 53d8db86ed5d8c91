use super::*;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E2004.as_str(), "E2004");
}

#[test]
fn test_all_variants_classified() {
    for code in ErrorCode::ALL {
        let flags = [
            code.is_lexical_error(),
            code.is_syntax_error(),
            code.is_semantic_error(),
            code.is_resource_error(),
            code.is_internal_error(),
        ];
        // Exactly one predicate should be true for every code
        let true_count = flags.iter().filter(|&&f| f).count();
        assert_eq!(
            true_count, 1,
            "expected exactly 1 predicate true for {code}, got {true_count}"
        );
    }
}

#[test]
fn test_class_follows_leading_digit() {
    for code in ErrorCode::ALL {
        let leading = code.as_str().as_bytes()[1];
        match leading {
            b'0' => assert!(code.is_lexical_error(), "{code}"),
            b'1' => assert!(code.is_syntax_error(), "{code}"),
            b'2' => assert!(code.is_semantic_error(), "{code}"),
            b'3' => assert!(code.is_resource_error(), "{code}"),
            b'9' => assert!(code.is_internal_error(), "{code}"),
            other => panic!("unexpected class digit {}", other as char),
        }
    }
}

#[test]
fn test_from_str_is_case_insensitive() {
    assert_eq!("E2005".parse::<ErrorCode>(), Ok(ErrorCode::E2005));
    assert_eq!("e3001".parse::<ErrorCode>(), Ok(ErrorCode::E3001));
    assert_eq!("E4242".parse::<ErrorCode>(), Err(()));
    assert_eq!("".parse::<ErrorCode>(), Err(()));
}

#[test]
fn test_all_is_unique() {
    let mut seen = std::collections::HashSet::new();
    for code in ErrorCode::ALL {
        assert!(seen.insert(code.as_str()), "duplicate entry {code}");
    }
}
