use crate::parser::{ParseErrorKind, scan};
use crate::test_utils::RecordingBackend;
use crate::{Error, QueryBuilder, TranslateError};

#[test]
fn parse_and_translate() {
    let query = QueryBuilder::new("LOCATION = 'SF' AND YOE > 5").parse().unwrap();
    assert_eq!(query.source(), "LOCATION = 'SF' AND YOE > 5");

    let translation = query.translate(RecordingBackend::default()).unwrap();
    assert_eq!(translation.params.len(), 2);
    assert_eq!(
        translation.render(),
        "(resumes.location = $0 AND resumes.years_of_experience > $1)"
    );
}

#[test]
fn dump() {
    let query = QueryBuilder::new("NOT SKILLS IN {'Go'}").parse().unwrap();
    insta::assert_snapshot!(query.dump(), @r"
    Query
      Logical(NOT)
        Comparison(IN)
          Identifier(SKILLS)
          Set
            Value('Go')
    ");
}

#[test]
fn scan_failure_is_a_parse_error() {
    let err = QueryBuilder::new("yoe > 5").parse().unwrap_err();
    let Error::Parse(parse) = &err else {
        panic!("expected parse error, got {err:?}");
    };
    assert_eq!(parse.kind, ParseErrorKind::Lex);
    assert_eq!(err.message(), "invalid character sequence starting with 'y'");
    assert_eq!(Err(err), crate::parse("yoe > 5").map_err(Error::from));
}

#[test]
fn lex_error_converts_to_parse_error() {
    let lex = scan("YOE > 5 AND salary < 3").unwrap_err();
    let err = Error::from(lex.clone());
    assert!(matches!(&err, Error::Parse(parse) if parse.kind == ParseErrorKind::Lex));
    assert_eq!(err.span(), lex.span());
    insta::assert_snapshot!(err.to_string(), @"invalid character sequence starting with 's' at offset 12");
}

#[test]
fn into_ast_keeps_the_tree() {
    let query = QueryBuilder::new("YOE > 5 OR SKILLS IN {'Go'}").parse().unwrap();
    let expected = query.ast().clone();
    let ast = query.into_ast();
    assert_eq!(ast, expected);
    assert_eq!(ast.fields(), ["YOE", "SKILLS"]);
}

#[test]
fn parse_failure() {
    let err = QueryBuilder::new("YOE >").parse().unwrap_err();
    let Error::Parse(parse) = &err else {
        panic!("expected parse error, got {err:?}");
    };
    assert_eq!(parse.kind, ParseErrorKind::UnexpectedEof);
    assert_eq!(usize::from(err.span().start()), 5);
}

#[test]
fn translate_failure() {
    let query = QueryBuilder::new("AGE > 30").parse().unwrap();
    let err = query.translate(RecordingBackend::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Translate(TranslateError::UnknownField { .. })
    ));
    insta::assert_snapshot!(err.to_string(), @"unknown field `AGE`");
}

#[test]
fn recursion_limit() {
    let source = "((((YOE > 5))))";
    assert!(QueryBuilder::new(source).with_recursion_limit(Some(4)).parse().is_ok());

    let err = QueryBuilder::new(source)
        .with_recursion_limit(Some(3))
        .parse()
        .unwrap_err();
    let Error::Parse(parse) = err else {
        panic!("expected parse error");
    };
    assert_eq!(parse.kind, ParseErrorKind::RecursionLimitExceeded);
}

#[test]
fn unlimited_recursion() {
    let source = format!("{}YOE > 5", "NOT ".repeat(300));
    assert!(QueryBuilder::new(&source).parse().is_err());
    assert!(
        QueryBuilder::new(&source)
            .with_recursion_limit(None)
            .parse()
            .is_ok()
    );
}

#[test]
fn render_error_uses_query_source() {
    let query = QueryBuilder::new("SKILLS = {'Go'}").parse().unwrap();
    let err = query.translate(RecordingBackend::default()).unwrap_err();
    let report = query.render_error(&err);
    assert!(report.contains("1 | SKILLS = {'Go'}"));
    assert!(report.contains("requires a single value"));
}
