use aql_compiler::{Backend, Bind, parse, translate};
use aql_compiler::parser::Literal;
use aql_core::{Field, Join};
use indoc::indoc;

use crate::{Placeholder, SqlBuilder, SqlConfig};

fn sql(source: &str) -> String {
    sql_with(source, SqlConfig::default())
}

fn sql_with(source: &str, config: SqlConfig) -> String {
    let query = parse(source).unwrap();
    translate(&query, SqlBuilder::new(config)).unwrap().render()
}

#[test]
fn base_field() {
    insta::assert_snapshot!(sql("YOE > 5"), @r#"SELECT "resumes".* FROM "resumes" WHERE "resumes"."years_of_experience" > ?"#);
}

#[test]
fn skills_membership() {
    insta::assert_snapshot!(sql("SKILLS IN {'Python', 'Java', 'SQL'}"), @r#"SELECT "resumes".* FROM "resumes" LEFT JOIN "resume_skills" ON "resumes"."id"="resume_skills"."resume_id" LEFT JOIN "skills" ON "resume_skills"."skill_id"="skills"."id" WHERE "skills"."name" IN (?, ?, ?)"#);
}

#[test]
fn nested_group_is_parenthesized() {
    insta::assert_snapshot!(sql("LOCATION = 'San Francisco' AND (YOE > 5 OR SKILLS IN {'Rust', 'Go'})"), @r#"SELECT "resumes".* FROM "resumes" LEFT JOIN "resume_skills" ON "resumes"."id"="resume_skills"."resume_id" LEFT JOIN "skills" ON "resume_skills"."skill_id"="skills"."id" WHERE "resumes"."location" = ? AND ("resumes"."years_of_experience" > ? OR "skills"."name" IN (?, ?))"#);
}

#[test]
fn left_chain_groups_inner_operand() {
    insta::assert_snapshot!(sql("YOE > 1 AND YOE < 9 OR SALARY > 5"), @r#"SELECT "resumes".* FROM "resumes" WHERE ("resumes"."years_of_experience" > ? AND "resumes"."years_of_experience" < ?) OR "resumes"."current_salary" > ?"#);
}

#[test]
fn negation() {
    insta::assert_snapshot!(sql("NOT EXPERIENCE = 'Entry Level'"), @r#"SELECT "resumes".* FROM "resumes" LEFT JOIN "work_experience" ON "resumes"."id"="work_experience"."resume_id" WHERE NOT ("resumes"."experience_level" = ?)"#);
}

#[test]
fn empty_set_is_always_false() {
    let query = parse("SKILLS IN {}").unwrap();
    let translation = translate(&query, SqlBuilder::default()).unwrap();
    assert!(translation.params.is_empty());
    assert!(translation.render().ends_with(" WHERE 1 = 0"));
}

#[test]
fn dollar_placeholders() {
    let config = SqlConfig::new().placeholder(Placeholder::Dollar);
    insta::assert_snapshot!(sql_with("SALARY >= 100000 AND EDUCATION != 'PhD'", config), @r#"SELECT "resumes".* FROM "resumes" LEFT JOIN "education" ON "resumes"."id"="education"."resume_id" WHERE "resumes"."current_salary" >= $1 AND "education"."degree" <> $2"#);
}

#[test]
fn unquoted_identifiers() {
    let config = SqlConfig::new().quote_identifiers(false);
    insta::assert_snapshot!(sql_with("SALARY <= 10 OR LOCATION = 'NY'", config), @"SELECT resumes.* FROM resumes WHERE resumes.current_salary <= ? OR resumes.location = ?");
}

#[test]
fn every_join_once() {
    let source = indoc! {"
        (SKILLS IN {'Python'} AND EDUCATION = 'Bachelor Degree')
        OR (SKILLS = 'Java' AND EXPERIENCE = 'Senior' AND EDUCATION = 'PhD')
    "};
    let query = parse(source).unwrap();
    let translation = translate(&query, SqlBuilder::default()).unwrap();
    let builder = &translation.backend;

    assert_eq!(
        builder.joins().collect::<Vec<_>>(),
        vec![Join::Skills, Join::Education, Join::WorkExperience]
    );
    assert_eq!(builder.select().joins.len(), 4);
    assert_eq!(translation.render().matches("LEFT JOIN").count(), 4);
}

#[test]
fn direct_join_is_idempotent() {
    let mut builder = SqlBuilder::default();
    builder.join(Join::Education);
    builder.join(Join::Education);
    assert_eq!(builder.select().joins.len(), 1);
}

#[test]
fn no_filter_means_no_where() {
    insta::assert_snapshot!(SqlBuilder::default().render(), @r#"SELECT "resumes".* FROM "resumes""#);
}

#[test]
fn repeated_filters_are_anded() {
    let mut builder = SqlBuilder::default();
    let yoe = Literal::Int(3);
    let city = Literal::Str("SF".into());

    let column = builder.column(Field::Yoe);
    let first = builder.gt(column, Bind { index: 0, value: &yoe });
    builder.filter(first);

    let column = builder.column(Field::Location);
    let second = builder.eq(column, Bind { index: 1, value: &city });
    builder.filter(second);

    insta::assert_snapshot!(builder.render(), @r#"SELECT "resumes".* FROM "resumes" WHERE "resumes"."years_of_experience" > ? AND "resumes"."location" = ?"#);
}

#[test]
fn params_line_up_with_placeholders() {
    let query = parse("YOE > 3 AND SKILLS IN {'Go', 'Rust'} AND LOCATION = 'SF'").unwrap();
    let translation = translate(&query, SqlBuilder::default()).unwrap();
    assert_eq!(translation.render().matches('?').count(), translation.params.len());
    assert_eq!(translation.params[3], Literal::Str("SF".into()));
}

#[test]
fn same_operator_chain_renders_flat() {
    insta::assert_snapshot!(sql("YOE > 1 AND YOE < 9 AND SALARY > 5"), @r#"SELECT "resumes".* FROM "resumes" WHERE "resumes"."years_of_experience" > ? AND "resumes"."years_of_experience" < ? AND "resumes"."current_salary" > ?"#);
}

#[test]
fn long_chain() {
    let source = vec!["YOE > 1 AND SKILLS IN {'Go', 'Rust'}"; 50_000].join(" OR ");
    let query = parse(&source).unwrap();
    let translation = translate(&query, SqlBuilder::default()).unwrap();
    let rendered = translation.render();

    assert_eq!(translation.params.len(), 150_000);
    assert_eq!(rendered.matches('?').count(), 150_000);
    assert_eq!(translation.backend.select().joins.len(), 2);
    assert_eq!(rendered.matches(" OR ").count(), 49_999);
}

#[test]
fn long_negation() {
    let mut builder = SqlBuilder::default();
    let yoe = Literal::Int(3);
    let column = builder.column(Field::Yoe);
    let mut predicate = builder.gt(column, Bind { index: 0, value: &yoe });
    for _ in 0..100_000 {
        predicate = builder.not(predicate);
    }
    builder.filter(predicate);

    let rendered = builder.render();
    assert!(rendered.ends_with(&format!(r#"> ?{}"#, ")".repeat(100_000))));
    assert_eq!(rendered.matches("NOT (").count(), 100_000);
}
