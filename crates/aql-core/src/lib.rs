#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Field catalog for the AQL resume filter language.
//!
//! AQL queries name fields from a closed vocabulary (`YOE`, `SKILLS`, ...).
//! This crate maps each of them to the table and column that stores it and to
//! the join, if any, needed to reach that table from the `resumes` base relation.
//!
//! Everything here is static, read-only data. Translation state (which joins a
//! particular query already declared) lives with the caller.

use serde::Serialize;


// ============================================================================
// Tables
// ============================================================================

/// Relations known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Resumes,
    ResumeSkills,
    Skills,
    Education,
    WorkExperience,
}

impl Table {
    /// The base relation every query selects from.
    pub const BASE: Table = Table::Resumes;

    pub fn name(self) -> &'static str {
        match self {
            Table::Resumes => "resumes",
            Table::ResumeSkills => "resume_skills",
            Table::Skills => "skills",
            Table::Education => "education",
            Table::WorkExperience => "work_experience",
        }
    }
}

/// A `table.column` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnRef {
    pub table: Table,
    pub column: &'static str,
}

impl ColumnRef {
    pub const fn new(table: Table, column: &'static str) -> Self {
        Self { table, column }
    }
}

impl std::fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.table.name(), self.column)
    }
}

// ============================================================================
// Joins
// ============================================================================

/// One `LEFT JOIN table ON left = right` hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JoinStep {
    pub table: Table,
    pub left: ColumnRef,
    pub right: ColumnRef,
}

const SKILLS_STEPS: &[JoinStep] = &[
    JoinStep {
        table: Table::ResumeSkills,
        left: ColumnRef::new(Table::Resumes, "id"),
        right: ColumnRef::new(Table::ResumeSkills, "resume_id"),
    },
    JoinStep {
        table: Table::Skills,
        left: ColumnRef::new(Table::ResumeSkills, "skill_id"),
        right: ColumnRef::new(Table::Skills, "id"),
    },
];

const EDUCATION_STEPS: &[JoinStep] = &[JoinStep {
    table: Table::Education,
    left: ColumnRef::new(Table::Resumes, "id"),
    right: ColumnRef::new(Table::Education, "resume_id"),
}];

const WORK_EXPERIENCE_STEPS: &[JoinStep] = &[JoinStep {
    table: Table::WorkExperience,
    left: ColumnRef::new(Table::Resumes, "id"),
    right: ColumnRef::new(Table::WorkExperience, "resume_id"),
}];

/// A named relation traversal from the base relation.
///
/// Joins are keyed by name: a query declares each at most once no matter how
/// many of its fields need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Join {
    Skills,
    Education,
    WorkExperience,
}

impl Join {
    pub fn name(self) -> &'static str {
        match self {
            Join::Skills => "skills",
            Join::Education => "education",
            Join::WorkExperience => "work_experience",
        }
    }

    /// Hops to emit, in order, when the join is declared.
    pub fn steps(self) -> &'static [JoinStep] {
        match self {
            Join::Skills => SKILLS_STEPS,
            Join::Education => EDUCATION_STEPS,
            Join::WorkExperience => WORK_EXPERIENCE_STEPS,
        }
    }
}

// ============================================================================
// Fields
// ============================================================================

/// The closed field vocabulary of AQL.
///
/// Field names are matched case-sensitively: `YOE` is a field, `yoe` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Field {
    #[serde(rename = "YOE")]
    Yoe,
    #[serde(rename = "LOCATION")]
    Location,
    #[serde(rename = "SALARY")]
    Salary,
    #[serde(rename = "EXPERIENCE")]
    Experience,
    #[serde(rename = "EDUCATION")]
    Education,
    #[serde(rename = "SKILLS")]
    Skills,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Yoe,
        Field::Location,
        Field::Salary,
        Field::Experience,
        Field::Education,
        Field::Skills,
    ];

    /// Looks up a field by its query-language spelling.
    pub fn from_name(name: &str) -> Option<Field> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Yoe => "YOE",
            Field::Location => "LOCATION",
            Field::Salary => "SALARY",
            Field::Experience => "EXPERIENCE",
            Field::Education => "EDUCATION",
            Field::Skills => "SKILLS",
        }
    }

    /// Where the field's value is stored.
    pub fn column(self) -> ColumnRef {
        match self {
            Field::Yoe => ColumnRef::new(Table::Resumes, "years_of_experience"),
            Field::Location => ColumnRef::new(Table::Resumes, "location"),
            Field::Salary => ColumnRef::new(Table::Resumes, "current_salary"),
            Field::Experience => ColumnRef::new(Table::Resumes, "experience_level"),
            Field::Education => ColumnRef::new(Table::Education, "degree"),
            Field::Skills => ColumnRef::new(Table::Skills, "name"),
        }
    }

    /// The join needed before [`column`](Self::column) can be referenced.
    ///
    /// `EXPERIENCE` reads a column of the base relation but still pulls in the
    /// work experience table, matching the schema the catalog was written for.
    pub fn join(self) -> Option<Join> {
        match self {
            Field::Skills => Some(Join::Skills),
            Field::Education => Some(Join::Education),
            Field::Experience => Some(Join::WorkExperience),
            Field::Yoe | Field::Location | Field::Salary => None,
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
