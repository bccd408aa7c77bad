use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::{self, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::schema::questions;

/// A multiple-choice question. `answers` and `correct_answers` are parallel
/// arrays: slot `i` of the second marks whether slot `i` of the first is a
/// correct pick. More than one slot may be marked correct.
#[derive(Clone, Debug, Queryable, Identifiable, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub description: Option<String>,
    pub explanation: Option<String>,
    pub tip: Option<String>,
    pub category: String,
    pub difficulty: String,
    pub answers: Vec<String>,
    pub correct_answers: Vec<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Insertable)]
#[table_name = "questions"]
pub struct NewQuestion {
    pub question: String,
    pub description: Option<String>,
    pub explanation: Option<String>,
    pub tip: Option<String>,
    pub category: String,
    pub difficulty: String,
    pub answers: Vec<String>,
    pub correct_answers: Vec<bool>,
}

/// Field-by-field update; `None` leaves the column untouched. Answers and
/// their correctness flags can only be replaced together.
#[derive(AsChangeset, Default)]
#[table_name = "questions"]
pub struct QuestionChanges {
    pub question: Option<String>,
    pub description: Option<String>,
    pub explanation: Option<String>,
    pub tip: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub answers: Option<Vec<String>>,
    pub correct_answers: Option<Vec<bool>>,
}

impl QuestionChanges {
    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.description.is_none()
            && self.explanation.is_none()
            && self.tip.is_none()
            && self.category.is_none()
            && self.difficulty.is_none()
            && self.answers.is_none()
            && self.correct_answers.is_none()
    }
}

fn check_answer_slots(answers: &[String], correct_answers: &[bool]) -> Result<(), Error> {
    if answers.is_empty() {
        return Err(Error::BadRequest(
            "A question needs at least one answer".to_string(),
        ));
    }
    if answers.len() != correct_answers.len() {
        return Err(Error::BadRequest(format!(
            "Received {} answers but {} correctness flags",
            answers.len(),
            correct_answers.len()
        )));
    }

    Ok(())
}

impl Question {
    pub fn create(conn: &PgConnection, new_question: &NewQuestion) -> Result<Question, Error> {
        use crate::schema::questions::table;

        check_answer_slots(&new_question.answers, &new_question.correct_answers)?;

        let question = diesel::insert_into(table)
            .values(new_question)
            .get_result(conn)?;

        Ok(question)
    }

    pub fn find_by_id(conn: &PgConnection, question_id: i32) -> Result<Option<Question>, Error> {
        use crate::schema::questions::dsl::questions;

        let question = questions
            .find(question_id)
            .first::<Question>(conn)
            .optional()?;

        Ok(question)
    }

    pub fn get_all(conn: &PgConnection) -> Result<Vec<Question>, Error> {
        use crate::schema::questions::dsl::{id, questions};

        let results = questions.order(id).load::<Question>(conn)?;

        Ok(results)
    }

    pub fn update(
        conn: &PgConnection,
        question_id: i32,
        changes: &QuestionChanges,
    ) -> Result<Question, Error> {
        use crate::schema::questions::dsl::{questions, updated_at};

        match (&changes.answers, &changes.correct_answers) {
            (Some(answers), Some(correct_answers)) => {
                check_answer_slots(answers, correct_answers)?
            }
            (None, None) => {}
            _ => {
                return Err(Error::BadRequest(
                    "Answers and correctness flags must be replaced together".to_string(),
                ));
            }
        }

        let question = diesel::update(questions.find(question_id))
            .set((changes, updated_at.eq(Utc::now())))
            .get_result::<Question>(conn)
            .optional()?;

        question.ok_or_else(|| Error::NotFound(format!("Question {} not found", question_id)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(value: &str) -> Result<Difficulty, Error> {
        match value.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::BadRequest(format!(
                "Unknown difficulty: {}",
                value
            ))),
        }
    }
}
