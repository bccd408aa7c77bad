use chrono::{DateTime, Utc};
use diesel::{self, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::{Game, Question};
use crate::schema::rounds::{self, table};

/// One question instance within a game, in presentation order. The three
/// nullable columns stay null until the round is answered, and a round is
/// answered at most once.
#[derive(Associations, Clone, Debug, Deserialize, Identifiable, Serialize, Queryable)]
#[belongs_to(Game)]
#[belongs_to(Question)]
pub struct Round {
    pub id: i32,
    pub game_id: i32,
    pub question_id: i32,
    pub position: i32,
    pub selected_answer: Option<i32>,
    pub is_correct: Option<bool>,
    pub answered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "rounds"]
pub struct NewRound {
    pub game_id: i32,
    pub question_id: i32,
    pub position: i32,
}

impl Round {
    pub fn create_batch(conn: &PgConnection, new_rounds: &[NewRound]) -> Result<Vec<Round>, Error> {
        let results = diesel::insert_into(table)
            .values(new_rounds)
            .get_results(conn)?;

        Ok(results)
    }

    pub fn find_by_game_id(conn: &PgConnection, game: i32) -> Result<Vec<Round>, Error> {
        use rounds::dsl::{game_id, position, rounds as rounds_table};

        let results = rounds_table
            .filter(game_id.eq(game))
            .order(position.asc())
            .load::<Round>(conn)?;

        Ok(results)
    }

    pub fn find_by_game_id_and_position(
        conn: &PgConnection,
        game: i32,
        index: i32,
    ) -> Result<Option<Round>, Error> {
        use rounds::dsl::{game_id, position, rounds as rounds_table};

        let round = rounds_table
            .filter(game_id.eq(game))
            .filter(position.eq(index))
            .first::<Round>(conn)
            .optional()?;

        Ok(round)
    }

    pub fn answered_count(conn: &PgConnection, game: i32) -> Result<i32, Error> {
        use rounds::dsl::{answered_at, game_id, rounds as rounds_table};

        let total: i64 = rounds_table
            .filter(game_id.eq(game))
            .filter(answered_at.is_not_null())
            .count()
            .get_result(conn)?;

        Ok(total as i32)
    }

    /// Writes the selection, its correctness, and the answer time, guarded
    /// so an already-answered round is never overwritten. Returns `None`
    /// when the guard rejected the write.
    pub fn record_answer(
        conn: &PgConnection,
        round_id: i32,
        selected: i32,
        correct: bool,
    ) -> Result<Option<Round>, Error> {
        use rounds::dsl::{answered_at, id, is_correct, rounds as rounds_table, selected_answer, updated_at};

        let now = Utc::now();
        let round = diesel::update(
            rounds_table
                .filter(id.eq(round_id))
                .filter(answered_at.is_null()),
        )
        .set((
            selected_answer.eq(Some(selected)),
            is_correct.eq(Some(correct)),
            answered_at.eq(Some(now)),
            updated_at.eq(now),
        ))
        .get_result::<Round>(conn)
        .optional()?;

        Ok(round)
    }
}
