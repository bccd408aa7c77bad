use chrono::{DateTime, Utc};
use diesel::{self, ExpressionMethods, OptionalExtension, PgConnection, QueryDsl, RunQueryDsl};
use serde::{Deserialize, Serialize};

use errors::Error;

use crate::models::User;
use crate::schema::games;

/// One play-through of `rounds` questions by one user. `score` starts at 0
/// and is bumped once per correctly answered round, so it never exceeds
/// `rounds`.
#[derive(Associations, Clone, Debug, Queryable, Identifiable, Serialize, Deserialize)]
#[belongs_to(User)]
pub struct Game {
    pub id: i32,
    pub user_id: i32,
    pub rounds: i32,
    pub score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[table_name = "games"]
pub struct NewGame {
    pub user_id: i32,
    pub rounds: i32,
}

impl Game {
    pub fn create(conn: &PgConnection, user_id: i32, rounds: i32) -> Result<Game, Error> {
        use crate::schema::games::table;

        let game = diesel::insert_into(table)
            .values(NewGame { user_id, rounds })
            .get_result(conn)?;

        Ok(game)
    }

    pub fn find_by_id(conn: &PgConnection, game_id: i32) -> Result<Option<Game>, Error> {
        use crate::schema::games::dsl::games;

        let game = games.find(game_id).first::<Game>(conn).optional()?;

        Ok(game)
    }

    pub fn get_all(conn: &PgConnection) -> Result<Vec<Game>, Error> {
        use crate::schema::games::dsl::{games, id};

        let results = games.order(id).load::<Game>(conn)?;

        Ok(results)
    }

    pub fn find_all_by_user_id(conn: &PgConnection, owner_id: i32) -> Result<Vec<Game>, Error> {
        use crate::schema::games::dsl::{created_at, games, user_id};

        let results = games
            .filter(user_id.eq(owner_id))
            .order(created_at.desc())
            .load::<Game>(conn)?;

        Ok(results)
    }

    pub fn increment_score(conn: &PgConnection, game_id: i32) -> Result<Game, Error> {
        use crate::schema::games::dsl::{games, id, score as score_field, updated_at};

        let score = games
            .select(score_field)
            .filter(id.eq(game_id))
            .get_result::<i32>(conn)?;

        let game = diesel::update(games.filter(id.eq(game_id)))
            .set((score_field.eq(score + 1), updated_at.eq(Utc::now())))
            .get_result(conn)?;

        Ok(game)
    }

    /// Removes the game and its round records. Callers wanting atomicity
    /// run this inside a transaction.
    pub fn delete(conn: &PgConnection, game_id: i32) -> Result<bool, Error> {
        use crate::schema::games::dsl::games;
        use crate::schema::rounds;

        diesel::delete(rounds::table.filter(rounds::dsl::game_id.eq(game_id))).execute(conn)?;
        let deleted = diesel::delete(games.find(game_id)).execute(conn)?;

        Ok(deleted > 0)
    }
}
