use diesel::Connection;

use db::models::{Game, NewQuestion, NewRound, Question, QuestionChanges, Round, User};
use db::{get_conn, PgPool};
use errors::Error;

/// Storage handle injected into the engine and the menu layer. Simple
/// operations map one-to-one onto rows; `create_game_with_rounds` and
/// `record_answer` are compound and must be atomic: either every related
/// row is written or none is.
pub trait Store {
    fn create_user(&self, username: &str) -> Result<User, Error>;
    fn user_by_id(&self, user_id: i32) -> Result<Option<User>, Error>;
    fn user_by_username(&self, username: &str) -> Result<Option<User>, Error>;
    fn all_users(&self) -> Result<Vec<User>, Error>;
    fn rename_user(&self, user_id: i32, username: &str) -> Result<User, Error>;

    fn create_question(&self, question: &NewQuestion) -> Result<Question, Error>;
    fn question_by_id(&self, question_id: i32) -> Result<Option<Question>, Error>;
    fn all_questions(&self) -> Result<Vec<Question>, Error>;
    fn update_question(
        &self,
        question_id: i32,
        changes: &QuestionChanges,
    ) -> Result<Question, Error>;

    fn game_by_id(&self, game_id: i32) -> Result<Option<Game>, Error>;
    fn all_games(&self) -> Result<Vec<Game>, Error>;
    fn games_for_user(&self, user_id: i32) -> Result<Vec<Game>, Error>;
    fn delete_game(&self, game_id: i32) -> Result<bool, Error>;

    fn rounds_for_game(&self, game_id: i32) -> Result<Vec<Round>, Error>;
    fn round_by_position(&self, game_id: i32, position: i32) -> Result<Option<Round>, Error>;
    fn answered_count(&self, game_id: i32) -> Result<i32, Error>;

    /// Persists the question set, the game record (score 0), and one
    /// unanswered round per question, in presentation order.
    fn create_game_with_rounds(
        &self,
        user_id: i32,
        questions: &[NewQuestion],
    ) -> Result<Game, Error>;

    /// Writes the answer into the round and bumps the game score when the
    /// pick was correct. Returns the game score after the write. Rejects a
    /// round that was already answered.
    fn record_answer(
        &self,
        game_id: i32,
        round_id: i32,
        selected: i32,
        correct: bool,
    ) -> Result<i32, Error>;
}

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> PgStore {
        PgStore { pool }
    }

    fn conn(&self) -> Result<db::Connection, Error> {
        let conn = get_conn(&self.pool)?;
        Ok(conn)
    }
}

impl Store for PgStore {
    fn create_user(&self, username: &str) -> Result<User, Error> {
        User::create(&*self.conn()?, username)
    }

    fn user_by_id(&self, user_id: i32) -> Result<Option<User>, Error> {
        User::find_by_id(&*self.conn()?, user_id)
    }

    fn user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        User::find_by_username(&*self.conn()?, username)
    }

    fn all_users(&self) -> Result<Vec<User>, Error> {
        User::get_all(&*self.conn()?)
    }

    fn rename_user(&self, user_id: i32, username: &str) -> Result<User, Error> {
        User::rename(&*self.conn()?, user_id, username)
    }

    fn create_question(&self, question: &NewQuestion) -> Result<Question, Error> {
        Question::create(&*self.conn()?, question)
    }

    fn question_by_id(&self, question_id: i32) -> Result<Option<Question>, Error> {
        Question::find_by_id(&*self.conn()?, question_id)
    }

    fn all_questions(&self) -> Result<Vec<Question>, Error> {
        Question::get_all(&*self.conn()?)
    }

    fn update_question(
        &self,
        question_id: i32,
        changes: &QuestionChanges,
    ) -> Result<Question, Error> {
        Question::update(&*self.conn()?, question_id, changes)
    }

    fn game_by_id(&self, game_id: i32) -> Result<Option<Game>, Error> {
        Game::find_by_id(&*self.conn()?, game_id)
    }

    fn all_games(&self) -> Result<Vec<Game>, Error> {
        Game::get_all(&*self.conn()?)
    }

    fn games_for_user(&self, user_id: i32) -> Result<Vec<Game>, Error> {
        Game::find_all_by_user_id(&*self.conn()?, user_id)
    }

    fn delete_game(&self, game_id: i32) -> Result<bool, Error> {
        let conn = self.conn()?;

        conn.transaction::<bool, Error, _>(|| Game::delete(&conn, game_id))
    }

    fn rounds_for_game(&self, game_id: i32) -> Result<Vec<Round>, Error> {
        Round::find_by_game_id(&*self.conn()?, game_id)
    }

    fn round_by_position(&self, game_id: i32, position: i32) -> Result<Option<Round>, Error> {
        Round::find_by_game_id_and_position(&*self.conn()?, game_id, position)
    }

    fn answered_count(&self, game_id: i32) -> Result<i32, Error> {
        Round::answered_count(&*self.conn()?, game_id)
    }

    fn create_game_with_rounds(
        &self,
        user_id: i32,
        questions: &[NewQuestion],
    ) -> Result<Game, Error> {
        let conn = self.conn()?;

        conn.transaction::<Game, Error, _>(|| {
            let game = Game::create(&conn, user_id, questions.len() as i32)?;

            let mut new_rounds = Vec::with_capacity(questions.len());
            for (position, question) in questions.iter().enumerate() {
                let question = Question::create(&conn, question)?;
                new_rounds.push(NewRound {
                    game_id: game.id,
                    question_id: question.id,
                    position: position as i32,
                });
            }
            Round::create_batch(&conn, &new_rounds)?;

            debug!(
                "Created game {} with {} rounds for user {}",
                game.id,
                new_rounds.len(),
                user_id
            );
            Ok(game)
        })
    }

    fn record_answer(
        &self,
        game_id: i32,
        round_id: i32,
        selected: i32,
        correct: bool,
    ) -> Result<i32, Error> {
        let conn = self.conn()?;

        conn.transaction::<i32, Error, _>(|| {
            let updated = Round::record_answer(&conn, round_id, selected, correct)?;
            if updated.is_none() {
                return Err(Error::BadRequest(
                    "Round has already been answered".to_string(),
                ));
            }

            let game = if correct {
                Game::increment_score(&conn, game_id)?
            } else {
                Game::find_by_id(&conn, game_id)?
                    .ok_or_else(|| Error::NotFound(format!("Game {} not found", game_id)))?
            };

            Ok(game.score)
        })
    }
}
