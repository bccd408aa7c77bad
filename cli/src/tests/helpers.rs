#[cfg(test)]
pub mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::Utc;

    use db::models::{Game, NewQuestion, Question, QuestionChanges, Round, User};
    use errors::Error;
    use quizapi::{FetchRequest, ProviderQuestion, QuestionSource};

    use crate::store::Store;

    /// In-memory [`Store`] with the same observable contract as the
    /// Postgres-backed one, so engine and menu suites run hermetically.
    pub struct MemoryStore {
        tables: RefCell<Tables>,
        /// When set, compound write operations fail without writing.
        pub fail_writes: Cell<bool>,
    }

    #[derive(Default)]
    struct Tables {
        users: Vec<User>,
        questions: Vec<Question>,
        games: Vec<Game>,
        rounds: Vec<Round>,
        last_id: i32,
    }

    impl Tables {
        fn next_id(&mut self) -> i32 {
            self.last_id += 1;
            self.last_id
        }
    }

    fn check_answer_slots(question: &NewQuestion) -> Result<(), Error> {
        if question.answers.is_empty() {
            return Err(Error::BadRequest(
                "A question needs at least one answer".to_string(),
            ));
        }
        if question.answers.len() != question.correct_answers.len() {
            return Err(Error::BadRequest(format!(
                "Received {} answers but {} correctness flags",
                question.answers.len(),
                question.correct_answers.len()
            )));
        }

        Ok(())
    }

    impl MemoryStore {
        pub fn new() -> MemoryStore {
            MemoryStore {
                tables: RefCell::new(Tables::default()),
                fail_writes: Cell::new(false),
            }
        }

        fn build_question(tables: &mut Tables, question: &NewQuestion) -> Question {
            let now = Utc::now();
            let question = Question {
                id: tables.next_id(),
                question: question.question.clone(),
                description: question.description.clone(),
                explanation: question.explanation.clone(),
                tip: question.tip.clone(),
                category: question.category.clone(),
                difficulty: question.difficulty.clone(),
                answers: question.answers.clone(),
                correct_answers: question.correct_answers.clone(),
                created_at: now,
                updated_at: now,
            };
            tables.questions.push(question.clone());
            question
        }
    }

    impl Store for MemoryStore {
        fn create_user(&self, username: &str) -> Result<User, Error> {
            let mut tables = self.tables.borrow_mut();
            if tables.users.iter().any(|user| user.username == username) {
                return Err(Error::BadRequest(format!(
                    "Key (username)=({}) already exists.",
                    username
                )));
            }

            let now = Utc::now();
            let user = User {
                id: tables.next_id(),
                username: username.to_string(),
                created_at: now,
                updated_at: now,
            };
            tables.users.push(user.clone());
            Ok(user)
        }

        fn user_by_id(&self, user_id: i32) -> Result<Option<User>, Error> {
            let tables = self.tables.borrow();
            Ok(tables.users.iter().find(|user| user.id == user_id).cloned())
        }

        fn user_by_username(&self, username: &str) -> Result<Option<User>, Error> {
            let tables = self.tables.borrow();
            Ok(tables
                .users
                .iter()
                .find(|user| user.username == username)
                .cloned())
        }

        fn all_users(&self) -> Result<Vec<User>, Error> {
            let mut users = self.tables.borrow().users.clone();
            users.sort_by(|a, b| a.username.cmp(&b.username));
            Ok(users)
        }

        fn rename_user(&self, user_id: i32, username: &str) -> Result<User, Error> {
            let mut tables = self.tables.borrow_mut();
            if tables
                .users
                .iter()
                .any(|user| user.username == username && user.id != user_id)
            {
                return Err(Error::BadRequest(format!(
                    "Key (username)=({}) already exists.",
                    username
                )));
            }

            let user = tables
                .users
                .iter_mut()
                .find(|user| user.id == user_id)
                .ok_or_else(|| Error::NotFound(format!("User {} not found", user_id)))?;
            user.username = username.to_string();
            user.updated_at = Utc::now();
            Ok(user.clone())
        }

        fn create_question(&self, question: &NewQuestion) -> Result<Question, Error> {
            check_answer_slots(question)?;
            let mut tables = self.tables.borrow_mut();
            Ok(MemoryStore::build_question(&mut tables, question))
        }

        fn question_by_id(&self, question_id: i32) -> Result<Option<Question>, Error> {
            let tables = self.tables.borrow();
            Ok(tables
                .questions
                .iter()
                .find(|question| question.id == question_id)
                .cloned())
        }

        fn all_questions(&self) -> Result<Vec<Question>, Error> {
            Ok(self.tables.borrow().questions.clone())
        }

        fn update_question(
            &self,
            question_id: i32,
            changes: &QuestionChanges,
        ) -> Result<Question, Error> {
            match (&changes.answers, &changes.correct_answers) {
                (Some(answers), Some(correct_answers)) => {
                    if answers.len() != correct_answers.len() {
                        return Err(Error::BadRequest(format!(
                            "Received {} answers but {} correctness flags",
                            answers.len(),
                            correct_answers.len()
                        )));
                    }
                }
                (None, None) => {}
                _ => {
                    return Err(Error::BadRequest(
                        "Answers and correctness flags must be replaced together".to_string(),
                    ));
                }
            }

            let mut tables = self.tables.borrow_mut();
            let question = tables
                .questions
                .iter_mut()
                .find(|question| question.id == question_id)
                .ok_or_else(|| Error::NotFound(format!("Question {} not found", question_id)))?;

            if let Some(ref value) = changes.question {
                question.question = value.clone();
            }
            if let Some(ref value) = changes.description {
                question.description = Some(value.clone());
            }
            if let Some(ref value) = changes.explanation {
                question.explanation = Some(value.clone());
            }
            if let Some(ref value) = changes.tip {
                question.tip = Some(value.clone());
            }
            if let Some(ref value) = changes.category {
                question.category = value.clone();
            }
            if let Some(ref value) = changes.difficulty {
                question.difficulty = value.clone();
            }
            if let Some(ref value) = changes.answers {
                question.answers = value.clone();
            }
            if let Some(ref value) = changes.correct_answers {
                question.correct_answers = value.clone();
            }
            question.updated_at = Utc::now();

            Ok(question.clone())
        }

        fn game_by_id(&self, game_id: i32) -> Result<Option<Game>, Error> {
            let tables = self.tables.borrow();
            Ok(tables.games.iter().find(|game| game.id == game_id).cloned())
        }

        fn all_games(&self) -> Result<Vec<Game>, Error> {
            Ok(self.tables.borrow().games.clone())
        }

        fn games_for_user(&self, user_id: i32) -> Result<Vec<Game>, Error> {
            let tables = self.tables.borrow();
            Ok(tables
                .games
                .iter()
                .filter(|game| game.user_id == user_id)
                .cloned()
                .collect())
        }

        fn delete_game(&self, game_id: i32) -> Result<bool, Error> {
            let mut tables = self.tables.borrow_mut();
            let existed = tables.games.iter().any(|game| game.id == game_id);
            tables.games.retain(|game| game.id != game_id);
            tables.rounds.retain(|round| round.game_id != game_id);
            Ok(existed)
        }

        fn rounds_for_game(&self, game_id: i32) -> Result<Vec<Round>, Error> {
            let tables = self.tables.borrow();
            let mut rounds: Vec<Round> = tables
                .rounds
                .iter()
                .filter(|round| round.game_id == game_id)
                .cloned()
                .collect();
            rounds.sort_by_key(|round| round.position);
            Ok(rounds)
        }

        fn round_by_position(&self, game_id: i32, position: i32) -> Result<Option<Round>, Error> {
            let tables = self.tables.borrow();
            Ok(tables
                .rounds
                .iter()
                .find(|round| round.game_id == game_id && round.position == position)
                .cloned())
        }

        fn answered_count(&self, game_id: i32) -> Result<i32, Error> {
            let tables = self.tables.borrow();
            Ok(tables
                .rounds
                .iter()
                .filter(|round| round.game_id == game_id && round.answered_at.is_some())
                .count() as i32)
        }

        fn create_game_with_rounds(
            &self,
            user_id: i32,
            questions: &[NewQuestion],
        ) -> Result<Game, Error> {
            if self.fail_writes.get() {
                return Err(Error::InternalServerError(
                    "simulated write failure".to_string(),
                ));
            }
            for question in questions {
                check_answer_slots(question)?;
            }

            let mut tables = self.tables.borrow_mut();
            let now = Utc::now();
            let game = Game {
                id: tables.next_id(),
                user_id,
                rounds: questions.len() as i32,
                score: 0,
                created_at: now,
                updated_at: now,
            };
            tables.games.push(game.clone());

            for (position, question) in questions.iter().enumerate() {
                let question = MemoryStore::build_question(&mut tables, question);
                let round = Round {
                    id: tables.next_id(),
                    game_id: game.id,
                    question_id: question.id,
                    position: position as i32,
                    selected_answer: None,
                    is_correct: None,
                    answered_at: None,
                    created_at: now,
                    updated_at: now,
                };
                tables.rounds.push(round);
            }

            Ok(game)
        }

        fn record_answer(
            &self,
            game_id: i32,
            round_id: i32,
            selected: i32,
            correct: bool,
        ) -> Result<i32, Error> {
            let mut tables = self.tables.borrow_mut();

            let round = tables
                .rounds
                .iter_mut()
                .find(|round| round.id == round_id)
                .ok_or_else(|| Error::NotFound(format!("Round {} not found", round_id)))?;
            if round.answered_at.is_some() {
                return Err(Error::BadRequest(
                    "Round has already been answered".to_string(),
                ));
            }

            let now = Utc::now();
            round.selected_answer = Some(selected);
            round.is_correct = Some(correct);
            round.answered_at = Some(now);
            round.updated_at = now;

            let game = tables
                .games
                .iter_mut()
                .find(|game| game.id == game_id)
                .ok_or_else(|| Error::NotFound(format!("Game {} not found", game_id)))?;
            if correct {
                game.score += 1;
            }
            game.updated_at = now;

            Ok(game.score)
        }
    }

    /// A provider returning up to `limit` canned questions.
    pub struct CannedSource {
        questions: Vec<ProviderQuestion>,
    }

    impl CannedSource {
        pub fn new(questions: Vec<ProviderQuestion>) -> CannedSource {
            CannedSource { questions }
        }
    }

    impl QuestionSource for CannedSource {
        fn fetch(&self, request: &FetchRequest) -> Result<Vec<ProviderQuestion>, Error> {
            Ok(self
                .questions
                .iter()
                .take(request.limit as usize)
                .cloned()
                .collect())
        }
    }

    /// A provider that is always unreachable.
    pub struct FailingSource;

    impl QuestionSource for FailingSource {
        fn fetch(&self, _request: &FetchRequest) -> Result<Vec<ProviderQuestion>, Error> {
            Err(Error::ProviderError(
                "Question service is unavailable".to_string(),
            ))
        }
    }

    pub fn provider_question(
        prompt: &str,
        answers: &[&str],
        correct_answers: &[bool],
    ) -> ProviderQuestion {
        ProviderQuestion {
            question: prompt.to_string(),
            description: None,
            explanation: None,
            tip: None,
            category: Some("General".to_string()),
            difficulty: Some("medium".to_string()),
            answers: answers.iter().map(|answer| answer.to_string()).collect(),
            correct_answers: correct_answers.to_vec(),
        }
    }

    fn new_question(payload: &ProviderQuestion) -> NewQuestion {
        NewQuestion {
            question: payload.question.clone(),
            description: payload.description.clone(),
            explanation: payload.explanation.clone(),
            tip: payload.tip.clone(),
            category: payload
                .category
                .clone()
                .unwrap_or_else(|| "general".to_string()),
            difficulty: payload
                .difficulty
                .clone()
                .unwrap_or_else(|| "medium".to_string()),
            answers: payload.answers.clone(),
            correct_answers: payload.correct_answers.clone(),
        }
    }

    /// Creates a user and an unanswered game over the given questions.
    pub fn seeded_game(store: &MemoryStore, payloads: Vec<ProviderQuestion>) -> Game {
        let user = store.create_user("player-one").unwrap();
        let questions: Vec<NewQuestion> = payloads.iter().map(new_question).collect();
        store.create_game_with_rounds(user.id, &questions).unwrap()
    }
}
