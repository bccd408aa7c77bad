use db::models::{Difficulty, Game, NewQuestion, Question, Round};
use errors::Error;
use quizapi::{FetchRequest, ProviderQuestion, QuestionSource};

use crate::store::Store;

/// Settings for one play-through, gathered at the prompt.
pub struct SessionOptions {
    pub rounds: i32,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

/// What the player is shown right after answering.
pub struct AnswerOutcome {
    pub correct: bool,
    /// Texts of every correct slot, for display after a wrong pick.
    pub correct_answers: Vec<String>,
    pub explanation: Option<String>,
    /// Game score after this answer was recorded.
    pub score: i32,
}

pub struct GameSummary {
    pub total: i32,
    pub correct: i32,
    pub percentage: f64,
}

/// Drives one session from question selection to final score. Rounds are
/// presented in order, answered exactly once each, and scored against the
/// stored correctness flags. A question may mark several slots correct; a
/// pick counts iff the selected slot itself is marked true.
pub struct Engine<'a, S: Store, P: QuestionSource> {
    store: &'a S,
    provider: &'a P,
}

fn new_question_from_payload(payload: ProviderQuestion) -> NewQuestion {
    NewQuestion {
        question: payload.question,
        description: payload.description,
        explanation: payload.explanation,
        tip: payload.tip,
        category: payload.category.unwrap_or_else(|| "general".to_string()),
        difficulty: payload.difficulty.unwrap_or_else(|| "medium".to_string()),
        answers: payload.answers,
        correct_answers: payload.correct_answers,
    }
}

impl<'a, S: Store, P: QuestionSource> Engine<'a, S, P> {
    pub fn new(store: &'a S, provider: &'a P) -> Engine<'a, S, P> {
        Engine { store, provider }
    }

    /// Fetches a question set and persists questions, game, and unanswered
    /// rounds as one atomic batch, so a failure leaves no partial session
    /// behind. The game's round count is the number of questions actually
    /// received, which can be below the requested count.
    pub fn start_session(&self, user_id: i32, options: &SessionOptions) -> Result<Game, Error> {
        info!("Starting new game for user {}", user_id);

        let user = self
            .store
            .user_by_id(user_id)?
            .ok_or_else(|| Error::NotFound(format!("User {} not found", user_id)))?;

        let request = FetchRequest {
            category: options.category.clone(),
            difficulty: options.difficulty.map(|difficulty| difficulty.to_string()),
            limit: options.rounds.max(0) as u32,
        };
        let fetched = self.provider.fetch(&request)?;

        let questions: Vec<NewQuestion> = fetched
            .into_iter()
            .filter(|payload| !payload.answers.is_empty())
            .map(new_question_from_payload)
            .collect();
        if questions.is_empty() {
            return Err(Error::BadRequest(
                "No questions available for those settings".to_string(),
            ));
        }

        let game = self.store.create_game_with_rounds(user.id, &questions)?;
        info!(
            "Started game {} for user {} with {} rounds",
            game.id, user.id, game.rounds
        );

        Ok(game)
    }

    /// Returns the round at `index` with its question.
    pub fn present_round(&self, game_id: i32, index: i32) -> Result<(Round, Question), Error> {
        let game = self.require_game(game_id)?;

        if index < 0 || index >= game.rounds {
            return Err(Error::NotFound(format!(
                "Game {} has no round {}",
                game_id,
                index + 1
            )));
        }

        let round = self
            .store
            .round_by_position(game_id, index)?
            .ok_or_else(|| {
                Error::NotFound(format!("Game {} has no round {}", game_id, index + 1))
            })?;
        let question = self
            .store
            .question_by_id(round.question_id)?
            .ok_or_else(|| {
                Error::NotFound(format!("Question {} not found", round.question_id))
            })?;

        Ok((round, question))
    }

    /// Records the pick for the round at `index`. Rounds are single-shot
    /// and strictly ordered: `index` must be the first unanswered position.
    pub fn submit_answer(
        &self,
        game_id: i32,
        index: i32,
        selected_slot: usize,
    ) -> Result<AnswerOutcome, Error> {
        let (round, question) = self.present_round(game_id, index)?;

        if round.answered_at.is_some() {
            return Err(Error::BadRequest(format!(
                "Round {} has already been answered",
                index + 1
            )));
        }

        let answered = self.store.answered_count(game_id)?;
        if index != answered {
            return Err(Error::BadRequest(
                "Rounds must be answered in order".to_string(),
            ));
        }

        if selected_slot >= question.answers.len() {
            return Err(Error::ValidationError(vec![format!(
                "Answer must be between 1 and {}",
                question.answers.len()
            )]));
        }

        let correct = question.correct_answers[selected_slot];
        let score = self
            .store
            .record_answer(game_id, round.id, selected_slot as i32, correct)?;
        debug!(
            "Game {} round {} answered slot {} - correct: {}",
            game_id, index, selected_slot, correct
        );

        let correct_answers = question
            .answers
            .iter()
            .zip(question.correct_answers.iter())
            .filter(|(_, flag)| **flag)
            .map(|(text, _)| text.clone())
            .collect();

        Ok(AnswerOutcome {
            correct,
            correct_answers,
            explanation: question.explanation,
            score,
        })
    }

    /// Summarizes a finished session. Every round must have been answered;
    /// a zero-round session finalizes to an all-zero summary.
    pub fn finalize(&self, game_id: i32) -> Result<GameSummary, Error> {
        self.require_game(game_id)?;

        let rounds = self.store.rounds_for_game(game_id)?;
        if rounds.iter().any(|round| round.answered_at.is_none()) {
            return Err(Error::BadRequest(format!(
                "Game {} still has unanswered rounds",
                game_id
            )));
        }

        let total = rounds.len() as i32;
        let correct = rounds
            .iter()
            .filter(|round| round.is_correct == Some(true))
            .count() as i32;
        let percentage = if total > 0 {
            100.0 * f64::from(correct) / f64::from(total)
        } else {
            0.0
        };

        info!("Game {} finished at {}/{}", game_id, correct, total);

        Ok(GameSummary {
            total,
            correct,
            percentage,
        })
    }

    fn require_game(&self, game_id: i32) -> Result<Game, Error> {
        self.store
            .game_by_id(game_id)?
            .ok_or_else(|| Error::NotFound(format!("Game {} not found", game_id)))
    }
}
