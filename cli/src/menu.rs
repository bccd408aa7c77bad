use std::io::{self, BufRead, Write};
use std::str::FromStr;

use validator::Validate;

use db::models::{Difficulty, Game, NewQuestion, Question, QuestionChanges, User};
use errors::Error;
use quizapi::QuestionSource;

use crate::engine::{Engine, SessionOptions};
use crate::prompt::Prompter;
use crate::stats;
use crate::store::Store;
use crate::validate::validate;

#[derive(Validate)]
pub struct RegisterParams {
    #[validate(length(min = "1"))]
    pub username: String,
}

#[derive(Validate)]
pub struct QuestionParams {
    #[validate(length(min = "1"))]
    pub question: String,
}

/// The interactive loop. Every engine and store failure is reported and
/// swallowed here; only real I/O errors escape `run`.
pub struct Menu<'a, S: Store, P: QuestionSource, R, W> {
    store: &'a S,
    engine: Engine<'a, S, P>,
    prompt: Prompter<R, W>,
}

impl<'a, S: Store, P: QuestionSource, R: BufRead, W: Write> Menu<'a, S, P, R, W> {
    pub fn new(store: &'a S, provider: &'a P, input: R, output: W) -> Menu<'a, S, P, R, W> {
        Menu {
            store,
            engine: Engine::new(store, provider),
            prompt: Prompter::new(input, output),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.prompt.say("")?;
            self.prompt.say("Welcome to the Quiz Game!")?;
            self.prompt.say("1. Login or register")?;
            self.prompt.say("2. Manage database")?;
            self.prompt.say("3. Exit")?;

            match self.prompt.nonempty("Enter your choice: ")?.as_str() {
                "1" => self.login()?,
                "2" => self.database_menu()?,
                "3" => {
                    self.prompt.say("Goodbye!")?;
                    return Ok(());
                }
                _ => self.prompt.say("Invalid choice")?,
            }
        }
    }

    fn login(&mut self) -> io::Result<()> {
        let username = self.prompt.nonempty("Enter your username: ")?;

        match self.store.user_by_username(&username) {
            Ok(Some(user)) => {
                self.prompt
                    .say(&format!("Welcome back, {}!", user.username))?;
                self.player_menu(&user)
            }
            Ok(None) => {
                self.prompt
                    .say("User not found, would you like to register?")?;
                if self.prompt.yes_no("(y/n): ")? {
                    if let Some(user) = self.register(&username)? {
                        self.prompt.say(&format!("Welcome, {}!", user.username))?;
                        return self.player_menu(&user);
                    }
                }
                Ok(())
            }
            Err(err) => self.report_error("look up user", &err),
        }
    }

    fn register(&mut self, username: &str) -> io::Result<Option<User>> {
        let params = RegisterParams {
            username: username.to_string(),
        };
        if let Err(err) = validate(&params) {
            self.report_error("register user", &err)?;
            return Ok(None);
        }

        match self.store.create_user(username) {
            Ok(user) => {
                info!("Created new user {} ({})", user.username, user.id);
                Ok(Some(user))
            }
            Err(err) => {
                self.report_error("register user", &err)?;
                Ok(None)
            }
        }
    }

    fn player_menu(&mut self, user: &User) -> io::Result<()> {
        loop {
            self.prompt.say("")?;
            self.prompt.say(&format!("Hello, {}!", user.username))?;
            self.prompt.say("1. Start a new game")?;
            self.prompt.say("2. View history")?;
            self.prompt.say("3. View statistics")?;
            self.prompt.say("4. Log out")?;

            match self.prompt.nonempty("Enter your choice: ")?.as_str() {
                "1" => self.start_game(user)?,
                "2" => self.history(user)?,
                "3" => self.statistics(user)?,
                "4" => return Ok(()),
                _ => self.prompt.say("Invalid choice")?,
            }
        }
    }

    fn start_game(&mut self, user: &User) -> io::Result<()> {
        loop {
            let rounds = self
                .prompt
                .number_in_range("How many questions would you like? (1-10): ", 1, 10)?;
            let category = self.prompt.optional("Category (leave empty for any): ")?;
            let difficulty = self.read_difficulty()?;

            let options = SessionOptions {
                rounds,
                category,
                difficulty,
            };
            match self.engine.start_session(user.id, &options) {
                Ok(game) => self.play(&game)?,
                Err(err) => self.report_error("start a game", &err)?,
            }

            self.prompt.say("")?;
            if !self.prompt.yes_no("Would you like to play again? (y/n): ")? {
                self.prompt.say("Thanks for playing!")?;
                return Ok(());
            }
        }
    }

    fn read_difficulty(&mut self) -> io::Result<Option<Difficulty>> {
        loop {
            match self
                .prompt
                .optional("Difficulty (easy/medium/hard, leave empty for any): ")?
            {
                None => return Ok(None),
                Some(value) => match Difficulty::from_str(&value) {
                    Ok(difficulty) => return Ok(Some(difficulty)),
                    Err(_) => self.prompt.say("Please enter easy, medium or hard")?,
                },
            }
        }
    }

    fn play(&mut self, game: &Game) -> io::Result<()> {
        for index in 0..game.rounds {
            let question = match self.engine.present_round(game.id, index) {
                Ok((_, question)) => question,
                Err(err) => return self.report_error("present round", &err),
            };

            self.prompt.say("")?;
            self.prompt.say(&"=".repeat(50))?;
            self.prompt.say(&format!(
                "Question {} of {}: {}",
                index + 1,
                game.rounds,
                question.question
            ))?;
            if let Some(ref description) = question.description {
                self.prompt.say(&format!("Description: {}", description))?;
            }
            self.prompt.say("")?;
            for (slot, answer) in question.answers.iter().enumerate() {
                self.prompt.say(&format!("{}. {}", slot + 1, answer))?;
            }

            let answer_count = question.answers.len() as i32;
            let selected = self.prompt.number_in_range(
                &format!("Enter your answer (1-{}): ", answer_count),
                1,
                answer_count,
            )?;

            match self.engine.submit_answer(game.id, index, (selected - 1) as usize) {
                Ok(outcome) => {
                    if outcome.correct {
                        self.prompt.say("✅ Correct!")?;
                    } else {
                        self.prompt.say("❌ Wrong!")?;
                        self.prompt.say("The correct answer(s) was(were):")?;
                        for text in &outcome.correct_answers {
                            self.prompt.say(&format!("- {}", text))?;
                        }
                    }
                    if let Some(ref explanation) = outcome.explanation {
                        self.prompt.say(&format!("Explanation: {}", explanation))?;
                    }
                    self.prompt
                        .say(&format!("Current score: {}/{}", outcome.score, index + 1))?;
                }
                Err(err) => return self.report_error("submit answer", &err),
            }
        }

        match self.engine.finalize(game.id) {
            Ok(summary) => {
                self.prompt.say("")?;
                self.prompt.say(&format!(
                    "Game Over! Final score: {}/{} ({:.0}%)",
                    summary.correct, summary.total, summary.percentage
                ))?;
                Ok(())
            }
            Err(err) => self.report_error("finish the game", &err),
        }
    }

    fn history(&mut self, user: &User) -> io::Result<()> {
        let games = match self.store.games_for_user(user.id) {
            Ok(games) => games,
            Err(err) => return self.report_error("load history", &err),
        };
        if games.is_empty() {
            self.prompt.say("No games played yet")?;
            return self.prompt.pause();
        }

        self.prompt.say("Your games:")?;
        for game in &games {
            let rounds = match self.store.rounds_for_game(game.id) {
                Ok(rounds) => rounds,
                Err(err) => return self.report_error("load history", &err),
            };
            let status = if stats::is_complete(&rounds) {
                "completed"
            } else {
                "in progress"
            };
            self.prompt.say(&format!(
                "Game {}: {}/{} [{}] played on {}",
                game.id,
                game.score,
                game.rounds,
                status,
                game.created_at.format("%Y-%m-%d %H:%M")
            ))?;
        }

        let game_id = self
            .prompt
            .number("Enter a game ID for details (0 to go back): ")?;
        if game_id != 0 {
            self.game_details(game_id)?;
        }
        Ok(())
    }

    fn game_details(&mut self, game_id: i32) -> io::Result<()> {
        let game = match self.store.game_by_id(game_id) {
            Ok(Some(game)) => game,
            Ok(None) => {
                self.prompt.say("Game not found")?;
                return self.prompt.pause();
            }
            Err(err) => return self.report_error("load game", &err),
        };

        self.prompt.say(&format!(
            "Game {}: score {}/{}, played on {}",
            game.id,
            game.score,
            game.rounds,
            game.created_at.format("%Y-%m-%d %H:%M")
        ))?;

        let rounds = match self.store.rounds_for_game(game.id) {
            Ok(rounds) => rounds,
            Err(err) => return self.report_error("load game", &err),
        };
        for round in &rounds {
            match self.store.question_by_id(round.question_id) {
                Ok(Some(question)) => {
                    self.prompt.say("")?;
                    self.show_question(&question)?;
                    match round.selected_answer {
                        Some(slot) => self.prompt.say(&format!(
                            "Selected answer: {} {}",
                            slot + 1,
                            if round.is_correct == Some(true) {
                                "(Correct)"
                            } else {
                                "(Wrong)"
                            }
                        ))?,
                        None => self.prompt.say("Not answered yet")?,
                    }
                }
                Ok(None) => self.prompt.say("Question not found")?,
                Err(err) => return self.report_error("load game", &err),
            }
        }

        self.prompt.pause()
    }

    fn statistics(&mut self, user: &User) -> io::Result<()> {
        let games = match self.store.games_for_user(user.id) {
            Ok(games) => games,
            Err(err) => return self.report_error("load statistics", &err),
        };

        let mut pairs = Vec::with_capacity(games.len());
        for game in games {
            let rounds = match self.store.rounds_for_game(game.id) {
                Ok(rounds) => rounds,
                Err(err) => return self.report_error("load statistics", &err),
            };
            pairs.push((game, rounds));
        }

        let stats = stats::compute(&pairs);

        self.prompt.say("")?;
        self.prompt
            .say(&format!("=== Statistics for {} ===", user.username))?;
        self.prompt
            .say(&format!("Games completed: {}", stats.games_played))?;
        self.prompt
            .say(&format!("Games in progress: {}", stats.games_in_progress))?;
        self.prompt.say(&format!(
            "Correct answers: {}/{}",
            stats.total_correct, stats.total_rounds
        ))?;
        self.prompt
            .say(&format!("Average score: {:.1}%", stats.average_percentage))?;
        if let Some((correct, total)) = stats.best {
            self.prompt
                .say(&format!("Best game: {}/{}", correct, total))?;
        }

        self.prompt.pause()
    }

    fn database_menu(&mut self) -> io::Result<()> {
        loop {
            self.prompt.say("")?;
            self.prompt.say("Database Management")?;
            self.prompt.say("1. Create")?;
            self.prompt.say("2. Read")?;
            self.prompt.say("3. Update")?;
            self.prompt.say("4. Delete")?;
            self.prompt.say("5. Back")?;

            match self.prompt.nonempty("Enter your choice: ")?.as_str() {
                "1" => self.create_menu()?,
                "2" => self.read_menu()?,
                "3" => self.update_menu()?,
                "4" => self.delete_menu()?,
                "5" => return Ok(()),
                _ => self.prompt.say("Invalid choice")?,
            }
        }
    }

    fn create_menu(&mut self) -> io::Result<()> {
        loop {
            self.prompt.say("")?;
            self.prompt.say("Create Menu")?;
            self.prompt.say("1. Create User")?;
            self.prompt.say("2. Create Question")?;
            self.prompt.say("3. Back")?;

            match self.prompt.nonempty("Enter your choice: ")?.as_str() {
                "1" => self.create_user_flow()?,
                "2" => self.create_question_flow()?,
                "3" => return Ok(()),
                _ => self.prompt.say("Invalid choice")?,
            }
        }
    }

    fn create_user_flow(&mut self) -> io::Result<()> {
        let username = self.prompt.nonempty("Enter username: ")?;

        match self.store.user_by_username(&username) {
            Ok(Some(_)) => self.prompt.say("User already exists")?,
            Ok(None) => {
                if let Some(user) = self.register(&username)? {
                    self.prompt.say(&format!(
                        "User {} created with ID {}",
                        user.username, user.id
                    ))?;
                }
            }
            Err(err) => self.report_error("look up user", &err)?,
        }

        self.prompt.pause()
    }

    fn create_question_flow(&mut self) -> io::Result<()> {
        let question_text = self.prompt.nonempty("Enter question: ")?;
        if let Err(err) = validate(&QuestionParams {
            question: question_text.clone(),
        }) {
            return self.report_error("create question", &err);
        }

        let description = self.prompt.optional("Enter description: ")?;
        let explanation = self.prompt.optional("Enter explanation: ")?;
        let category = self
            .prompt
            .optional("Enter category: ")?
            .unwrap_or_else(|| "general".to_string());
        let difficulty = self
            .read_difficulty()?
            .unwrap_or(Difficulty::Medium)
            .to_string();

        let mut answers = Vec::new();
        let mut correct_answers = Vec::new();
        for slot in 1..=4 {
            answers.push(self.prompt.nonempty(&format!("Enter answer {}: ", slot))?);
            correct_answers.push(
                self.prompt
                    .yes_no(&format!("Is answer {} correct? (y/n): ", slot))?,
            );
        }

        let new_question = NewQuestion {
            question: question_text,
            description,
            explanation,
            tip: None,
            category,
            difficulty,
            answers,
            correct_answers,
        };

        match self.store.create_question(&new_question) {
            Ok(question) => {
                self.prompt
                    .say(&format!("Question {} created", question.id))?;
                self.show_question(&question)?;
                self.prompt.pause()
            }
            Err(err) => self.report_error("create question", &err),
        }
    }

    fn read_menu(&mut self) -> io::Result<()> {
        loop {
            self.prompt.say("")?;
            self.prompt.say("Read Menu")?;
            self.prompt.say("1. Read all Users")?;
            self.prompt.say("2. Read User by Id")?;
            self.prompt.say("3. Read all Questions")?;
            self.prompt.say("4. Read Question by Id")?;
            self.prompt.say("5. Read all Games")?;
            self.prompt.say("6. Read Game by Id")?;
            self.prompt.say("7. Back")?;

            match self.prompt.nonempty("Enter your choice: ")?.as_str() {
                "1" => self.read_users()?,
                "2" => self.read_user()?,
                "3" => self.read_questions()?,
                "4" => self.read_question()?,
                "5" => self.read_games()?,
                "6" => self.read_game()?,
                "7" => return Ok(()),
                _ => self.prompt.say("Invalid choice")?,
            }
        }
    }

    fn read_users(&mut self) -> io::Result<()> {
        match self.store.all_users() {
            Ok(users) => {
                self.prompt.say("Users:")?;
                for user in users {
                    self.prompt
                        .say(&format!("{}: {}", user.id, user.username))?;
                }
                self.prompt.pause()
            }
            Err(err) => self.report_error("read users", &err),
        }
    }

    fn read_user(&mut self) -> io::Result<()> {
        let user_id = self.prompt.number("Enter user ID: ")?;

        match self.store.user_by_id(user_id) {
            Ok(Some(user)) => self
                .prompt
                .say(&format!("User {}: {}", user.id, user.username))?,
            Ok(None) => self.prompt.say("User not found")?,
            Err(err) => return self.report_error("read user", &err),
        }

        self.prompt.pause()
    }

    fn read_questions(&mut self) -> io::Result<()> {
        match self.store.all_questions() {
            Ok(questions) => {
                self.prompt.say("Questions:")?;
                for question in questions {
                    self.prompt
                        .say(&format!("{}: {}", question.id, question.question))?;
                }
                self.prompt.pause()
            }
            Err(err) => self.report_error("read questions", &err),
        }
    }

    fn read_question(&mut self) -> io::Result<()> {
        let question_id = self.prompt.number("Enter question ID: ")?;

        match self.store.question_by_id(question_id) {
            Ok(Some(question)) => self.show_question(&question)?,
            Ok(None) => self.prompt.say("Question not found")?,
            Err(err) => return self.report_error("read question", &err),
        }

        self.prompt.pause()
    }

    fn read_games(&mut self) -> io::Result<()> {
        match self.store.all_games() {
            Ok(games) => {
                self.prompt.say("Games:")?;
                for game in games {
                    self.prompt.say(&format!(
                        "Game {}: User: {}, Score: {}/{}, Played on: {}",
                        game.id,
                        game.user_id,
                        game.score,
                        game.rounds,
                        game.created_at.format("%Y-%m-%d %H:%M")
                    ))?;
                }
                self.prompt.pause()
            }
            Err(err) => self.report_error("read games", &err),
        }
    }

    fn read_game(&mut self) -> io::Result<()> {
        let game_id = self.prompt.number("Enter game ID: ")?;
        self.game_details(game_id)
    }

    fn update_menu(&mut self) -> io::Result<()> {
        loop {
            self.prompt.say("")?;
            self.prompt.say("Update Menu")?;
            self.prompt.say("1. Update Question")?;
            self.prompt.say("2. Rename User")?;
            self.prompt.say("3. Back")?;

            match self.prompt.nonempty("Enter your choice: ")?.as_str() {
                "1" => self.update_question_flow()?,
                "2" => self.rename_user_flow()?,
                "3" => return Ok(()),
                _ => self.prompt.say("Invalid choice")?,
            }
        }
    }

    fn update_question_flow(&mut self) -> io::Result<()> {
        let question_id = self.prompt.number("Enter question ID: ")?;

        let question = match self.store.question_by_id(question_id) {
            Ok(Some(question)) => question,
            Ok(None) => {
                self.prompt.say("Question not found")?;
                return self.prompt.pause();
            }
            Err(err) => return self.report_error("read question", &err),
        };

        self.prompt.say("Update Question")?;
        self.prompt
            .say("If you do not want to update a field, leave it empty")?;
        self.prompt.say("")?;
        self.show_question(&question)?;

        let mut changes = QuestionChanges::default();
        changes.question = self.prompt.optional("Enter new question: ")?;
        changes.description = self.prompt.optional("Enter new description: ")?;
        changes.explanation = self.prompt.optional("Enter new explanation: ")?;
        changes.category = self.prompt.optional("Enter new category: ")?;
        changes.difficulty = self.read_difficulty()?.map(|value| value.to_string());

        if self.prompt.yes_no("Replace the answers? (y/n): ")? {
            let mut answers = Vec::new();
            let mut correct_answers = Vec::new();
            for slot in 1..=4 {
                answers.push(
                    self.prompt
                        .nonempty(&format!("Enter new answer {}: ", slot))?,
                );
                correct_answers.push(
                    self.prompt
                        .yes_no(&format!("Is answer {} correct? (y/n): ", slot))?,
                );
            }
            changes.answers = Some(answers);
            changes.correct_answers = Some(correct_answers);
        }

        if changes.is_empty() {
            self.prompt.say("Nothing to update")?;
            return self.prompt.pause();
        }

        match self.store.update_question(question.id, &changes) {
            Ok(updated) => {
                self.prompt
                    .say(&format!("Question {} updated", updated.id))?;
                self.show_question(&updated)?;
                self.prompt.pause()
            }
            Err(err) => self.report_error("update question", &err),
        }
    }

    fn rename_user_flow(&mut self) -> io::Result<()> {
        let user_id = self.prompt.number("Enter user ID: ")?;

        let user = match self.store.user_by_id(user_id) {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.prompt.say("User not found")?;
                return self.prompt.pause();
            }
            Err(err) => return self.report_error("read user", &err),
        };

        self.prompt
            .say(&format!("Current username: {}", user.username))?;
        let username = self.prompt.nonempty("Enter new username: ")?;
        if let Err(err) = validate(&RegisterParams {
            username: username.clone(),
        }) {
            return self.report_error("rename user", &err);
        }

        match self.store.rename_user(user.id, &username) {
            Ok(renamed) => {
                self.prompt.say(&format!(
                    "User {} renamed to {}",
                    renamed.id, renamed.username
                ))?;
                self.prompt.pause()
            }
            Err(err) => self.report_error("rename user", &err),
        }
    }

    fn delete_menu(&mut self) -> io::Result<()> {
        loop {
            self.prompt.say("")?;
            self.prompt.say("Delete Menu")?;
            self.prompt.say("1. Delete Game")?;
            self.prompt.say("2. Back")?;

            match self.prompt.nonempty("Enter your choice: ")?.as_str() {
                "1" => self.delete_game_flow()?,
                "2" => return Ok(()),
                _ => self.prompt.say("Invalid choice")?,
            }
        }
    }

    fn delete_game_flow(&mut self) -> io::Result<()> {
        let game_id = self.prompt.number("Enter game ID: ")?;

        match self.store.game_by_id(game_id) {
            Ok(Some(_)) => {}
            Ok(None) => {
                self.prompt.say("Game not found")?;
                return self.prompt.pause();
            }
            Err(err) => return self.report_error("read game", &err),
        }

        if !self
            .prompt
            .yes_no(&format!("Delete game {} and its rounds? (y/n): ", game_id))?
        {
            return Ok(());
        }

        match self.store.delete_game(game_id) {
            Ok(true) => self.prompt.say(&format!("Game {} deleted", game_id))?,
            Ok(false) => self.prompt.say("Game not found")?,
            Err(err) => return self.report_error("delete game", &err),
        }

        self.prompt.pause()
    }

    fn show_question(&mut self, question: &Question) -> io::Result<()> {
        self.prompt
            .say(&format!("Question {}: {}", question.id, question.question))?;
        if let Some(ref description) = question.description {
            self.prompt.say(&format!("Description: {}", description))?;
        }
        if let Some(ref explanation) = question.explanation {
            self.prompt.say(&format!("Explanation: {}", explanation))?;
        }
        self.prompt
            .say(&format!("Category: {}", question.category))?;
        self.prompt
            .say(&format!("Difficulty: {}", question.difficulty))?;
        self.prompt.say("Answers:")?;
        for (slot, (answer, correct)) in question
            .answers
            .iter()
            .zip(question.correct_answers.iter())
            .enumerate()
        {
            self.prompt.say(&format!(
                "{}. {} ({})",
                slot + 1,
                answer,
                if *correct { "Right" } else { "Wrong" }
            ))?;
        }

        Ok(())
    }

    fn report_error(&mut self, operation: &str, err: &Error) -> io::Result<()> {
        error!("Failed to {} - {}", operation, err);

        match err {
            Error::ValidationError(messages) => {
                for message in messages {
                    self.prompt.say(message)?;
                }
                Ok(())
            }
            Error::ProviderError(_) => self
                .prompt
                .say("The question service could not be reached, please try again later."),
            Error::NotFound(message) | Error::BadRequest(message) => self.prompt.say(message),
            _ => self.prompt.say("Something went wrong, please try again."),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::store::Store;
    use crate::tests::helpers::tests::{provider_question, CannedSource, MemoryStore};

    use super::Menu;

    fn run_script(store: &MemoryStore, source: &CannedSource, script: &str) -> String {
        let mut output = Vec::new();
        {
            let mut menu = Menu::new(
                store,
                source,
                Cursor::new(script.as_bytes().to_vec()),
                &mut output,
            );
            menu.run().unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn full_session_from_register_to_summary() {
        let store = MemoryStore::new();
        let source = CannedSource::new(vec![
            provider_question("First", &["a", "b"], &[true, false]),
            provider_question("Second", &["a", "b"], &[false, true]),
        ]);

        let output = run_script(
            &store,
            &source,
            "1\nagmcleod\ny\n1\n2\n\n\n1\n1\nn\n4\n3\n",
        );

        assert!(output.contains("Welcome, agmcleod!"));
        assert!(output.contains("Correct!"));
        assert!(output.contains("Wrong!"));
        assert!(output.contains("Final score: 1/2 (50%)"));
        assert!(output.contains("Goodbye!"));

        let user = store.user_by_username("agmcleod").unwrap().unwrap();
        let games = store.games_for_user(user.id).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].score, 1);
    }

    #[test]
    fn invalid_choices_reprompt_instead_of_exiting() {
        let store = MemoryStore::new();
        let source = CannedSource::new(vec![]);

        let output = run_script(&store, &source, "9\n3\n");

        assert!(output.contains("Invalid choice"));
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn users_can_be_created_from_the_database_menu() {
        let store = MemoryStore::new();
        let source = CannedSource::new(vec![]);

        let output = run_script(&store, &source, "2\n1\n1\nagmcleod\n\n3\n5\n3\n");

        assert!(output.contains("User agmcleod created with ID 1"));
        assert!(store.user_by_username("agmcleod").unwrap().is_some());
    }

    #[test]
    fn provider_outage_reports_and_returns_to_the_menu() {
        let store = MemoryStore::new();
        store.create_user("agmcleod").unwrap();
        let source = CannedSource::new(vec![]);

        // empty source means "no questions available" - the menu keeps going
        let output = run_script(&store, &source, "1\nagmcleod\n1\n3\n\n\nn\n4\n3\n");

        assert!(output.contains("No questions available"));
        assert!(output.contains("Goodbye!"));
        let user = store.user_by_username("agmcleod").unwrap().unwrap();
        assert!(store.games_for_user(user.id).unwrap().is_empty());
    }
}
