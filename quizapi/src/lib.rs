#[macro_use]
extern crate log;

use std::time::Duration;

use serde::Deserialize;

use errors::Error;

pub const DEFAULT_BASE_URL: &str = "https://quizapi.io/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Parameters for one question fetch. `limit` is how many questions to ask
/// for; the service may return fewer.
#[derive(Clone, Debug, Default)]
pub struct FetchRequest {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub limit: u32,
}

/// A question payload normalized into parallel answer/correctness slots.
/// Both vectors always have the same length.
#[derive(Clone, Debug)]
pub struct ProviderQuestion {
    pub question: String,
    pub description: Option<String>,
    pub explanation: Option<String>,
    pub tip: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub answers: Vec<String>,
    pub correct_answers: Vec<bool>,
}

/// Anything that can supply question sets for a game. Implemented by
/// [`Client`] against the live service and by canned sources in tests.
pub trait QuestionSource {
    fn fetch(&self, request: &FetchRequest) -> Result<Vec<ProviderQuestion>, Error>;
}

// The service keys answer slots a through f, with nulls for unused slots
// and correctness flags as "true"/"false" strings.
#[derive(Debug, Deserialize)]
struct ApiQuestion {
    question: String,
    description: Option<String>,
    explanation: Option<String>,
    tip: Option<String>,
    category: Option<String>,
    difficulty: Option<String>,
    answers: ApiAnswers,
    correct_answers: ApiCorrectAnswers,
}

#[derive(Debug, Default, Deserialize)]
struct ApiAnswers {
    answer_a: Option<String>,
    answer_b: Option<String>,
    answer_c: Option<String>,
    answer_d: Option<String>,
    answer_e: Option<String>,
    answer_f: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiCorrectAnswers {
    answer_a_correct: Option<String>,
    answer_b_correct: Option<String>,
    answer_c_correct: Option<String>,
    answer_d_correct: Option<String>,
    answer_e_correct: Option<String>,
    answer_f_correct: Option<String>,
}

impl ApiQuestion {
    /// Keeps only slots with answer text, each paired with its own
    /// correctness flag, so the parallel arrays stay the same length even
    /// when the payload marks flags for empty slots.
    fn into_question(self) -> ProviderQuestion {
        let slots = vec![
            (self.answers.answer_a, self.correct_answers.answer_a_correct),
            (self.answers.answer_b, self.correct_answers.answer_b_correct),
            (self.answers.answer_c, self.correct_answers.answer_c_correct),
            (self.answers.answer_d, self.correct_answers.answer_d_correct),
            (self.answers.answer_e, self.correct_answers.answer_e_correct),
            (self.answers.answer_f, self.correct_answers.answer_f_correct),
        ];

        let mut answers = Vec::new();
        let mut correct_answers = Vec::new();
        for (text, flag) in slots {
            if let Some(text) = text {
                if text.is_empty() {
                    continue;
                }
                answers.push(text);
                correct_answers.push(flag.map(|value| value == "true").unwrap_or(false));
            }
        }

        ProviderQuestion {
            question: self.question,
            description: self.description,
            explanation: self.explanation,
            tip: self.tip,
            category: self.category,
            difficulty: self.difficulty,
            answers,
            correct_answers,
        }
    }
}

pub struct Client {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    pub fn new(api_key: String) -> Result<Client, Error> {
        Client::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Result<Client, Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Client {
            http,
            base_url,
            api_key,
        })
    }
}

impl QuestionSource for Client {
    fn fetch(&self, request: &FetchRequest) -> Result<Vec<ProviderQuestion>, Error> {
        let mut params: Vec<(&str, String)> = vec![("limit", request.limit.to_string())];
        if let Some(ref category) = request.category {
            params.push(("category", category.clone()));
        }
        if let Some(ref difficulty) = request.difficulty {
            params.push(("difficulty", difficulty.clone()));
        }

        let response = self
            .http
            .get(&format!("{}/questions", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .query(&params)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            error!("Question fetch failed - status {}", status);
            return Err(Error::ProviderError(format!(
                "Question service returned {}",
                status
            )));
        }

        let payload: Vec<ApiQuestion> = response.json()?;
        debug!("Fetched {} questions", payload.len());

        Ok(payload
            .into_iter()
            .map(ApiQuestion::into_question)
            .collect())
    }
}
