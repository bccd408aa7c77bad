use dotenv::dotenv;

use db::models::{NewQuestion, Question};
use db::{get_conn, new_pool};

fn question(
    prompt: &str,
    explanation: Option<&str>,
    category: &str,
    difficulty: &str,
    answers: &[&str],
    correct_answers: &[bool],
) -> NewQuestion {
    NewQuestion {
        question: prompt.to_string(),
        description: None,
        explanation: explanation.map(|text| text.to_string()),
        tip: None,
        category: category.to_string(),
        difficulty: difficulty.to_string(),
        answers: answers.iter().map(|answer| answer.to_string()).collect(),
        correct_answers: correct_answers.to_vec(),
    }
}

fn main() {
    dotenv().ok();

    let pool = new_pool();
    let conn = get_conn(&pool).unwrap();

    let starters = vec![
        question(
            "How do you delete a directory in Linux?",
            Some("rmdir removes empty directories."),
            "Linux",
            "easy",
            &["ls", "delete", "remove", "rmdir"],
            &[false, false, false, true],
        ),
        question(
            "Which command lists the contents of a directory?",
            None,
            "Linux",
            "easy",
            &["ls", "cd", "pwd", "cat"],
            &[true, false, false, false],
        ),
        question(
            "Which of these are version control systems?",
            Some("Both Git and Mercurial track revisions."),
            "DevOps",
            "medium",
            &["Git", "Mercurial", "Nginx", "Redis"],
            &[true, true, false, false],
        ),
        question(
            "What does SQL stand for?",
            None,
            "SQL",
            "easy",
            &[
                "Structured Query Language",
                "Simple Query Language",
                "Sequential Query Language",
                "Standard Query List",
            ],
            &[true, false, false, false],
        ),
        question(
            "Which HTTP status code means Not Found?",
            None,
            "HTTP",
            "medium",
            &["200", "301", "404", "500"],
            &[false, false, true, false],
        ),
    ];

    for starter in &starters {
        Question::create(&conn, starter).unwrap();
    }

    println!("Seeded {} questions", starters.len());
}
