use db::models::{Game, Round};

/// Aggregated results for one user. Only completed games (every round
/// answered) count toward totals and averages; abandoned sessions are
/// tallied separately and otherwise left alone.
pub struct Statistics {
    pub games_played: usize,
    pub games_in_progress: usize,
    pub total_rounds: i32,
    pub total_correct: i32,
    pub average_percentage: f64,
    /// Score and round count of the best completed game by percentage.
    pub best: Option<(i32, i32)>,
}

pub fn is_complete(rounds: &[Round]) -> bool {
    rounds.iter().all(|round| round.answered_at.is_some())
}

pub fn percentage(correct: i32, total: i32) -> f64 {
    if total > 0 {
        100.0 * f64::from(correct) / f64::from(total)
    } else {
        0.0
    }
}

pub fn compute(games: &[(Game, Vec<Round>)]) -> Statistics {
    let mut stats = Statistics {
        games_played: 0,
        games_in_progress: 0,
        total_rounds: 0,
        total_correct: 0,
        average_percentage: 0.0,
        best: None,
    };

    let mut percentage_sum = 0.0;
    let mut best_percentage = -1.0;

    for (_, rounds) in games {
        if !is_complete(rounds) {
            stats.games_in_progress += 1;
            continue;
        }

        let total = rounds.len() as i32;
        let correct = rounds
            .iter()
            .filter(|round| round.is_correct == Some(true))
            .count() as i32;

        stats.games_played += 1;
        stats.total_rounds += total;
        stats.total_correct += correct;

        let game_percentage = percentage(correct, total);
        percentage_sum += game_percentage;
        if game_percentage > best_percentage {
            best_percentage = game_percentage;
            stats.best = Some((correct, total));
        }
    }

    if stats.games_played > 0 {
        stats.average_percentage = percentage_sum / stats.games_played as f64;
    }

    stats
}
