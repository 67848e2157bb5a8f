use crate::commands::{init_cli, render_result};
use crate::infra::{build_service, ApiQuizService};
use chrono::Local;
use clap::Args;
use persona_quiz::error::AppError;
use persona_quiz::quizzes::{Question, QuizServiceError, ScoreRequest};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Only play this quiz (defaults to every built-in quiz)
    #[arg(long)]
    pub(crate) quiz: Option<String>,
    /// Always pick the option at this 1-based position instead of cycling
    #[arg(long)]
    pub(crate) pick: Option<usize>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = init_cli()?;
    let service = build_service(&config.quiz)?;

    let keys: Vec<String> = match &args.quiz {
        Some(key) => {
            service.questions(key)?;
            vec![key.clone()]
        }
        None => service.list().into_iter().map(|summary| summary.key).collect(),
    };

    println!(
        "Persona quiz demo ({})",
        Local::now().format("%Y-%m-%d %H:%M")
    );
    for key in keys {
        println!("\n=== {key} ===");
        print!("{}", play(&service, &key, args.pick)?);
    }
    Ok(())
}

/// Scores simulated answers twice under one session to show the cache.
fn play(service: &ApiQuizService, quiz: &str, pick: Option<usize>) -> Result<String, QuizServiceError> {
    let questions = service.questions(quiz)?.questions;
    let request = ScoreRequest {
        answers: simulated_answers(&questions, pick),
        session: Some(format!("demo-{}", Local::now().timestamp())),
    };

    let first = service.score(quiz, request.clone())?;
    let repeat = service.score(quiz, request)?;

    let mut text = render_result(&first);
    text.push_str(&format!(
        "\nRepeat request served from cache: {}\n",
        if repeat.cached { "yes" } else { "no" }
    ));
    Ok(text)
}

fn simulated_answers(questions: &[Question], pick: Option<usize>) -> Vec<Option<String>> {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let count = question.options.len();
            if count == 0 {
                return None;
            }
            let position = match pick {
                Some(position) => position.saturating_sub(1).min(count - 1),
                None => index % count,
            };
            question.options.get(position).map(|option| option.id.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use persona_quiz::config::QuizConfig;
    use persona_quiz::quizzes::catalog::cat_archetype;

    fn service() -> std::sync::Arc<ApiQuizService> {
        build_service(&QuizConfig::default()).expect("service builds")
    }

    #[test]
    fn simulated_answers_cycle_or_pin_positions() {
        let questions = service()
            .questions(cat_archetype::KEY)
            .expect("questions")
            .questions;

        let cycled = simulated_answers(&questions, None);
        assert_eq!(cycled[1], Some(questions[1].options[1].id.clone()));
        assert_eq!(cycled[5], Some(questions[5].options[1].id.clone()));

        let pinned = simulated_answers(&questions, Some(9));
        assert!(pinned
            .iter()
            .zip(&questions)
            .all(|(answer, question)| answer.as_deref() == Some(question.options[3].id.as_str())));
    }

    #[test]
    fn play_reports_cache_hit_on_repeat() {
        let text = play(&service(), cat_archetype::KEY, Some(3)).expect("plays");
        assert!(text.contains("answered 12 of 12"));
        assert!(text.contains("The Sunbeam Napper"));
        assert!(text.ends_with("Repeat request served from cache: yes\n"));
    }

    #[test]
    fn unknown_quiz_is_reported() {
        assert!(play(&service(), "tarot", None).is_err());
    }
}
