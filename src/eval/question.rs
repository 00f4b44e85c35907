//! Question evaluation: eligibility, candidate selection, classification.

use crate::dataset::SynonymQuestion;
use crate::vectors::VectorModel;
use serde::{Deserialize, Serialize};

/// Classification of one evaluated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    /// The selected candidate equals the expected answer.
    Correct,
    /// A candidate was selected, but it is not the expected answer.
    Wrong,
    /// No candidate was selected; the model made no attempt.
    Guess,
}

impl Label {
    /// Lowercase form used in report rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Correct => "correct",
            Label::Wrong => "wrong",
            Label::Guess => "guess",
        }
    }
}

/// Result of evaluating one question against one model.
///
/// `label` is `Guess` iff `selected` is absent, and `Correct` iff `selected`
/// equals `expected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// The question word.
    pub question: String,
    /// The expected answer from the dataset.
    pub expected: String,
    /// The candidate the model picked, if it attempted an answer.
    pub selected: Option<String>,
    /// Outcome classification.
    pub label: Label,
}

/// Evaluate one question against one model.
///
/// The question is attempted only when the question word and at least one
/// option have vectors. Ineligible questions classify as `Guess` without any
/// similarity lookup, so the adapter's vocabulary-miss error can never fire.
pub fn evaluate(question: &SynonymQuestion, model: &impl VectorModel) -> Outcome {
    let selected = if is_eligible(question, model) {
        best_option(question, model)
    } else {
        None
    };

    let label = classify(&question.answer, selected.as_deref());

    Outcome {
        question: question.question.clone(),
        expected: question.answer.clone(),
        selected,
        label,
    }
}

/// A question is eligible when its question word and at least one option are
/// in the vocabulary. Not every option needs a vector.
fn is_eligible(question: &SynonymQuestion, model: &impl VectorModel) -> bool {
    model.contains(&question.question)
        && question.options.iter().any(|option| model.contains(option))
}

/// Pick the in-vocabulary option most similar to the question word.
///
/// Options are scanned in dataset order with a strict-greater comparison
/// against an initial best score of zero: the first option reaching the
/// maximum wins ties, and options scoring at or below zero are never
/// selected. When every present option scores non-positive, no candidate is
/// returned at all.
fn best_option(question: &SynonymQuestion, model: &impl VectorModel) -> Option<String> {
    let mut best_score = 0.0_f32;
    let mut best: Option<&str> = None;

    for option in &question.options {
        if !model.contains(option) {
            continue;
        }

        let score = match model.similarity(&question.question, option) {
            Ok(score) => score,
            // Both words were confirmed present; a miss here is a
            // precondition violation in the adapter. Leave the option
            // unscored rather than abort the run.
            Err(_) => continue,
        };

        if score > best_score {
            best_score = score;
            best = Some(option.as_str());
        }
    }

    best.map(str::to_string)
}

fn classify(answer: &str, selected: Option<&str>) -> Label {
    match selected {
        Some(candidate) if candidate == answer => Label::Correct,
        Some(_) => Label::Wrong,
        None => Label::Guess,
    }
}
