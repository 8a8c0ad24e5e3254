//! Lexicon scorer producing a compound polarity for news text.
//!
//! Each word found in [`LEXICON`] contributes its valence (roughly `-4.0` to
//! `4.0`). A negator within the three preceding words flips and damps the
//! valence, a booster or dampener directly before it nudges the magnitude,
//! and a contrastive "but" halves what came before it and strengthens what
//! follows. The summed valence is normalized into `[-1.0, 1.0]` with
//! `x / sqrt(x² + 15)`.

use brandpulse_core::SentimentLabel;

/// Compound score at or above which text is `Positive`.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound score at or below which text is `Negative`.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

const NORMALIZATION_ALPHA: f64 = 15.0;
const NEGATION_SCALAR: f64 = -0.74;
const BOOSTER_INCREMENT: f64 = 0.293;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 3;
const NEGATION_WINDOW: usize = 3;

/// Word valences. Keys are lowercase single words.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 2.7),
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("best", 3.2),
    ("better", 1.9),
    ("love", 3.2),
    ("loved", 2.9),
    ("loves", 2.7),
    ("like", 1.5),
    ("happy", 2.7),
    ("win", 2.8),
    ("wins", 2.7),
    ("won", 2.7),
    ("success", 2.7),
    ("successful", 2.8),
    ("strong", 2.3),
    ("growth", 1.6),
    ("gain", 2.4),
    ("gains", 1.4),
    ("profit", 1.9),
    ("record", 0.9),
    ("surge", 1.4),
    ("soar", 2.0),
    ("soars", 2.0),
    ("boost", 1.7),
    ("boosts", 1.3),
    ("innovative", 2.2),
    ("praise", 2.6),
    ("praised", 2.2),
    ("popular", 1.8),
    ("positive", 2.6),
    ("impressive", 2.3),
    ("recommend", 1.5),
    ("benefit", 2.0),
    ("improve", 1.9),
    ("improved", 2.1),
    ("reliable", 1.9),
    ("safe", 1.9),
    ("thrilled", 2.7),
    ("celebrate", 2.7),
    ("award", 2.5),
    ("winner", 2.8),
    ("optimistic", 1.3),
    // Negative
    ("bad", -2.5),
    ("worse", -2.1),
    ("worst", -3.1),
    ("terrible", -2.1),
    ("awful", -2.0),
    ("hate", -2.7),
    ("poor", -2.1),
    ("fail", -2.5),
    ("fails", -2.0),
    ("failed", -2.3),
    ("failure", -2.3),
    ("loss", -1.3),
    ("losses", -1.7),
    ("lose", -1.6),
    ("decline", -1.1),
    ("drop", -1.1),
    ("plunge", -1.8),
    ("crash", -1.7),
    ("lawsuit", -1.3),
    ("sued", -1.9),
    ("fraud", -2.8),
    ("scandal", -1.9),
    ("recall", -1.3),
    ("breach", -1.8),
    ("hack", -1.6),
    ("layoffs", -2.1),
    ("fired", -2.6),
    ("fine", -0.6),
    ("fined", -1.7),
    ("ban", -2.6),
    ("banned", -2.0),
    ("problem", -1.7),
    ("problems", -1.7),
    ("crisis", -3.1),
    ("risk", -1.1),
    ("warning", -1.4),
    ("concern", -1.3),
    ("concerns", -1.1),
    ("angry", -2.3),
    ("disappointing", -2.2),
    ("negative", -2.7),
    ("weak", -1.9),
    ("dangerous", -2.1),
    ("outage", -1.6),
    ("criticism", -1.9),
    ("criticized", -1.9),
    ("boycott", -1.3),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "without", "cannot",
    "can't", "won't", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't", "weren't",
    "hasn't", "haven't", "hardly", "rarely",
];

const BOOSTERS: &[&str] = &[
    "very",
    "extremely",
    "really",
    "incredibly",
    "highly",
    "hugely",
    "so",
    "totally",
    "absolutely",
    "remarkably",
];

const DAMPENERS: &[&str] = &[
    "slightly",
    "somewhat",
    "barely",
    "marginally",
    "kinda",
    "partly",
    "little",
];

fn valence(word: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|(lex_word, _)| *lex_word == word)
        .map(|&(_, v)| v)
}

fn normalize_token(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphabetic())
        .to_lowercase()
        .replace('\u{2019}', "'")
}

/// Compound polarity of `text` in `[-1.0, 1.0]`. Empty or unknown text scores `0.0`.
#[must_use]
pub fn compound_score(text: &str) -> f64 {
    let tokens: Vec<String> = text.split_whitespace().map(normalize_token).collect();
    let but_index = tokens.iter().position(|t| t == "but");

    let mut sum = 0.0_f64;
    for (i, token) in tokens.iter().enumerate() {
        let Some(mut v) = valence(token) else {
            continue;
        };

        if i > 0 {
            let prev = tokens[i - 1].as_str();
            if BOOSTERS.contains(&prev) {
                v += BOOSTER_INCREMENT.copysign(v);
            } else if DAMPENERS.contains(&prev) {
                v -= BOOSTER_INCREMENT.copysign(v);
            }
        }

        let window_start = i.saturating_sub(NEGATION_WINDOW);
        if tokens[window_start..i]
            .iter()
            .any(|t| NEGATORS.contains(&t.as_str()))
        {
            v *= NEGATION_SCALAR;
        }

        if let Some(b) = but_index {
            if i < b {
                v *= 0.5;
            } else if i > b {
                v *= 1.5;
            }
        }

        sum += v;
    }

    if sum != 0.0 {
        let bangs = text.matches('!').count().min(MAX_EXCLAMATIONS);
        #[allow(clippy::cast_precision_loss)]
        let emphasis = bangs as f64 * EXCLAMATION_INCREMENT;
        sum += emphasis.copysign(sum);
    }

    normalize(sum)
}

fn normalize(sum: f64) -> f64 {
    (sum / (sum * sum + NORMALIZATION_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

/// Label for a compound score: `>= 0.05` Positive, `<= -0.05` Negative,
/// Neutral in between.
#[must_use]
pub fn label_for_compound(score: f64) -> SentimentLabel {
    if score >= POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score <= NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}
