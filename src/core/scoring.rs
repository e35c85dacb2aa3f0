// keyword based contract scoring
// crude on purpose: substring matches with fixed weights

use crate::core::analysis::{Analysis, RiskScore};

struct Keyword {
    word: &'static str,
    weight: i32,
    message: &'static str,
}

const RISKY: &[Keyword] = &[
    Keyword {
        word: "confidential",
        weight: 2,
        message: "Confidentiality clause is too restrictive",
    },
    Keyword {
        word: "non-compete",
        weight: 3,
        message: "Non-compete clause is overly broad",
    },
    Keyword {
        word: "termination",
        weight: 2,
        message: "Termination terms are unclear",
    },
    Keyword {
        word: "indemnification",
        weight: 3,
        message: "Indemnification clause is too one-sided",
    },
    Keyword {
        word: "liability",
        weight: 3,
        message: "Liability clause is overly restrictive",
    },
    Keyword {
        word: "arbitration",
        weight: 2,
        message: "Arbitration clause limits legal recourse",
    },
];

const POSITIVE: &[Keyword] = &[
    Keyword {
        word: "mutual",
        weight: -1,
        message: "Mutual agreement detected",
    },
    Keyword {
        word: "fair",
        weight: -1,
        message: "Fair terms detected",
    },
    Keyword {
        word: "reasonable",
        weight: -1,
        message: "Reasonable terms detected",
    },
];

const LONG_SENTENCE_WORDS: usize = 50;
const EXCERPT_CHARS: usize = 100;

const HIGH_THRESHOLD: i32 = 5;
const MEDIUM_THRESHOLD: i32 = 3;

pub fn analyze_contract(text: &str) -> Analysis {
    let lower = text.to_lowercase();
    let mut points = Vec::new();
    let mut total = 0;

    for kw in RISKY.iter().chain(POSITIVE) {
        if lower.contains(kw.word) {
            points.push(kw.message.to_string());
            total += kw.weight;
        }
    }

    // long sentences that also touch a risky topic
    for sentence in text.split('.') {
        if sentence.split_whitespace().count() <= LONG_SENTENCE_WORDS {
            continue;
        }
        let sentence_lower = sentence.to_lowercase();
        if RISKY.iter().any(|kw| sentence_lower.contains(kw.word)) {
            let excerpt: String = sentence.chars().take(EXCERPT_CHARS).collect();
            points.push(format!("Long and complex sentence: {excerpt}..."));
            total += 1;
        }
    }

    let (risk_score, verdict) = if total >= HIGH_THRESHOLD {
        (RiskScore::High, false)
    } else if total >= MEDIUM_THRESHOLD {
        (RiskScore::Medium, false)
    } else {
        (RiskScore::Low, true)
    };

    if points.is_empty() {
        points.push("No major risks identified".to_string());
    }

    Analysis {
        risk_score,
        crucial_points: points,
        verdict,
    }
}
