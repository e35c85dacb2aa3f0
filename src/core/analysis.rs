// what the analysis service sends back

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskScore {
    Low,
    Medium,
    High,
}

impl RiskScore {
    /// Capitalised form shown in the ui and the report.
    pub fn label(self) -> &'static str {
        match self {
            RiskScore::Low => "Low",
            RiskScore::Medium => "Medium",
            RiskScore::High => "High",
        }
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub risk_score: RiskScore,
    #[serde(default)]
    pub crucial_points: Vec<String>,
    pub verdict: bool,
}

impl Analysis {
    pub fn verdict_label(&self) -> &'static str {
        if self.verdict {
            "Safe to proceed"
        } else {
            "Not recommended"
        }
    }

    /// Plain text report, the same values the ui displays.
    pub fn report(&self) -> String {
        let mut out = format!("Risk Score: {}\nCrucial Points:\n", self.risk_score.label());
        for point in &self.crucial_points {
            out.push_str(point);
            out.push('\n');
        }
        out.push_str(&format!("Final Verdict: {}\n", self.verdict_label()));
        out
    }

    /// The wire form, as the service sends it.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

// `{ "analysis": {...} }`, plus the extracted text on /upload
#[derive(Debug, Deserialize)]
pub(crate) struct AnalysisEnvelope {
    pub analysis: Option<Analysis>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
