//! Analysis modes and prompt construction.
//!
//! Each mode maps to a fixed instruction template; the submitted code is
//! interpolated verbatim into a fenced block inside it. Backtick fences that
//! appear inside the submitted code are not escaped, so such code can
//! terminate the block early from the model's point of view. Known
//! limitation, kept as-is.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of analysis to request from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisMode {
    /// Combined audit: bugs, style, performance, and an explanation
    #[default]
    FullAudit,
    /// Bug and exception hunting only
    BugsOnly,
    /// Style-convention compliance only
    StyleCheck,
    /// Plain-language explanation of what the code does
    Explain,
}

impl AnalysisMode {
    /// Human-readable label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::FullAudit => "Full audit",
            AnalysisMode::BugsOnly => "Bugs only",
            AnalysisMode::StyleCheck => "Style check",
            AnalysisMode::Explain => "Explanation",
        }
    }

    /// Lenient label lookup. Unrecognized labels map to the combined audit;
    /// this is the one deliberate default, everything else is matched
    /// exhaustively.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "full-audit" | "full audit" | "audit" => AnalysisMode::FullAudit,
            "bugs-only" | "bugs only" | "bugs" => AnalysisMode::BugsOnly,
            "style-check" | "style check" | "style" => AnalysisMode::StyleCheck,
            "explain" | "explanation" => AnalysisMode::Explain,
            _ => AnalysisMode::FullAudit,
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisMode::FullAudit => write!(f, "full-audit"),
            AnalysisMode::BugsOnly => write!(f, "bugs-only"),
            AnalysisMode::StyleCheck => write!(f, "style-check"),
            AnalysisMode::Explain => write!(f, "explain"),
        }
    }
}

/// A fully rendered prompt, ready to send as the sole user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt(String);

impl RenderedPrompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Build the prompt for a mode by interpolating `code` into the mode's
/// instruction template.
pub fn render(mode: AnalysisMode, code: &str) -> RenderedPrompt {
    let text = match mode {
        AnalysisMode::FullAudit => format!(
            "Perform a full audit of the following code:\n\
             \n\
             ```\n\
             {code}\n\
             ```\n\
             \n\
             Analyze it along these axes:\n\
             1. **Bugs**: potential errors, exceptions, and logic problems\n\
             2. **Style**: compliance with the language's style conventions \
             (naming, spacing, line length)\n\
             3. **Performance**: improvements to efficiency\n\
             4. **Explanation**: a short description of what the code does\n\
             \n\
             Structure the answer by section, with examples and recommendations."
        ),
        AnalysisMode::BugsOnly => format!(
            "Find every potential error and bug in this code:\n\
             \n\
             ```\n\
             {code}\n\
             ```\n\
             \n\
             Report:\n\
             - Syntax errors\n\
             - Logic errors\n\
             - Potential exceptions\n\
             - Data type problems\n\
             - Anything else that could make it crash\n\
             \n\
             Suggest a fix for each finding."
        ),
        AnalysisMode::StyleCheck => format!(
            "Check this code against its language's style conventions:\n\
             \n\
             ```\n\
             {code}\n\
             ```\n\
             \n\
             Check:\n\
             - Naming of variables, functions, and classes\n\
             - Indentation and whitespace\n\
             - Line length\n\
             - Imports\n\
             - Comments and documentation\n\
             - Other stylistic aspects\n\
             \n\
             Show a corrected version for each violation."
        ),
        AnalysisMode::Explain => format!(
            "Explain in detail what this code does:\n\
             \n\
             ```\n\
             {code}\n\
             ```\n\
             \n\
             Describe:\n\
             - Its overall goal and purpose\n\
             - How each part works\n\
             - The algorithms and approaches it uses\n\
             - External dependencies, if any\n\
             - Typical use cases\n\
             \n\
             Explain in plain language, as if for a beginner."
        ),
    };

    RenderedPrompt(text)
}
