//! Ordered literal-to-payload dispatch with a default arm.

use std::fmt::Write;

/// One `(discriminant, payload)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchArm {
    pub discriminant: String,
    pub payload: String,
}

/// Arms are tried in order; `fallback` applies when none matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub arms: Vec<DispatchArm>,
    pub fallback: String,
}

impl Dispatch {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            arms: Vec::new(),
            fallback: fallback.into(),
        }
    }

    pub fn arm(&mut self, discriminant: impl Into<String>, payload: impl Into<String>) {
        self.arms.push(DispatchArm {
            discriminant: discriminant.into(),
            payload: payload.into(),
        });
    }

    /// Render as a conditional type chain over `subject`, one arm per line.
    ///
    /// Exact equality goes through the `Is` helper so that a wider query type
    /// (plain `string`, a union) never selects an arm.
    pub fn render(&self, subject: &str) -> String {
        let mut out = String::new();
        for arm in &self.arms {
            let _ = writeln!(
                out,
                "  Is<{subject}, {}> extends true ? {} :",
                arm.discriminant, arm.payload
            );
        }
        let _ = write!(out, "  {}", self.fallback);
        out
    }
}
