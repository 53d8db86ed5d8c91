//! Read-only options consulted while a design is parsed and rendered.

/// How dependency cycles between combinational statements are handled.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum CycleDetection {
    /// Only reject a dependent listed among its own inputs. Everything else
    /// is evaluated to a fixpoint in source order, bounded by the settle
    /// limit.
    #[default]
    SelfReference,
    /// Reject every cycle at initialization and evaluate in dependency
    /// order.
    Full,
}

impl CycleDetection {
    /// Parse the value of `--cycles=`.
    pub fn from_flag(value: &str) -> Option<Self> {
        match value {
            "self" | "self-reference" => Some(CycleDetection::SelfReference),
            "full" => Some(CycleDetection::Full),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Settings {
    /// Show comments that carry no `+`/`-` flag.
    pub simulation_comments: bool,
    /// Emit `;` tokens at the end of rendered statements.
    pub output_semicolons: bool,
    pub cycle_detection: CycleDetection,
    /// Deepest allowed chain of submodule instantiations.
    pub max_submodule_depth: u32,
    /// Maximum re-evaluation passes. `None` uses one more than the number
    /// of stored expressions.
    pub settle_limit: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            simulation_comments: false,
            output_semicolons: true,
            cycle_detection: CycleDetection::SelfReference,
            max_submodule_depth: 32,
            settle_limit: None,
        }
    }
}

impl Settings {
    #[must_use]
    pub fn with_simulation_comments(mut self, on: bool) -> Self {
        self.simulation_comments = on;
        self
    }

    #[must_use]
    pub fn with_cycle_detection(mut self, cycle_detection: CycleDetection) -> Self {
        self.cycle_detection = cycle_detection;
        self
    }

    #[must_use]
    pub fn with_max_submodule_depth(mut self, depth: u32) -> Self {
        self.max_submodule_depth = depth;
        self
    }

    #[must_use]
    pub fn with_settle_limit(mut self, limit: usize) -> Self {
        self.settle_limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests;
