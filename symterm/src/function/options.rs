use crate::trig_mode::TrigMode;

/// Flags controlling how a [`Function`](super::Function) is evaluated.
///
/// A function carries its own options, which are always in effect. Options passed to
/// [`Function::evaluate_with`](super::Function::evaluate_with) are merged with them: a flag is on
/// if either side turns it on, and [`TrigMode::Degrees`] wins over [`TrigMode::Radians`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// The angle unit that trigonometric functions take their input in (and that inverse
    /// trigonometric functions return their output in).
    pub trig_mode: TrigMode,

    /// Transform the bindings with the function's preprocessor before solving the parameter.
    pub preprocess: bool,

    /// Transform the solved parameter with the function's prehandler before applying the
    /// function.
    pub prehandle: bool,

    /// Transform the final value with the function's postprocessor.
    pub postprocess: bool,
}

impl EvalOptions {
    /// Creates the default options: radians, with every hook disabled.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trig_mode(mut self, trig_mode: TrigMode) -> Self {
        self.trig_mode = trig_mode;
        self
    }

    pub fn with_preprocess(mut self, preprocess: bool) -> Self {
        self.preprocess = preprocess;
        self
    }

    pub fn with_prehandle(mut self, prehandle: bool) -> Self {
        self.prehandle = prehandle;
        self
    }

    pub fn with_postprocess(mut self, postprocess: bool) -> Self {
        self.postprocess = postprocess;
        self
    }

    /// Combines two sets of options.
    pub fn merge(self, other: EvalOptions) -> EvalOptions {
        let trig_mode = if self.trig_mode == TrigMode::Degrees || other.trig_mode == TrigMode::Degrees {
            TrigMode::Degrees
        } else {
            TrigMode::Radians
        };

        EvalOptions {
            trig_mode,
            preprocess: self.preprocess || other.preprocess,
            prehandle: self.prehandle || other.prehandle,
            postprocess: self.postprocess || other.postprocess,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn merge_turns_flags_on() {
        let own = EvalOptions::new().with_preprocess(true);
        let call = EvalOptions::new().with_trig_mode(TrigMode::Degrees).with_postprocess(true);
        assert_eq!(own.merge(call), EvalOptions {
            trig_mode: TrigMode::Degrees,
            preprocess: true,
            prehandle: false,
            postprocess: true,
        });
        assert_eq!(EvalOptions::new().merge(EvalOptions::new()), EvalOptions::default());
    }
}
