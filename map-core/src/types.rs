/// Index of a sample in the parameter sweep.
///
/// Sample `i` corresponds to `r = min + i / accuracy`, so the sweep is
/// driven by an integer counter and never accumulates a floating-point step.
pub type SampleIndex = u64;

/// Integer display coordinate of a diagram point.
///
/// `x` grows to the right with `r`, `y` grows upward with the attractor value.
/// Both are relative to the plot origin, not to the window.
pub type ScreenPoint = glam::IVec2;
