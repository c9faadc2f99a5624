//! End-to-end material scenarios
//!
//! Exercises the public API the way a renderer drives it: build materials,
//! bind inputs, walk references, recompile and clear dirty state.

mod renderer_pass;
