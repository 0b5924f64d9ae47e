/// Runnable demonstrations of the reactor equations driven by a simple explicit integrator
pub mod reactor_examples;
