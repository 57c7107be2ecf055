// Application layer: input collection, batch runs and report rendering around the engine.

pub mod batch;
pub mod input;
pub mod report;
