mod pipeline;
mod runner;


pub(crate) use runner::run_plan;
