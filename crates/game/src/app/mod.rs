mod bootstrap;
mod hud;
mod loop_runner;
mod scene;

pub(crate) use loop_runner::run;
