mod common;
mod convergence;
mod deadband;
mod faults;
