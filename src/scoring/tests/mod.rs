mod aggregate;
mod cohort;
mod common;
