mod failures;
mod no_wait;
mod parallel;
