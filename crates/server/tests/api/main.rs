mod analyze;
mod helpers;
