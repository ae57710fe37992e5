use crate::models::subject::Course;
use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use rand::Rng;

/// Attempts per random space before giving up on it
const MAX_ATTEMPTS: usize = 100;

/// Generate a unique student id of the form `{COURSE}{YY}{YEAR}{NNN}`,
/// where `YY` is the 2-digit calendar year and `NNN` a zero-padded random
/// suffix. `is_taken` is probed for each candidate; on collision a new
/// suffix is rolled. The 3-digit space is bounded at `MAX_ATTEMPTS`, after
/// which a 6-digit space is tried before erroring out.
pub fn generate_student_id<F>(course: Course, year: u32, is_taken: F) -> Result<String>
where
    F: Fn(&str) -> bool,
{
    let yy = Utc::now().year() % 100;
    let mut rng = rand::rng();

    for _ in 0..MAX_ATTEMPTS {
        let candidate = format!(
            "{}{:02}{}{:03}",
            course.as_str(),
            yy,
            year,
            rng.random_range(0..1000)
        );
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }

    // The 3-digit space is saturated; widen the suffix
    for _ in 0..MAX_ATTEMPTS {
        let candidate = format!(
            "{}{:02}{}{:06}",
            course.as_str(),
            yy,
            year,
            rng.random_range(0..1_000_000)
        );
        if !is_taken(&candidate) {
            return Ok(candidate);
        }
    }

    bail!(
        "Exhausted student id space for {}{:02}{}",
        course.as_str(),
        yy,
        year
    )
}
