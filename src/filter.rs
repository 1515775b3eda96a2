//! Launch filtering predicates
//!
//! Pure, stateless predicates over already-materialized `Launch` records.
//! All criteria are optional and combine conjunctively.

use chrono::NaiveDate;

use crate::data::Launch;

/// Filter criteria for a list of launches
#[derive(Debug, Clone, Default)]
pub struct LaunchFilter {
    /// Rocket identifier the launch must have flown on
    pub rocket: Option<String>,
    /// Launchpad identifier the launch must have flown from
    pub launchpad: Option<String>,
    /// Required success outcome; `Some(false)` matches only known failures
    pub success: Option<bool>,
    /// Whether the launch must (or must not) be upcoming
    pub upcoming: Option<bool>,
    /// Earliest launch day (inclusive, on `date_utc`)
    pub after: Option<NaiveDate>,
    /// Latest launch day (inclusive, on `date_utc`)
    pub before: Option<NaiveDate>,
}

impl LaunchFilter {
    /// True iff the launch satisfies every set criterion
    ///
    /// A launch whose `date_utc` does not parse is excluded by any date
    /// criterion.
    pub fn matches(&self, launch: &Launch) -> bool {
        if let Some(rocket) = &self.rocket {
            if &launch.rocket != rocket {
                return false;
            }
        }
        if let Some(launchpad) = &self.launchpad {
            if &launch.launchpad != launchpad {
                return false;
            }
        }
        if let Some(success) = self.success {
            if launch.success != Some(success) {
                return false;
            }
        }
        if let Some(upcoming) = self.upcoming {
            if launch.upcoming != upcoming {
                return false;
            }
        }
        if self.after.is_some() || self.before.is_some() {
            let Some(day) = launch.date() else {
                return false;
            };
            if self.after.is_some_and(|after| day < after) {
                return false;
            }
            if self.before.is_some_and(|before| day > before) {
                return false;
            }
        }
        true
    }

    /// Keeps only the launches matching the filter, preserving order
    pub fn apply(&self, launches: Vec<Launch>) -> Vec<Launch> {
        launches.into_iter().filter(|l| self.matches(l)).collect()
    }
}
