//! Version router.
//!
//! Computes the ordered list of versions to traverse for a migrate, rollback
//! or update request. Routing is a pure function of the database's current
//! version, the versions that have files, and the request.

use crate::error::{CoreError, CoreResult};
use crate::version::{DbVersion, Version, UNINITIALIZED};
use std::collections::BTreeSet;
use std::fmt;

/// What the caller asked for. `None` selects the default target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Move up; defaults to one version above current
    Migrate(Option<DbVersion>),
    /// Move down; defaults to one version below current
    Rollback(Option<DbVersion>),
    /// Move to the target, or the latest known version, in either direction
    Update(Option<DbVersion>),
}

/// Direction of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Apply forward statements in ascending order
    Up,
    /// Apply reverse statements in descending order
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Ordered versions to traverse, with the database version before and after
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    direction: Direction,
    from: DbVersion,
    to: DbVersion,
    versions: Vec<Version>,
}

impl Route {
    fn empty(direction: Direction, current: DbVersion) -> Self {
        Self {
            direction,
            from: current,
            to: current,
            versions: Vec::new(),
        }
    }

    /// Direction of travel
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Database version before the route runs
    pub fn from(&self) -> DbVersion {
        self.from
    }

    /// Database version after the route runs
    pub fn to(&self) -> DbVersion {
        self.to
    }

    /// Versions in the order they are applied
    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    /// True when nothing needs to run
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// The route that undoes this one
    pub fn reversed(&self) -> Route {
        Route {
            direction: match self.direction {
                Direction::Up => Direction::Down,
                Direction::Down => Direction::Up,
            },
            from: self.to,
            to: self.from,
            versions: self.versions.iter().rev().copied().collect(),
        }
    }
}

/// Compute the route for a request.
pub fn plan(current: DbVersion, known: &BTreeSet<Version>, request: Request) -> CoreResult<Route> {
    match request {
        Request::Migrate(target) => plan_migrate(current, known, target.unwrap_or(current + 1)),
        Request::Rollback(target) => plan_rollback(current, known, target.unwrap_or(current - 1)),
        Request::Update(target) => {
            let target = match target.or_else(|| known.last().map(|v| DbVersion::from(*v))) {
                Some(t) => t,
                None => return Ok(Route::empty(Direction::Up, current)),
            };
            if target >= current {
                plan_migrate(current, known, target)
            } else {
                plan_rollback(current, known, target)
            }
        }
    }
}

fn plan_migrate(
    current: DbVersion,
    known: &BTreeSet<Version>,
    target: DbVersion,
) -> CoreResult<Route> {
    if target < current {
        return Err(CoreError::InvalidMigration { current, target });
    }
    if target == current {
        return Ok(Route::empty(Direction::Up, current));
    }
    let versions = collect_known(known, current + 1, target)?;
    Ok(Route {
        direction: Direction::Up,
        from: current,
        to: target,
        versions,
    })
}

fn plan_rollback(
    current: DbVersion,
    known: &BTreeSet<Version>,
    target: DbVersion,
) -> CoreResult<Route> {
    let invalid = |reason: &str| CoreError::InvalidRollback {
        current,
        target,
        reason: reason.to_string(),
    };
    if target > current {
        return Err(invalid("cannot rollback to a higher version"));
    }
    if current <= UNINITIALIZED {
        return Err(invalid("database has no applied migrations"));
    }
    if target < UNINITIALIZED {
        return Err(invalid("target is below the uninitialized state"));
    }
    if target == current {
        return Ok(Route::empty(Direction::Down, current));
    }
    let mut versions = collect_known(known, target + 1, current)?;
    versions.reverse();
    Ok(Route {
        direction: Direction::Down,
        from: current,
        to: target,
        versions,
    })
}

/// Ascending versions in `low..=high`, failing on the first one without a file
fn collect_known(
    known: &BTreeSet<Version>,
    low: DbVersion,
    high: DbVersion,
) -> CoreResult<Vec<Version>> {
    (low..=high)
        .map(|v| {
            let version = Version::try_from(v).map_err(|_| CoreError::InvalidMigration {
                current: low - 1,
                target: high,
            })?;
            if known.contains(&version) {
                Ok(version)
            } else {
                Err(CoreError::MissingMigrationFile { version })
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "router_test.rs"]
mod tests;
