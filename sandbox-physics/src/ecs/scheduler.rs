// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Staged system scheduler
//!
//! Systems are grouped into stages that execute in ascending order. Within a
//! stage, systems run in the order they were added, so a tick is fully
//! deterministic.

use crate::ecs::System;
use crate::ecs::World;

/// Stage identifier for grouping systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StageId(pub usize);

impl StageId {
    /// Create a new stage ID
    pub fn new(id: usize) -> Self {
        StageId(id)
    }
}

/// Pre-defined stages for a sandbox tick
pub mod stages {
    use super::StageId;

    /// Integration and collision resolution
    pub const PHYSICS: StageId = StageId(0);

    /// Systems that read the settled transforms (sprite bounds, culling)
    pub const POST_PHYSICS: StageId = StageId(1);
}

/// A system with metadata for scheduling
struct ScheduledSystem {
    system: Box<dyn System>,
    stage: StageId,
}

/// Runs registered systems stage by stage
///
/// # Examples
///
/// ```
/// use sandbox_physics::ecs::scheduler::{Scheduler, stages};
/// use sandbox_physics::ecs::{World, System};
///
/// struct MySystem;
/// impl System for MySystem {
///     fn run(&mut self, _world: &mut World) {}
/// }
///
/// let mut scheduler = Scheduler::new();
/// scheduler.add_system(MySystem, stages::PHYSICS);
/// scheduler.run(&mut World::new());
/// ```
pub struct Scheduler {
    systems: Vec<ScheduledSystem>,
}

impl Scheduler {
    /// Create a new scheduler
    pub fn new() -> Self {
        Scheduler {
            systems: Vec::new(),
        }
    }

    /// Add a system to a specific stage
    pub fn add_system<S: System + 'static>(&mut self, system: S, stage: StageId) {
        self.systems.push(ScheduledSystem {
            system: Box::new(system),
            stage,
        });
        // Stable sort keeps insertion order within a stage
        self.systems.sort_by_key(|s| s.stage);
    }

    /// Get the number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Names of the registered systems in execution order
    pub fn system_names(&self) -> Vec<&str> {
        self.systems.iter().map(|s| s.system.name()).collect()
    }

    /// Execute every system once, in stage order
    pub fn run(&mut self, world: &mut World) {
        for scheduled in &mut self.systems {
            log::trace!("running system {} (stage {})", scheduled.system.name(), scheduled.stage.0);
            scheduled.system.run(world);
        }
    }

    /// Clear all systems from the scheduler
    pub fn clear(&mut self) {
        self.systems.clear();
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recorder {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn new(name: &str, log: &Arc<Mutex<Vec<String>>>) -> Self {
            Recorder {
                name: name.to_string(),
                log: Arc::clone(log),
            }
        }
    }

    impl System for Recorder {
        fn run(&mut self, _world: &mut World) {
            self.log.lock().unwrap().push(self.name.clone());
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_scheduler_creation() {
        let scheduler = Scheduler::new();
        assert_eq!(scheduler.system_count(), 0);
    }

    #[test]
    fn test_stage_ordering() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Recorder::new("late", &log), stages::POST_PHYSICS);
        scheduler.add_system(Recorder::new("early", &log), stages::PHYSICS);
        scheduler.add_system(Recorder::new("last", &log), StageId::new(5));

        scheduler.run(&mut World::new());

        assert_eq!(*log.lock().unwrap(), vec!["early", "late", "last"]);
        assert_eq!(scheduler.system_names(), vec!["early", "late", "last"]);
    }

    #[test]
    fn test_insertion_order_within_stage() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Recorder::new("a", &log), stages::PHYSICS);
        scheduler.add_system(Recorder::new("b", &log), stages::PHYSICS);
        scheduler.add_system(Recorder::new("c", &log), stages::PHYSICS);

        scheduler.run(&mut World::new());

        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_scheduler() {
        let mut scheduler = Scheduler::new();
        let mut world = World::new();
        scheduler.run(&mut world);
    }

    #[test]
    fn test_clear_scheduler() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut scheduler = Scheduler::new();
        scheduler.add_system(Recorder::new("test", &log), stages::PHYSICS);
        assert_eq!(scheduler.system_count(), 1);

        scheduler.clear();
        assert_eq!(scheduler.system_count(), 0);
    }
}
