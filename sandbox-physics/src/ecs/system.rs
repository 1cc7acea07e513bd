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
//! System trait
//!
//! Systems contain the logic that operates on entities and components.
//! Ordering between systems is handled by the [`Scheduler`](crate::ecs::scheduler::Scheduler).

use crate::ecs::World;

/// Trait for systems that operate on the ECS world
pub trait System: Send + Sync {
    /// Execute the system on the world
    fn run(&mut self, world: &mut World);

    /// Get the name of this system for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        runs: usize,
    }

    impl System for Counter {
        fn run(&mut self, _world: &mut World) {
            self.runs += 1;
        }
    }

    #[test]
    fn test_default_name_is_type_name() {
        let system = Counter { runs: 0 };
        assert!(system.name().ends_with("Counter"));
    }

    #[test]
    fn test_run_mutates_system_state() {
        let mut system = Counter { runs: 0 };
        let mut world = World::new();
        system.run(&mut world);
        system.run(&mut world);
        assert_eq!(system.runs, 2);
    }
}
