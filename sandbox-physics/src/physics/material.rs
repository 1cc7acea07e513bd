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
//! Material coefficient mixing

/// How two bodies' coefficients are merged into one for a contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombineRule {
    /// Arithmetic mean
    Average,
    /// Smaller of the two
    Min,
    /// Larger of the two
    Max,
    /// Product of the two
    Multiply,
    /// Ignore both bodies and use a constant
    Fixed(f32),
}

impl CombineRule {
    /// Merge two coefficients
    ///
    /// # Examples
    ///
    /// ```
    /// use sandbox_physics::physics::CombineRule;
    ///
    /// assert_eq!(CombineRule::Min.combine(0.2, 0.8), 0.2);
    /// assert_eq!(CombineRule::Average.combine(0.25, 0.75), 0.5);
    /// assert_eq!(CombineRule::Fixed(0.5).combine(0.2, 0.8), 0.5);
    /// ```
    pub fn combine(self, a: f32, b: f32) -> f32 {
        match self {
            CombineRule::Average => (a + b) * 0.5,
            CombineRule::Min => a.min(b),
            CombineRule::Max => a.max(b),
            CombineRule::Multiply => a * b,
            CombineRule::Fixed(value) => value,
        }
    }
}
