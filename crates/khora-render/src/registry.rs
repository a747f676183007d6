// Copyright 2025 eraflo
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

//! A `Camera` component only carries an opaque [`PipelineId`] (§3) rather
//! than owning its pipeline directly, to break the cycle between a camera
//! and the render systems that read it. [`PipelineRegistry`] is where that
//! id actually resolves to a [`Pipeline`].

use std::collections::HashMap;

use khora_data::ecs::components::PipelineId;

use crate::pipeline::Pipeline;

/// Owns every pipeline in the application, keyed by the id a `Camera`
/// component carries.
#[derive(Debug, Default)]
pub struct PipelineRegistry {
    pipelines: HashMap<PipelineId, Pipeline>,
    next_id: u32,
}

impl PipelineRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            pipelines: HashMap::new(),
            next_id: 0,
        }
    }

    /// Registers `pipeline`, returning the id a camera should store to
    /// reference it.
    pub fn insert(&mut self, pipeline: Pipeline) -> PipelineId {
        let id = PipelineId(self.next_id);
        self.next_id += 1;
        self.pipelines.insert(id, pipeline);
        id
    }

    /// Removes and returns the pipeline at `id`, if any.
    pub fn remove(&mut self, id: PipelineId) -> Option<Pipeline> {
        self.pipelines.remove(&id)
    }

    /// Borrows the pipeline at `id`.
    pub fn get(&self, id: PipelineId) -> Option<&Pipeline> {
        self.pipelines.get(&id)
    }

    /// Mutably borrows the pipeline at `id`.
    pub fn get_mut(&mut self, id: PipelineId) -> Option<&mut Pipeline> {
        self.pipelines.get_mut(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserted_pipelines_are_addressable_by_the_returned_id() {
        let mut registry = PipelineRegistry::new();
        let id = registry.insert(Pipeline::new());
        assert!(registry.get(id).is_some());
        assert!(registry.remove(id).is_some());
        assert!(registry.get(id).is_none());
    }
}
