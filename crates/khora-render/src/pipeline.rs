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

//! The pass-graph render pipeline (§4.5): a set of passes linked by
//! prerequisite/effect edges, one of them marked final, executed in
//! dependency order against a target framebuffer.
//!
//! A pass here cannot borrow the [`Pipeline`] that owns it the way the
//! pass graph this is modeled on does, since that would alias the pass
//! list being iterated through `execute`. [`PassContext`] carries the
//! slice of the pass list's business a pass actually needs instead.

use std::collections::{BTreeMap, HashSet};

use khora_core::error::{EngineError, EngineResult};
use khora_core::renderer::api::FramebufferHandle;
use khora_core::renderer::traits::GraphicsDevice;

use crate::draw_command::DrawCommand;

/// Identifies one pass within a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassId(pub u32);

/// What a [`Pass`] is given to do its work, in place of a reference back to
/// the owning [`Pipeline`].
pub struct PassContext<'a> {
    /// This frame's accumulated draw commands, already filtered by nothing —
    /// a pass consults `DrawCommand::filter` itself to pick the ones it wants.
    pub draw_commands: &'a [DrawCommand],
    /// The pipeline's target framebuffer, if one has been set.
    pub target: Option<&'a FramebufferHandle>,
    /// The backend to issue GPU operations through.
    pub device: &'a dyn GraphicsDevice,
}

/// One stage of a render pipeline (§4.5).
pub trait Pass: std::fmt::Debug {
    /// This pass's identity within its pipeline.
    fn id(&self) -> PassId;

    /// Passes that must execute before this one.
    fn prerequisites(&self) -> &[PassId];
    fn prerequisites_mut(&mut self) -> &mut Vec<PassId>;

    /// Passes that depend on this one's output.
    fn effects(&self) -> &[PassId];
    fn effects_mut(&mut self) -> &mut Vec<PassId>;

    /// Whether this pass's output is the pipeline's final image.
    fn is_final(&self) -> bool;
    fn set_final(&mut self, is_final: bool);

    /// Runs this pass's work for the current frame.
    fn execute(&mut self, ctx: &PassContext) -> EngineResult<()>;

    /// Reallocates any resources this pass owns that scale with viewport size.
    fn resize(&mut self, device: &dyn GraphicsDevice, width: u32, height: u32) -> EngineResult<()>;
}

/// A pass-graph render pipeline (§4.5).
#[derive(Debug, Default)]
pub struct Pipeline {
    passes: BTreeMap<PassId, Box<dyn Pass>>,
    final_pass: Option<PassId>,
    target: Option<FramebufferHandle>,
    draw_commands: Vec<DrawCommand>,
    dirty: bool,
    plan: Vec<PassId>,
}

impl Pipeline {
    /// Creates an empty pipeline with no passes and no render target.
    pub fn new() -> Self {
        Self {
            passes: BTreeMap::new(),
            final_pass: None,
            target: None,
            draw_commands: Vec::new(),
            dirty: true,
            plan: Vec::new(),
        }
    }

    /// Sets (or replaces) the pipeline's target framebuffer.
    pub fn set_target(&mut self, target: FramebufferHandle) {
        self.target = Some(target);
    }

    /// The pipeline's current target framebuffer, if any.
    pub fn target(&self) -> Option<&FramebufferHandle> {
        self.target.as_ref()
    }

    /// Appends a draw command for this frame.
    pub fn add_draw_command(&mut self, command: DrawCommand) {
        self.draw_commands.push(command);
    }

    /// Appends several draw commands for this frame.
    pub fn add_draw_commands(&mut self, commands: impl IntoIterator<Item = DrawCommand>) {
        self.draw_commands.extend(commands);
    }

    /// This frame's draw commands so far.
    pub fn draw_commands(&self) -> &[DrawCommand] {
        &self.draw_commands
    }

    /// Adds `pass` to the pipeline, marking it final if it's the first pass.
    pub fn add_pass(&mut self, pass: Box<dyn Pass>) -> PassId {
        let id = pass.id();
        self.passes.insert(id, pass);
        if self.passes.len() == 1 {
            self.set_final_pass(id);
        }
        self.dirty = true;
        id
    }

    /// Removes pass `id`, rewiring its prerequisites directly to its effects
    /// so the remaining graph stays connected, and reassigning the final
    /// pass if `id` held that role.
    pub fn remove_pass(&mut self, id: PassId) {
        let Some(pass) = self.passes.get(&id) else {
            return;
        };
        let prerequisites = pass.prerequisites().to_vec();
        let effects = pass.effects().to_vec();

        for &prereq in &prerequisites {
            for &effect in &effects {
                self.add_prerequisite(effect, prereq);
                self.add_effect(prereq, effect);
            }
        }

        for pass in self.passes.values_mut() {
            pass.prerequisites_mut().retain(|&p| p != id);
            pass.effects_mut().retain(|&e| e != id);
        }

        let need_new_final = self.final_pass == Some(id);
        self.passes.remove(&id);

        if need_new_final {
            self.final_pass = None;
            if !self.passes.is_empty() {
                let terminals = self.terminal_passes();
                let next = terminals
                    .first()
                    .copied()
                    .or_else(|| self.passes.keys().next().copied());
                if let Some(next) = next {
                    self.set_final_pass(next);
                }
            }
        }

        self.dirty = true;
    }

    /// Looks up a pass by id.
    pub fn pass(&self, id: PassId) -> Option<&dyn Pass> {
        self.passes.get(&id).map(|p| p.as_ref())
    }

    /// Adds `prerequisite` to `pass`'s prerequisite list, if both exist and
    /// the edge isn't already present.
    pub fn add_prerequisite(&mut self, pass: PassId, prerequisite: PassId) {
        if !self.passes.contains_key(&prerequisite) {
            return;
        }
        let Some(p) = self.passes.get_mut(&pass) else {
            return;
        };
        let prereqs = p.prerequisites_mut();
        if !prereqs.contains(&prerequisite) {
            prereqs.push(prerequisite);
        }
        self.dirty = true;
    }

    /// Removes `prerequisite` from `pass`'s prerequisite list, unconditionally.
    pub fn remove_prerequisite(&mut self, pass: PassId, prerequisite: PassId) {
        let Some(p) = self.passes.get_mut(&pass) else {
            return;
        };
        p.prerequisites_mut().retain(|&id| id != prerequisite);
        self.dirty = true;
    }

    /// Adds `effect` to `pass`'s effect list, if both exist and the edge
    /// isn't already present.
    pub fn add_effect(&mut self, pass: PassId, effect: PassId) {
        if !self.passes.contains_key(&effect) {
            return;
        }
        let Some(p) = self.passes.get_mut(&pass) else {
            return;
        };
        let effects = p.effects_mut();
        if !effects.contains(&effect) {
            effects.push(effect);
        }
        self.dirty = true;
    }

    /// Removes `effect` from `pass`'s effect list, unconditionally.
    pub fn remove_effect(&mut self, pass: PassId, effect: PassId) {
        let Some(p) = self.passes.get_mut(&pass) else {
            return;
        };
        p.effects_mut().retain(|&id| id != effect);
        self.dirty = true;
    }

    /// Marks `id` as the pipeline's final output pass, clearing the flag on
    /// whichever pass previously held it.
    pub fn set_final_pass(&mut self, id: PassId) {
        if !self.passes.contains_key(&id) {
            return;
        }
        if let Some(previous) = self.final_pass {
            if let Some(pass) = self.passes.get_mut(&previous) {
                pass.set_final(false);
            }
        }
        if let Some(pass) = self.passes.get_mut(&id) {
            pass.set_final(true);
        }
        self.final_pass = Some(id);
    }

    /// Passes with no effects: nothing downstream depends on them.
    fn terminal_passes(&self) -> Vec<PassId> {
        self.passes
            .iter()
            .filter(|(_, pass)| pass.effects().is_empty())
            .map(|(&id, _)| id)
            .collect()
    }

    /// Builds an execution order by reverse-postorder DFS: a pass's
    /// prerequisites are always emitted before the pass itself. Walks from
    /// the final pass if one is set, otherwise from every terminal pass (or,
    /// failing that, every pass, to guarantee full coverage).
    fn build_plan(&self) -> Vec<PassId> {
        if self.passes.is_empty() {
            return Vec::new();
        }

        let mut visited = HashSet::new();
        let mut result = Vec::with_capacity(self.passes.len());

        fn visit(
            passes: &BTreeMap<PassId, Box<dyn Pass>>,
            current: PassId,
            visited: &mut HashSet<PassId>,
            result: &mut Vec<PassId>,
        ) {
            if visited.contains(&current) {
                return;
            }
            visited.insert(current);
            if let Some(pass) = passes.get(&current) {
                for &prereq in pass.prerequisites() {
                    if passes.contains_key(&prereq) {
                        visit(passes, prereq, visited, result);
                    }
                }
            }
            result.push(current);
        }

        if let Some(final_pass) = self.final_pass.filter(|id| self.passes.contains_key(id)) {
            visit(&self.passes, final_pass, &mut visited, &mut result);
        } else {
            let mut terminals = self.terminal_passes();
            if terminals.is_empty() {
                terminals = self.passes.keys().copied().collect();
            }
            for terminal in terminals {
                visit(&self.passes, terminal, &mut visited, &mut result);
            }
        }

        result
    }

    /// Rebuilds the execution plan if the graph changed since the last run,
    /// then executes every pass in plan order against `device`, clearing the
    /// draw-command buffer afterward. Fails with
    /// [`EngineError::PipelineNoRenderTarget`] if no target is set.
    pub fn execute(&mut self, device: &dyn GraphicsDevice) -> EngineResult<()> {
        if self.dirty {
            self.plan = self.build_plan();
            self.dirty = false;
        }

        if self.target.is_none() {
            return Err(EngineError::PipelineNoRenderTarget);
        }

        let plan = self.plan.clone();
        for id in plan {
            let draw_commands = self.draw_commands.clone();
            let target = self.target.clone();
            let ctx = PassContext {
                draw_commands: &draw_commands,
                target: target.as_ref(),
                device,
            };
            if let Some(pass) = self.passes.get_mut(&id) {
                pass.execute(&ctx)?;
            }
        }

        self.draw_commands.clear();
        Ok(())
    }

    /// Resizes the target framebuffer and every pass's own sized resources.
    /// A no-op if no target is set.
    pub fn resize(&mut self, device: &dyn GraphicsDevice, width: u32, height: u32) -> EngineResult<()> {
        let Some(target) = &self.target else {
            return Ok(());
        };
        device.resize_framebuffer(target, width, height)?;
        for pass in self.passes.values_mut() {
            pass.resize(device, width, height)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct StubPass {
        id: PassId,
        prerequisites: Vec<PassId>,
        effects: Vec<PassId>,
        is_final: bool,
    }

    impl StubPass {
        fn new(id: u32) -> Self {
            Self {
                id: PassId(id),
                prerequisites: Vec::new(),
                effects: Vec::new(),
                is_final: false,
            }
        }
    }

    impl Pass for StubPass {
        fn id(&self) -> PassId {
            self.id
        }
        fn prerequisites(&self) -> &[PassId] {
            &self.prerequisites
        }
        fn prerequisites_mut(&mut self) -> &mut Vec<PassId> {
            &mut self.prerequisites
        }
        fn effects(&self) -> &[PassId] {
            &self.effects
        }
        fn effects_mut(&mut self) -> &mut Vec<PassId> {
            &mut self.effects
        }
        fn is_final(&self) -> bool {
            self.is_final
        }
        fn set_final(&mut self, is_final: bool) {
            self.is_final = is_final;
        }
        fn execute(&mut self, _ctx: &PassContext) -> EngineResult<()> {
            Ok(())
        }
        fn resize(&mut self, _device: &dyn GraphicsDevice, _width: u32, _height: u32) -> EngineResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_pass_added_becomes_final() {
        let mut pipeline = Pipeline::new();
        pipeline.add_pass(Box::new(StubPass::new(0)));
        assert_eq!(pipeline.final_pass, Some(PassId(0)));
    }

    #[test]
    fn execute_without_target_fails() {
        let mut pipeline = Pipeline::new();
        pipeline.add_pass(Box::new(StubPass::new(0)));
        let device = crate::test_support::NullDevice;
        assert_eq!(pipeline.execute(&device), Err(EngineError::PipelineNoRenderTarget));
    }

    #[test]
    fn plan_visits_prerequisites_before_dependents() {
        let mut pipeline = Pipeline::new();
        pipeline.add_pass(Box::new(StubPass::new(0)));
        pipeline.add_pass(Box::new(StubPass::new(1)));
        pipeline.add_prerequisite(PassId(1), PassId(0));
        pipeline.set_final_pass(PassId(1));

        let plan = pipeline.build_plan();
        let pos0 = plan.iter().position(|&id| id == PassId(0)).unwrap();
        let pos1 = plan.iter().position(|&id| id == PassId(1)).unwrap();
        assert!(pos0 < pos1);
    }

    #[test]
    fn removing_a_pass_rewires_its_prerequisite_to_its_effect() {
        let mut pipeline = Pipeline::new();
        pipeline.add_pass(Box::new(StubPass::new(0)));
        pipeline.add_pass(Box::new(StubPass::new(1)));
        pipeline.add_pass(Box::new(StubPass::new(2)));
        pipeline.add_prerequisite(PassId(1), PassId(0));
        pipeline.add_effect(PassId(1), PassId(2));
        pipeline.add_prerequisite(PassId(2), PassId(1));

        pipeline.remove_pass(PassId(1));

        assert!(pipeline.passes[&PassId(2)].prerequisites().contains(&PassId(0)));
        assert!(pipeline.passes[&PassId(0)].effects().contains(&PassId(2)));
    }

    #[test]
    fn removing_the_final_pass_promotes_a_terminal_pass() {
        let mut pipeline = Pipeline::new();
        pipeline.add_pass(Box::new(StubPass::new(0)));
        pipeline.add_pass(Box::new(StubPass::new(1)));
        pipeline.add_prerequisite(PassId(1), PassId(0));
        pipeline.set_final_pass(PassId(1));

        pipeline.remove_pass(PassId(1));

        assert_eq!(pipeline.final_pass, Some(PassId(0)));
        assert!(pipeline.passes[&PassId(0)].is_final());
    }
}
