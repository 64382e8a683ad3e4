// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::DisplayNode;

/// Identifier of a scene in a [`SceneStore`].
///
/// Ids are never reused within one store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SceneId(pub u32);

/// Ordered collection of scenes with one optional active scene.
#[derive(Clone, Debug, Default)]
pub struct SceneStore {
    scenes: Vec<(SceneId, DisplayNode)>,
    active: Option<SceneId>,
    next_id: u32,
}

impl SceneStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scene and returns its id. The active scene is unchanged.
    pub fn add(&mut self, scene: DisplayNode) -> SceneId {
        let id = SceneId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.scenes.push((id, scene));
        id
    }

    /// Removes a scene.
    ///
    /// If it was active, the scene that took its place in the order (or the
    /// new last scene) becomes active.
    pub fn remove(&mut self, id: SceneId) -> Option<DisplayNode> {
        let index = self.index_of(id)?;
        let (_, scene) = self.scenes.remove(index);
        if self.active == Some(id) {
            self.active = self
                .scenes
                .get(index)
                .or_else(|| self.scenes.last())
                .map(|(id, _)| *id);
        }
        Some(scene)
    }

    /// Makes `id` the active scene. Returns `false` if it is not stored.
    pub fn select(&mut self, id: SceneId) -> bool {
        if self.index_of(id).is_some() {
            self.active = Some(id);
            true
        } else {
            false
        }
    }

    /// Id of the active scene.
    pub fn active_id(&self) -> Option<SceneId> {
        self.active
    }

    /// The active scene.
    pub fn active(&self) -> Option<&DisplayNode> {
        self.active.and_then(|id| self.get(id))
    }

    /// Looks up a scene.
    pub fn get(&self, id: SceneId) -> Option<&DisplayNode> {
        self.scenes.iter().find(|(i, _)| *i == id).map(|(_, s)| s)
    }

    /// Scenes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SceneId, &DisplayNode)> + '_ {
        self.scenes.iter().map(|(id, scene)| (*id, scene))
    }

    /// Number of stored scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Returns `true` if no scenes are stored.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    fn index_of(&self, id: SceneId) -> Option<usize> {
        self.scenes.iter().position(|(i, _)| *i == id)
    }
}
