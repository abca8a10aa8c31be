use platformer_engine::{
    build_snapshot, EngineError, GameObject, InputEvent, InputQueue, KeyState, PlatformerEngine,
    ProjectScene, Result, SnapshotBuffer,
};

/// Drives the engine from the editor's preview canvas.
///
/// The browser pushes key events as they arrive and calls `tick` once per
/// animation frame. Holding a movement key drives every platformer object at
/// once, the same way the preview maps the keyboard onto all controllable
/// objects.
pub struct PreviewRunner {
    engine: PlatformerEngine,
    input: InputQueue,
    keys: KeyState,
    snapshot: SnapshotBuffer,
}

impl PreviewRunner {
    pub fn new(engine: PlatformerEngine) -> Self {
        let snapshot = SnapshotBuffer::with_capacity(engine.config().capacity);
        Self {
            engine,
            input: InputQueue::new(),
            keys: KeyState::new(),
            snapshot,
        }
    }

    pub fn engine(&self) -> &PlatformerEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut PlatformerEngine {
        &mut self.engine
    }

    // -- Object lifecycle (JSON from the editor store) --

    /// Register every object of a project document. Returns the object count.
    pub fn load_project(&mut self, json: &str) -> Result<usize> {
        let scene = ProjectScene::from_json(json)?;
        self.engine.load_scene(&scene);
        Ok(scene.objects.len())
    }

    pub fn add_object(&mut self, json: &str) -> Result<()> {
        let object = parse_object(json)?;
        self.engine.add_game_object(object, None);
        Ok(())
    }

    pub fn update_object(&mut self, json: &str) -> Result<()> {
        let object = parse_object(json)?;
        self.engine.update_object(object);
        Ok(())
    }

    pub fn remove_object(&mut self, id: &str) -> bool {
        self.engine.remove_game_object(id).is_some()
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fold queued key events into the held set, forward held
    /// actions, step the simulation, then rebuild the snapshot.
    pub fn tick(&mut self, timestamp: f64) {
        for event in self.input.drain() {
            self.keys.apply(&event);
        }

        let controls = self.keys.sample(&self.engine.config().key_bindings);
        self.engine.apply_controls(&controls);
        self.engine.update(timestamp, controls.jump);

        build_snapshot(self.engine.objects(), &mut self.snapshot);
    }

    /// Velocity as `{"x":..,"y":..}`, or `None` for objects without a
    /// platformer behavior.
    pub fn velocity_json(&self, id: &str) -> Option<String> {
        self.engine
            .object_velocity(id)
            .map(|v| serde_json::json!({ "x": v.x, "y": v.y }).to_string())
    }

    /// Leave preview mode: drop all objects, held keys and snapshot data.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.input.drain();
        self.keys.clear();
        self.snapshot.clear();
    }

    // ---- Snapshot accessors for direct memory reads ----

    pub fn snapshot(&self) -> &SnapshotBuffer {
        &self.snapshot
    }

    pub fn snapshot_ptr(&self) -> *const f32 {
        self.snapshot.instances_ptr()
    }

    pub fn snapshot_count(&self) -> u32 {
        self.snapshot.instance_count()
    }

    pub fn snapshot_id(&self, index: usize) -> Option<&str> {
        self.snapshot.ids().get(index).map(|id| id.as_str())
    }
}

fn parse_object(json: &str) -> Result<GameObject> {
    GameObject::from_json(json).map_err(EngineError::from)
}
