//! The animation engine
//!
//! `Motion` owns the last known pose of every node it has touched, the
//! running tweens, and the scroll triggers. The host calls
//! `update_scroll` whenever the scroll offset changes and `tick` once per
//! frame; `tick` reports which tweens finished so callers can run their
//! completion logic without re-entering the engine.

use tracing::{debug, trace};

use super::props::{Pose, Property, Props};
use super::trigger::{ScrollTrigger, ScrollTriggerSpec, TriggerId};
use super::tween::{Drive, Tween, TweenId, TweenSpec};
use crate::surface::Surface;

pub struct Motion<S: Surface> {
    surface: S,
    poses: Vec<(S::Node, Pose)>,
    tweens: Vec<Tween<S::Node>>,
    triggers: Vec<ScrollTrigger<S::Node>>,
    scroll: f32,
    next_id: u64,
}

/// Current pose of `node`, starting from identity the first time it is seen
fn pose_entry<'a, N: Clone + PartialEq>(poses: &'a mut Vec<(N, Pose)>, node: &N) -> &'a mut Pose {
    let index = match poses.iter().position(|(n, _)| n == node) {
        Some(index) => index,
        None => {
            poses.push((node.clone(), Pose::IDENTITY));
            poses.len() - 1
        }
    };
    &mut poses[index].1
}

impl<S: Surface> Motion<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            poses: Vec::new(),
            tweens: Vec::new(),
            triggers: Vec::new(),
            scroll: 0.0,
            next_id: 1,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // === Direct tweens ===

    /// Animate `node` from its current values to `props`
    pub fn to(&mut self, node: &S::Node, props: Props, spec: TweenSpec) -> TweenId {
        self.overwrite(node, &props);
        let id = TweenId(self.next_id());
        self.tweens
            .push(Tween::new(id, node.clone(), None, props, spec, Drive::Time));
        id
    }

    /// Animate `node` between explicit endpoints; `from` renders immediately
    pub fn from_to(&mut self, node: &S::Node, from: Props, to: Props, spec: TweenSpec) -> TweenId {
        self.overwrite(node, &to);
        self.set(node, from);
        let id = TweenId(self.next_id());
        self.tweens
            .push(Tween::new(id, node.clone(), Some(from), to, spec, Drive::Time));
        id
    }

    /// Assign `props` instantly
    pub fn set(&mut self, node: &S::Node, props: Props) {
        self.overwrite(node, &props);
        let pose = pose_entry(&mut self.poses, node);
        pose.apply(&props);
        let pose = *pose;
        self.surface.apply(node, &pose);
    }

    /// Live value of a property
    pub fn get(&self, node: &S::Node, property: Property) -> f32 {
        self.pose(node).get(property)
    }

    pub fn pose(&self, node: &S::Node) -> Pose {
        self.poses
            .iter()
            .find(|(n, _)| n == node)
            .map(|(_, p)| *p)
            .unwrap_or_default()
    }

    /// Running time tweens stop animating whatever `props` now writes
    fn overwrite(&mut self, node: &S::Node, props: &Props) {
        for tween in self
            .tweens
            .iter_mut()
            .filter(|t| t.drive == Drive::Time && &t.node == node)
        {
            tween.drop_overlap(props);
        }
        self.tweens
            .retain(|t| t.drive != Drive::Time || !t.to.is_empty());
    }

    pub fn is_running(&self, id: TweenId) -> bool {
        self.tweens.iter().any(|t| t.id == id)
    }

    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// Drop every tween on `node` without finishing it
    pub fn kill_tweens_of(&mut self, node: &S::Node) {
        self.tweens.retain(|t| &t.node != node);
    }

    // === Scroll-linked animation ===

    /// Animate `nodes` to `props` under a scroll trigger
    pub fn to_on_scroll(
        &mut self,
        nodes: &[S::Node],
        props: Props,
        spec: TweenSpec,
        stagger: f32,
        trigger: ScrollTriggerSpec<S::Node>,
    ) -> TriggerId {
        self.bind(nodes, None, props, spec, stagger, trigger)
    }

    /// Animate `nodes` between explicit endpoints under a scroll trigger
    pub fn from_to_on_scroll(
        &mut self,
        nodes: &[S::Node],
        from: Props,
        to: Props,
        spec: TweenSpec,
        stagger: f32,
        trigger: ScrollTriggerSpec<S::Node>,
    ) -> TriggerId {
        self.bind(nodes, Some(from), to, spec, stagger, trigger)
    }

    /// A trigger with no animation of its own, for progress callbacks
    pub fn create_trigger(&mut self, trigger: ScrollTriggerSpec<S::Node>) -> TriggerId {
        self.bind(&[], None, Props::new(), TweenSpec::default(), 0.0, trigger)
    }

    fn bind(
        &mut self,
        nodes: &[S::Node],
        from: Option<Props>,
        to: Props,
        spec: TweenSpec,
        stagger: f32,
        trigger: ScrollTriggerSpec<S::Node>,
    ) -> TriggerId {
        let drive = if trigger.scrub.is_some() {
            Drive::Scrub
        } else {
            Drive::Waiting
        };

        let mut tween_ids = Vec::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            if let Some(from) = from {
                self.set(node, from);
            }
            let id = TweenId(self.next_id());
            let spec = spec.delay(spec.delay + index as f32 * stagger);
            let mut tween = Tween::new(id, node.clone(), from, to, spec, drive);
            if drive == Drive::Scrub {
                tween.resolve_start(&self.pose(node));
            }
            self.tweens.push(tween);
            tween_ids.push(id);
        }

        let id = TriggerId(self.next_id());
        let mut scroll_trigger = ScrollTrigger::new(id, trigger, tween_ids);
        let bounds = self.surface.bounds(&scroll_trigger.spec.trigger);
        scroll_trigger.refresh(bounds, self.surface.viewport().height);
        debug!(
            start = scroll_trigger.start_px,
            end = scroll_trigger.end_px,
            tweens = scroll_trigger.tweens.len(),
            "scroll trigger created"
        );
        self.triggers.push(scroll_trigger);
        let index = self.triggers.len() - 1;
        self.evaluate_trigger(index);
        self.triggers.retain(|t| !t.killed);
        id
    }

    pub fn trigger_count(&self) -> usize {
        self.triggers.len()
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Notify the engine of a new scroll offset
    pub fn update_scroll(&mut self, offset: f32) {
        self.scroll = offset;
        for index in 0..self.triggers.len() {
            self.evaluate_trigger(index);
        }
        self.triggers.retain(|t| !t.killed);
    }

    /// Recompute trigger positions after layout changes
    pub fn refresh(&mut self) {
        let viewport_height = self.surface.viewport().height;
        for trigger in &mut self.triggers {
            let bounds = self.surface.bounds(&trigger.spec.trigger);
            trigger.refresh(bounds, viewport_height);
        }
        let offset = self.scroll;
        self.update_scroll(offset);
    }

    fn evaluate_trigger(&mut self, index: usize) {
        let scroll = self.scroll;
        let trigger = &mut self.triggers[index];
        let change = trigger.evaluate(scroll);

        if let Some(class) = trigger.spec.toggle_class.as_deref() {
            if change.became_active {
                self.surface.add_class(&trigger.spec.trigger, class);
            } else if change.became_inactive && !trigger.spec.once {
                self.surface.remove_class(&trigger.spec.trigger, class);
            }
        }

        if trigger.is_scrubbed() {
            if trigger.spec.scrub == Some(0.0) {
                let progress = trigger.smoothed;
                let ids = trigger.tweens.clone();
                self.render_scrubbed(&ids, progress);
            }
            return;
        }

        if change.entered {
            trace!(tweens = trigger.tweens.len(), "scroll trigger entered");
            let ids = trigger.tweens.clone();
            if trigger.spec.once {
                trigger.killed = true;
            }
            for tween in self.tweens.iter_mut().filter(|t| ids.contains(&t.id)) {
                if tween.drive == Drive::Waiting {
                    tween.drive = Drive::Time;
                }
            }
        }
    }

    fn render_scrubbed(&mut self, ids: &[TweenId], progress: f32) {
        for tween in self.tweens.iter().filter(|t| ids.contains(&t.id)) {
            let pose = pose_entry(&mut self.poses, &tween.node);
            tween.render(progress, pose);
            let pose = *pose;
            self.surface.apply(&tween.node, &pose);
        }
    }

    /// Dispose one trigger and the tweens still bound to it
    pub fn kill_trigger(&mut self, id: TriggerId) -> bool {
        let Some(index) = self.triggers.iter().position(|t| t.id == id) else {
            return false;
        };
        let trigger = self.triggers.remove(index);
        self.tweens
            .retain(|t| t.drive == Drive::Time || !trigger.tweens.contains(&t.id));
        true
    }

    /// Dispose every scroll trigger; returns how many were alive
    pub fn kill_all_triggers(&mut self) -> usize {
        let count = self.triggers.len();
        let orphaned: Vec<TweenId> = self
            .triggers
            .drain(..)
            .flat_map(|t| t.tweens)
            .collect();
        self.tweens
            .retain(|t| t.drive == Drive::Time || !orphaned.contains(&t.id));
        if count > 0 {
            debug!(count, "scroll triggers killed");
        }
        count
    }

    // === Frame ===

    /// Advance by `dt` seconds; returns the tweens that finished this frame
    pub fn tick(&mut self, dt: f32) -> Vec<TweenId> {
        let mut scrubbed = Vec::new();
        for trigger in &mut self.triggers {
            if trigger.damp(dt) {
                scrubbed.push((trigger.tweens.clone(), trigger.smoothed));
            }
        }
        for (ids, progress) in scrubbed {
            self.render_scrubbed(&ids, progress);
        }

        let mut finished = Vec::new();
        for tween in self.tweens.iter_mut().filter(|t| t.drive == Drive::Time) {
            let Some(t) = tween.advance(dt) else {
                continue;
            };
            let pose = pose_entry(&mut self.poses, &tween.node);
            if !tween.started {
                tween.resolve_start(pose);
                tween.started = true;
            }
            tween.render(t, pose);
            let pose = *pose;
            self.surface.apply(&tween.node, &pose);
            if t >= 1.0 {
                finished.push(tween.id);
            }
        }

        if !finished.is_empty() {
            self.tweens.retain(|t| !finished.contains(&t.id));
            trace!(count = finished.len(), "tweens finished");
        }
        finished
    }
}
