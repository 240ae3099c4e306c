use serde::Serialize;

use crate::handle::{ContainerHandle, NavHandle, ScreenHandle};

/// How a tracked screen arrived on the visible stack, which also dictates
/// how it must leave it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// A navigation container installed at the base of a context.
    Root,
    /// A screen pushed onto the active container, reversed by pop.
    Push,
    /// A push-styled modal that still lives inside the container's ladder.
    PushModal,
    /// A screen presented over the current context, reversed by dismiss.
    Modal,
}

/// One entry of the navigation record: a screen identity paired with the
/// transition that produced it. Only containers can carry `Root`, so the
/// pairing is encoded in the variants instead of being checked at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavRecord {
    Root(ContainerHandle),
    Push(ScreenHandle),
    PushModal(ScreenHandle),
    Modal(ScreenHandle),
}

impl NavRecord {
    pub fn kind(&self) -> TransitionKind {
        match self {
            Self::Root(_) => TransitionKind::Root,
            Self::Push(_) => TransitionKind::Push,
            Self::PushModal(_) => TransitionKind::PushModal,
            Self::Modal(_) => TransitionKind::Modal,
        }
    }

    pub fn handle(&self) -> NavHandle {
        match self {
            Self::Root(container) => NavHandle::Container(*container),
            Self::Push(screen) | Self::PushModal(screen) | Self::Modal(screen) => {
                NavHandle::Screen(*screen)
            }
        }
    }

    fn is_leaf(&self) -> bool {
        !matches!(self, Self::Root(_))
    }
}

/// Ordered record of every currently-visible screen and how it got there.
///
/// The stack is the single source of truth for pop/dismiss decisions; the
/// UI toolkit's own view hierarchy is never consulted. Every operation is
/// total: an absent target or an empty stack degrades to a no-op, which is
/// what keeps a completed gesture and a simultaneous programmatic pop safe
/// to deliver in either order.
///
/// A handle appears at most once in the record. The stack owns nothing but
/// identities; it is a plain synchronous mutator meant to live as a single
/// injected value on the UI/event thread.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct NavStack {
    records: Vec<NavRecord>,
}

impl NavStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire visible history: clear everything, then record a
    /// fresh container with `screen` as its first entry.
    pub fn push_root(&mut self, container: ContainerHandle, screen: ScreenHandle) {
        self.records.clear();
        self.records.push(NavRecord::Root(container));
        self.records.push(NavRecord::Push(screen));
        self.assert_unique();
    }

    /// Record `screen` pushed onto `container`. The container gains a `Root`
    /// record the first time it is seen. Re-pushing a live handle is a
    /// silent no-op.
    pub fn push(&mut self, container: ContainerHandle, screen: ScreenHandle) {
        self.track(NavRecord::Root(container));
        self.track(NavRecord::Push(screen));
    }

    /// Like [`NavStack::push`] but classified as a push-styled modal. It
    /// occupies a rung of the same container ladder, not a new context.
    pub fn push_modal(&mut self, container: ContainerHandle, screen: ScreenHandle) {
        self.track(NavRecord::Root(container));
        self.track(NavRecord::PushModal(screen));
    }

    /// Record `screen` presented modally over the current context.
    pub fn present_modal(&mut self, screen: ScreenHandle) {
        self.track(NavRecord::Modal(screen));
    }

    /// Record a pre-built container presented modally: the container opens a
    /// new context, its first child is the modal anchor and the remaining
    /// children are ordinary pushes, imported in order.
    pub fn present_modal_container(
        &mut self,
        container: ContainerHandle,
        children: &[ScreenHandle],
    ) {
        self.track(NavRecord::Root(container));
        for (idx, child) in children.iter().copied().enumerate() {
            if idx == 0 {
                self.track(NavRecord::Modal(child));
            } else {
                self.track(NavRecord::Push(child));
            }
        }
    }

    /// Remove one screen from the active container. Shares its removal rule
    /// with [`NavStack::pop_gesture`] so programmatic pops and completed
    /// back-swipes stay consistent.
    pub fn pop(&mut self) -> Option<ScreenHandle> {
        self.pop_gesture()
    }

    /// Completed interactive back-swipe. Removes the trailing leaf of the
    /// active container, but only while the container holds more than one
    /// leaf: the sole remaining child is never poppable. A duplicate
    /// delivery finds the guard failing and does nothing.
    pub fn pop_gesture(&mut self) -> Option<ScreenHandle> {
        if self.ladder_len() < 2 {
            return None;
        }
        // ladder_len >= 2 guarantees the tail is a leaf record
        self.records.pop().and_then(|record| {
            debug_assert!(record.is_leaf());
            record.handle().as_screen()
        })
    }

    /// Unwind the active container to its first screen. The container record
    /// and that first screen always survive. Returns how many records were
    /// removed.
    pub fn pop_to_root(&mut self) -> usize {
        let Some(root_idx) = self
            .records
            .iter()
            .rposition(|record| matches!(record, NavRecord::Root(_)))
        else {
            return 0;
        };
        let keep = root_idx + 2;
        if self.records.len() <= keep {
            return 0;
        }
        let removed = self.records.len() - keep;
        self.records.truncate(keep);
        removed
    }

    /// Pop a push-styled modal. `PushModal` already counts exactly like
    /// `Push` in the ladder, so the rule is the shared one.
    pub fn pop_modal(&mut self) -> Option<ScreenHandle> {
        self.pop_gesture()
    }

    /// [`NavStack::pop_to_root`] under its modal-flavoured entry point.
    pub fn pop_modal_to_root(&mut self) -> usize {
        self.pop_to_root()
    }

    /// Close the innermost modal context: the most recent `Modal` record and
    /// everything above it go away, and a container left childless by the
    /// removal is dropped with it. Returns the dismissed anchor, or `None`
    /// when no modal context is tracked.
    pub fn dismiss_modal(&mut self) -> Option<ScreenHandle> {
        let (idx, anchor) = self
            .records
            .iter()
            .enumerate()
            .rev()
            .find_map(|(idx, record)| match record {
                NavRecord::Modal(screen) => Some((idx, *screen)),
                _ => None,
            })?;
        self.records.truncate(idx);
        if matches!(self.records.last(), Some(NavRecord::Root(_))) {
            self.records.pop();
        }
        Some(anchor)
    }

    /// Completed interactive dismiss-swipe; same removal rule as
    /// [`NavStack::dismiss_modal`], keyed off the active modal context.
    pub fn dismiss_gesture(&mut self) -> Option<ScreenHandle> {
        self.dismiss_modal()
    }

    /// Innermost navigation container, scanning from the tail.
    pub fn active_container(&self) -> Option<ContainerHandle> {
        self.records.iter().rev().find_map(|record| match record {
            NavRecord::Root(container) => Some(*container),
            _ => None,
        })
    }

    /// Innermost leaf screen, of any transition kind.
    pub fn active_screen(&self) -> Option<ScreenHandle> {
        self.records
            .iter()
            .rev()
            .find_map(|record| record.handle().as_screen())
    }

    /// Innermost modal anchor: the screen a dismiss would target.
    pub fn active_modal(&self) -> Option<ScreenHandle> {
        self.records.iter().rev().find_map(|record| match record {
            NavRecord::Modal(screen) => Some(*screen),
            _ => None,
        })
    }

    /// How many screens can still be popped (or back-swiped) off the active
    /// container before only its first screen remains. Zero both for an
    /// empty stack and for a container showing its sole child; callers gate
    /// the back gesture on `pop_depth() >= 1`.
    pub fn pop_depth(&self) -> usize {
        self.ladder_len().saturating_sub(1)
    }

    pub fn contains(&self, handle: NavHandle) -> bool {
        self.records.iter().any(|record| record.handle() == handle)
    }

    /// Whether `container` is currently tracked as a navigation container.
    pub fn is_container(&self, container: ContainerHandle) -> bool {
        self.contains(NavHandle::Container(container))
    }

    pub fn records(&self) -> &[NavRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Owned copy of the record sequence, e.g. for diagnostics dumps.
    pub fn snapshot(&self) -> Vec<NavRecord> {
        self.records.clone()
    }

    /// Leaf records between the tail and the nearest `Root`.
    fn ladder_len(&self) -> usize {
        self.records
            .iter()
            .rev()
            .take_while(|record| record.is_leaf())
            .count()
    }

    fn track(&mut self, record: NavRecord) {
        if !self.contains(record.handle()) {
            self.records.push(record);
        }
        self.assert_unique();
    }

    fn assert_unique(&self) {
        debug_assert!(
            self.records.iter().enumerate().all(|(idx, record)| {
                self.records[..idx]
                    .iter()
                    .all(|earlier| earlier.handle() != record.handle())
            }),
            "navigation record handles must be unique: {:?}",
            self.records
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::HandleAllocator;

    fn stack_with_root(alloc: &HandleAllocator) -> (NavStack, ContainerHandle, ScreenHandle) {
        let mut stack = NavStack::new();
        let container = alloc.container();
        let first = alloc.screen();
        stack.push_root(container, first);
        (stack, container, first)
    }

    #[test]
    fn push_root_replaces_any_prior_history() {
        let alloc = HandleAllocator::new();
        let (mut stack, _, _) = stack_with_root(&alloc);
        stack.push(stack.active_container().unwrap(), alloc.screen());
        stack.present_modal(alloc.screen());

        let container = alloc.container();
        let screen = alloc.screen();
        stack.push_root(container, screen);

        assert_eq!(
            stack.records(),
            &[NavRecord::Root(container), NavRecord::Push(screen)]
        );
    }

    #[test]
    fn push_appends_under_the_active_container() {
        let alloc = HandleAllocator::new();
        let (mut stack, container, first) = stack_with_root(&alloc);
        let second = alloc.screen();
        let third = alloc.screen();
        stack.push(container, second);
        stack.push(container, third);

        assert_eq!(stack.pop_depth(), 2);
        assert_eq!(stack.active_screen(), Some(third));
        assert_eq!(
            stack.records(),
            &[
                NavRecord::Root(container),
                NavRecord::Push(first),
                NavRecord::Push(second),
                NavRecord::Push(third),
            ]
        );
    }

    #[test]
    fn pop_restores_previous_screen_and_depth() {
        let alloc = HandleAllocator::new();
        let (mut stack, container, _) = stack_with_root(&alloc);
        let second = alloc.screen();
        let third = alloc.screen();
        stack.push(container, second);
        stack.push(container, third);

        assert_eq!(stack.pop(), Some(third));
        assert_eq!(stack.pop_depth(), 1);
        assert_eq!(stack.active_screen(), Some(second));
    }

    #[test]
    fn repushing_a_live_handle_is_a_noop() {
        let alloc = HandleAllocator::new();
        let (mut stack, container, first) = stack_with_root(&alloc);
        let second = alloc.screen();
        stack.push(container, second);
        let before = stack.clone();

        stack.push(container, first);
        stack.push(container, second);
        assert_eq!(stack, before);
    }

    #[test]
    fn no_handle_ever_appears_twice() {
        let alloc = HandleAllocator::new();
        let (mut stack, container, first) = stack_with_root(&alloc);
        let modal = alloc.screen();
        stack.push_modal(container, first);
        stack.present_modal(modal);
        stack.present_modal(modal);
        stack.present_modal_container(container, &[modal, first]);

        for (idx, record) in stack.records().iter().enumerate() {
            assert!(
                stack.records()[..idx]
                    .iter()
                    .all(|earlier| earlier.handle() != record.handle()),
                "duplicate handle in {:?}",
                stack.records()
            );
        }
    }

    #[test]
    fn sole_child_cannot_be_gestured_away() {
        let alloc = HandleAllocator::new();
        let (mut stack, _, first) = stack_with_root(&alloc);

        assert_eq!(stack.pop_gesture(), None);
        assert_eq!(stack.active_screen(), Some(first));
        assert_eq!(stack.pop_depth(), 0);
    }

    #[test]
    fn duplicate_gesture_completion_removes_only_one_record() {
        let alloc = HandleAllocator::new();
        let (mut stack, container, first) = stack_with_root(&alloc);
        let second = alloc.screen();
        stack.push(container, second);

        assert_eq!(stack.pop_gesture(), Some(second));
        // the same physical gesture reported twice
        assert_eq!(stack.pop_gesture(), None);
        assert_eq!(stack.active_screen(), Some(first));
    }

    #[test]
    fn gesture_and_programmatic_pop_race_safely() {
        let alloc = HandleAllocator::new();
        let (mut stack, container, _) = stack_with_root(&alloc);
        let second = alloc.screen();
        let third = alloc.screen();
        stack.push(container, second);
        stack.push(container, third);

        // back-button tap and back-swipe completion for the same transition
        assert_eq!(stack.pop(), Some(third));
        assert_eq!(stack.pop_gesture(), Some(second));
        assert_eq!(stack.pop_gesture(), None);
        assert_eq!(stack.pop_depth(), 0);
    }

    #[test]
    fn pop_to_root_keeps_container_and_first_screen() {
        let alloc = HandleAllocator::new();
        let (mut stack, container, first) = stack_with_root(&alloc);
        for _ in 0..3 {
            stack.push(container, alloc.screen());
        }

        assert_eq!(stack.pop_to_root(), 3);
        assert_eq!(
            stack.records(),
            &[NavRecord::Root(container), NavRecord::Push(first)]
        );
        // already unwound, nothing more to remove
        assert_eq!(stack.pop_to_root(), 0);
    }

    #[test]
    fn push_modal_counts_like_a_push() {
        let alloc = HandleAllocator::new();
        let (mut stack, container, first) = stack_with_root(&alloc);
        let second = alloc.screen();
        let sheet = alloc.screen();
        stack.push(container, second);
        stack.push_modal(container, sheet);

        assert_eq!(stack.pop_depth(), 2);
        assert_eq!(stack.pop_modal(), Some(sheet));
        assert_eq!(stack.active_screen(), Some(second));
        assert_eq!(stack.pop_depth(), 1);

        stack.push_modal(container, sheet);
        assert_eq!(stack.pop_modal_to_root(), 2);
        assert_eq!(stack.active_screen(), Some(first));
    }

    #[test]
    fn modal_round_trip_restores_prior_state() {
        let alloc = HandleAllocator::new();
        let (mut stack, _, _) = stack_with_root(&alloc);
        let before = stack.clone();

        let modal = alloc.screen();
        stack.present_modal(modal);
        assert_eq!(stack.active_modal(), Some(modal));
        assert_eq!(stack.dismiss_modal(), Some(modal));
        assert_eq!(stack, before);
    }

    #[test]
    fn dismissing_a_container_context_drops_its_root() {
        let alloc = HandleAllocator::new();
        let (mut stack, _, _) = stack_with_root(&alloc);
        let before = stack.clone();

        let modal_container = alloc.container();
        let anchor = alloc.screen();
        let detail = alloc.screen();
        stack.present_modal_container(modal_container, &[anchor, detail]);
        assert!(stack.is_container(modal_container));

        assert_eq!(stack.dismiss_modal(), Some(anchor));
        assert!(!stack.is_container(modal_container));
        assert_eq!(stack, before);
    }

    #[test]
    fn presented_container_imports_children_in_order() {
        let alloc = HandleAllocator::new();
        let (mut stack, _, _) = stack_with_root(&alloc);
        let modal_container = alloc.container();
        let anchor = alloc.screen();
        let detail = alloc.screen();
        stack.present_modal_container(modal_container, &[anchor, detail]);

        let tail = &stack.records()[stack.len() - 3..];
        assert_eq!(
            tail,
            &[
                NavRecord::Root(modal_container),
                NavRecord::Modal(anchor),
                NavRecord::Push(detail),
            ]
        );
        assert_eq!(stack.active_screen(), Some(detail));
        assert_eq!(stack.active_container(), Some(modal_container));
    }

    #[test]
    fn nested_modals_dismiss_innermost_first() {
        let alloc = HandleAllocator::new();
        let (mut stack, _, _) = stack_with_root(&alloc);
        let outer = alloc.screen();
        let inner = alloc.screen();
        stack.present_modal(outer);
        stack.present_modal(inner);

        assert_eq!(stack.dismiss_modal(), Some(inner));
        assert_eq!(stack.active_modal(), Some(outer));
        assert_eq!(stack.dismiss_modal(), Some(outer));
        assert_eq!(stack.dismiss_modal(), None);
    }

    #[test]
    fn dismiss_gesture_matches_dismiss_modal() {
        let alloc = HandleAllocator::new();
        let (mut stack, _, _) = stack_with_root(&alloc);
        let before = stack.clone();
        let modal = alloc.screen();
        stack.present_modal(modal);

        assert_eq!(stack.dismiss_gesture(), Some(modal));
        assert_eq!(stack, before);
        // the matching programmatic dismiss arriving late
        assert_eq!(stack.dismiss_modal(), None);
    }

    #[test]
    fn popping_a_push_modal_reveals_the_screen_below() {
        let alloc = HandleAllocator::new();
        let (mut stack, container, _) = stack_with_root(&alloc);
        let second = alloc.screen();
        let sheet = alloc.screen();
        stack.push(container, second);
        stack.push_modal(container, sheet);

        assert_eq!(stack.pop_modal(), Some(sheet));
        assert_eq!(stack.active_screen(), Some(second));
        assert_eq!(stack.pop_depth(), 1);
    }

    #[test]
    fn empty_stack_degrades_to_noops() {
        let mut stack = NavStack::new();
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.pop_gesture(), None);
        assert_eq!(stack.pop_to_root(), 0);
        assert_eq!(stack.dismiss_modal(), None);
        assert_eq!(stack.dismiss_gesture(), None);
        assert_eq!(stack.active_container(), None);
        assert_eq!(stack.active_screen(), None);
        assert_eq!(stack.pop_depth(), 0);
        assert!(stack.is_empty());
    }

    #[test]
    fn pop_to_root_targets_the_innermost_container() {
        let alloc = HandleAllocator::new();
        let (mut stack, _, _) = stack_with_root(&alloc);
        let modal_container = alloc.container();
        let anchor = alloc.screen();
        stack.present_modal_container(modal_container, &[anchor]);
        stack.push(modal_container, alloc.screen());
        stack.push(modal_container, alloc.screen());

        assert_eq!(stack.pop_to_root(), 2);
        assert_eq!(stack.active_container(), Some(modal_container));
        assert_eq!(stack.active_screen(), Some(anchor));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let alloc = HandleAllocator::new();
        let (stack, _, _) = stack_with_root(&alloc);
        let dump = serde_json::to_string(&stack.snapshot()).expect("serializable snapshot");
        assert!(dump.contains("root"));
        assert!(dump.contains("push"));
    }

    #[test]
    fn record_accessors_expose_kind_and_handle() {
        let alloc = HandleAllocator::new();
        let container = alloc.container();
        let screen = alloc.screen();
        assert_eq!(NavRecord::Root(container).kind(), TransitionKind::Root);
        assert_eq!(
            NavRecord::Root(container).handle(),
            NavHandle::Container(container)
        );
        assert_eq!(NavRecord::PushModal(screen).kind(), TransitionKind::PushModal);
        assert_eq!(NavRecord::Modal(screen).handle(), NavHandle::Screen(screen));
    }
}
