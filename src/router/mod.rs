//! VIPER-style navigation router over the tracked stack.
//!
//! The wireframe owns a [`NavStack`] plus the two collaborators that actually
//! move views around: a [`ContainerFactory`] that creates and installs
//! navigation containers, and a [`ScreenToolkit`] that performs leaf
//! transitions. Call order is fixed so a query between the record change and
//! the visual transition always sees a consistent picture: push-style
//! operations drive the toolkit first and record after, pop/dismiss-style
//! operations resolve their target from the record, remove it, then drive
//! the toolkit.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::error::Result;
use crate::handle::{ContainerHandle, ScreenHandle};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::NavMetrics;
use crate::stack::NavStack;

pub mod audit;

use audit::{NavAudit, NavAuditEventBuilder, NavAuditStage, NullNavAudit};

/// Configuration knobs for the wireframe router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Optional structured logger used by the router.
    pub logger: Option<Logger>,
    /// Target field stamped onto every router log event.
    pub log_target: String,
    /// Metrics accumulator shared with whoever reports them.
    pub metrics: Option<Arc<Mutex<NavMetrics>>>,
    /// Audit sink notified of each lifecycle transition.
    pub audit: Arc<dyn NavAudit>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            logger: None,
            log_target: "wireframe::router".to_string(),
            metrics: None,
            audit: Arc::new(NullNavAudit),
        }
    }
}

impl RouterConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(NavMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<NavMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

/// Collaborator that creates and installs navigation containers.
pub trait ContainerFactory {
    /// Create a fresh container, optionally seeded with an initial screen.
    fn create_container(&mut self, initial: Option<ScreenHandle>) -> Result<ContainerHandle>;

    /// Install `container` as the visible root, discarding prior history.
    fn activate_root(&mut self, container: ContainerHandle, animated: bool) -> Result<()>;

    /// Present a pre-built container modally over `onto`.
    fn present_container(
        &mut self,
        container: ContainerHandle,
        onto: ScreenHandle,
        animated: bool,
    ) -> Result<()>;

    /// Screens already held by a pre-built container, in push order.
    fn container_children(&self, container: ContainerHandle) -> Vec<ScreenHandle>;
}

/// Collaborator performing leaf-screen transitions.
pub trait ScreenToolkit {
    fn push(
        &mut self,
        container: ContainerHandle,
        screen: ScreenHandle,
        animated: bool,
    ) -> Result<()>;

    fn push_as_modal(
        &mut self,
        container: ContainerHandle,
        screen: ScreenHandle,
        animated: bool,
    ) -> Result<()>;

    fn present(&mut self, screen: ScreenHandle, onto: ScreenHandle, animated: bool) -> Result<()>;

    fn pop_one(&mut self, container: ContainerHandle, animated: bool) -> Result<()>;

    fn pop_to_first(&mut self, container: ContainerHandle, animated: bool) -> Result<()>;

    fn dismiss(&mut self, screen: ScreenHandle, animated: bool) -> Result<()>;
}

/// Owns the navigation record and brackets every toolkit call around it.
///
/// One wireframe is expected per application session, injected into whatever
/// builds concrete routers; the record is an owned value, never shared
/// static state. All entry points are meant for the single UI/event thread.
pub struct Wireframe<F, T>
where
    F: ContainerFactory,
    T: ScreenToolkit,
{
    factory: F,
    toolkit: T,
    stack: NavStack,
    config: RouterConfig,
}

impl<F, T> Wireframe<F, T>
where
    F: ContainerFactory,
    T: ScreenToolkit,
{
    pub fn new(factory: F, toolkit: T) -> Self {
        Self::with_config(factory, toolkit, RouterConfig::default())
    }

    pub fn with_config(factory: F, toolkit: T, config: RouterConfig) -> Self {
        let wireframe = Self {
            factory,
            toolkit,
            stack: NavStack::new(),
            config,
        };
        wireframe.audit(NavAuditStage::RouterConstructed, []);
        wireframe
    }

    pub fn config_mut(&mut self) -> &mut RouterConfig {
        &mut self.config
    }

    /// Read-only view of the tracked record.
    pub fn stack(&self) -> &NavStack {
        &self.stack
    }

    /// Replace the whole visible history with a fresh container rooted at
    /// `screen`.
    pub fn push_root(&mut self, screen: ScreenHandle, animated: bool) -> Result<()> {
        let container = self.factory.create_container(Some(screen))?;
        self.factory.activate_root(container, animated)?;
        self.stack.push_root(container, screen);
        self.tally(|m| m.record_push());
        self.observe_depth();
        self.log(
            LogLevel::Info,
            "root_replaced",
            [
                json_kv("container", json!(container.to_string())),
                json_kv("screen", json!(screen.to_string())),
            ],
        );
        self.audit(
            NavAuditStage::RootReplaced,
            [json_kv("screen", json!(screen.to_string()))],
        );
        Ok(())
    }

    /// Push `screen` onto the active container, creating one through the
    /// factory if nothing is tracked yet. Pushing a screen that is already
    /// live anywhere in the record is a no-op (the toolkit is not called).
    pub fn push(&mut self, screen: ScreenHandle, animated: bool) -> Result<()> {
        if self.stack.contains(screen.into()) {
            self.skip("push", "screen already tracked");
            return Ok(());
        }
        let container = self.ensure_active_container()?;
        self.toolkit.push(container, screen, animated)?;
        self.stack.push(container, screen);
        self.note_pushed(container, screen, "screen_pushed");
        Ok(())
    }

    /// Like [`Wireframe::push`] but presented push-modally; the screen still
    /// occupies a rung of the container's ladder.
    pub fn push_modal(&mut self, screen: ScreenHandle, animated: bool) -> Result<()> {
        if self.stack.contains(screen.into()) {
            self.skip("push_modal", "screen already tracked");
            return Ok(());
        }
        let container = self.ensure_active_container()?;
        self.toolkit.push_as_modal(container, screen, animated)?;
        self.stack.push_modal(container, screen);
        self.note_pushed(container, screen, "screen_pushed_modal");
        Ok(())
    }

    /// Present `screen` modally over the innermost visible leaf, opening a
    /// new modal context.
    pub fn present_modal(&mut self, screen: ScreenHandle, animated: bool) -> Result<()> {
        if self.stack.contains(screen.into()) {
            self.skip("present_modal", "screen already tracked");
            return Ok(());
        }
        let Some(onto) = self.stack.active_screen() else {
            self.skip("present_modal", "nothing to present onto");
            return Ok(());
        };
        self.toolkit.present(screen, onto, animated)?;
        self.stack.present_modal(screen);
        self.tally(|m| m.record_present());
        self.log(
            LogLevel::Debug,
            "modal_presented",
            [
                json_kv("screen", json!(screen.to_string())),
                json_kv("onto", json!(onto.to_string())),
            ],
        );
        self.audit(
            NavAuditStage::ModalPresented,
            [json_kv("screen", json!(screen.to_string()))],
        );
        Ok(())
    }

    /// Present a pre-built container modally; its existing children are
    /// imported into the record in push order.
    pub fn present_modal_container(
        &mut self,
        container: ContainerHandle,
        animated: bool,
    ) -> Result<()> {
        if self.stack.is_container(container) {
            self.skip("present_modal_container", "container already tracked");
            return Ok(());
        }
        let Some(onto) = self.stack.active_screen() else {
            self.skip("present_modal_container", "nothing to present onto");
            return Ok(());
        };
        self.factory.present_container(container, onto, animated)?;
        let children = self.factory.container_children(container);
        self.stack.present_modal_container(container, &children);
        self.tally(|m| m.record_present());
        self.observe_depth();
        self.log(
            LogLevel::Debug,
            "modal_presented",
            [
                json_kv("container", json!(container.to_string())),
                json_kv("children", json!(children.len())),
                json_kv("onto", json!(onto.to_string())),
            ],
        );
        self.audit(
            NavAuditStage::ModalPresented,
            [json_kv("container", json!(container.to_string()))],
        );
        Ok(())
    }

    /// Pop one screen off the active container. Uses the same removal rule
    /// as a completed back-swipe, so the container's sole remaining child is
    /// never popped.
    pub fn pop(&mut self, animated: bool) -> Result<()> {
        self.pop_one_inner("pop", animated)
    }

    /// Pop a push-modal screen; record-wise identical to [`Wireframe::pop`].
    pub fn pop_modal(&mut self, animated: bool) -> Result<()> {
        self.pop_one_inner("pop_modal", animated)
    }

    /// Unwind the active container to its first screen.
    pub fn pop_to_root(&mut self, animated: bool) -> Result<()> {
        self.pop_to_root_inner("pop_to_root", animated)
    }

    /// [`Wireframe::pop_to_root`] under its modal-flavoured entry point.
    pub fn pop_modal_to_root(&mut self, animated: bool) -> Result<()> {
        self.pop_to_root_inner("pop_modal_to_root", animated)
    }

    /// Dismiss the innermost modal context, whatever is stacked above it
    /// included.
    pub fn dismiss_modal(&mut self, animated: bool) -> Result<()> {
        match self.stack.dismiss_modal() {
            Some(anchor) => {
                self.toolkit.dismiss(anchor, animated)?;
                self.tally(|m| m.record_dismissal());
                self.log(
                    LogLevel::Debug,
                    "modal_dismissed",
                    [json_kv("screen", json!(anchor.to_string()))],
                );
                self.audit(
                    NavAuditStage::ModalDismissed,
                    [json_kv("screen", json!(anchor.to_string()))],
                );
                Ok(())
            }
            None => {
                self.skip("dismiss_modal", "no modal context");
                Ok(())
            }
        }
    }

    /// A back-swipe finished. The toolkit already performed the transition,
    /// so only the record changes. Call once per physical gesture; never on
    /// gesture start or cancellation.
    pub fn pop_gesture_completed(&mut self) {
        match self.stack.pop_gesture() {
            Some(screen) => {
                self.tally(|m| m.record_gesture_completion());
                self.log(
                    LogLevel::Debug,
                    "gesture_completed",
                    [
                        json_kv("gesture", json!("pop")),
                        json_kv("screen", json!(screen.to_string())),
                    ],
                );
                self.audit(
                    NavAuditStage::GestureCompleted,
                    [json_kv("screen", json!(screen.to_string()))],
                );
            }
            None => self.skip("pop_gesture", "nothing poppable"),
        }
    }

    /// A dismiss-swipe finished; counterpart of
    /// [`Wireframe::pop_gesture_completed`] for modal contexts.
    pub fn dismiss_gesture_completed(&mut self) {
        match self.stack.dismiss_gesture() {
            Some(screen) => {
                self.tally(|m| m.record_gesture_completion());
                self.log(
                    LogLevel::Debug,
                    "gesture_completed",
                    [
                        json_kv("gesture", json!("dismiss")),
                        json_kv("screen", json!(screen.to_string())),
                    ],
                );
                self.audit(
                    NavAuditStage::GestureCompleted,
                    [json_kv("screen", json!(screen.to_string()))],
                );
            }
            None => self.skip("dismiss_gesture", "no modal context"),
        }
    }

    pub fn active_container(&self) -> Option<ContainerHandle> {
        self.stack.active_container()
    }

    pub fn active_screen(&self) -> Option<ScreenHandle> {
        self.stack.active_screen()
    }

    /// Screens still poppable off the active container; the back gesture is
    /// legal while this is at least one.
    pub fn pop_depth(&self) -> usize {
        self.stack.pop_depth()
    }

    /// Whether `container` is currently tracked as a navigation container.
    pub fn is_container(&self, container: ContainerHandle) -> bool {
        self.stack.is_container(container)
    }

    fn pop_one_inner(&mut self, op: &'static str, animated: bool) -> Result<()> {
        let Some(container) = self.stack.active_container() else {
            self.skip(op, "no active container");
            return Ok(());
        };
        match self.stack.pop() {
            Some(screen) => {
                self.toolkit.pop_one(container, animated)?;
                self.tally(|m| m.record_pop(1));
                self.log(
                    LogLevel::Debug,
                    "screen_popped",
                    [
                        json_kv("op", json!(op)),
                        json_kv("screen", json!(screen.to_string())),
                    ],
                );
                self.audit(
                    NavAuditStage::ScreenPopped,
                    [json_kv("screen", json!(screen.to_string()))],
                );
                Ok(())
            }
            None => {
                self.skip(op, "active container has a single screen");
                Ok(())
            }
        }
    }

    fn pop_to_root_inner(&mut self, op: &'static str, animated: bool) -> Result<()> {
        let Some(container) = self.stack.active_container() else {
            self.skip(op, "no active container");
            return Ok(());
        };
        let removed = self.stack.pop_to_root();
        if removed == 0 {
            self.skip(op, "already at the container root");
            return Ok(());
        }
        self.toolkit.pop_to_first(container, animated)?;
        self.tally(|m| m.record_pop(removed));
        self.log(
            LogLevel::Debug,
            "screen_popped",
            [json_kv("op", json!(op)), json_kv("removed", json!(removed))],
        );
        self.audit(
            NavAuditStage::ScreenPopped,
            [json_kv("removed", json!(removed))],
        );
        Ok(())
    }

    fn ensure_active_container(&mut self) -> Result<ContainerHandle> {
        if let Some(container) = self.stack.active_container() {
            return Ok(container);
        }
        self.factory.create_container(None)
    }

    fn note_pushed(&mut self, container: ContainerHandle, screen: ScreenHandle, message: &str) {
        self.tally(|m| m.record_push());
        self.observe_depth();
        self.log(
            LogLevel::Debug,
            message,
            [
                json_kv("container", json!(container.to_string())),
                json_kv("screen", json!(screen.to_string())),
                json_kv("depth", json!(self.stack.pop_depth())),
            ],
        );
        self.audit(
            NavAuditStage::ScreenPushed,
            [json_kv("screen", json!(screen.to_string()))],
        );
    }

    fn skip(&self, op: &'static str, reason: &str) {
        self.tally(|m| m.record_skipped());
        self.log(
            LogLevel::Debug,
            "operation_skipped",
            [json_kv("op", json!(op)), json_kv("reason", json!(reason))],
        );
        self.audit(
            NavAuditStage::OperationSkipped,
            [json_kv("op", json!(op)), json_kv("reason", json!(reason))],
        );
    }

    fn observe_depth(&self) {
        let depth = self.stack.pop_depth();
        self.tally(|m| m.observe_depth(depth));
    }

    fn tally(&self, update: impl FnOnce(&mut NavMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut guard);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let event = event_with_fields(level, &self.config.log_target, message, fields);
            let _ = logger.log_event(event);
        }
    }

    fn audit<I>(&self, stage: NavAuditStage, details: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut builder = NavAuditEventBuilder::new(stage);
        for (key, value) in details {
            builder.detail(key, value);
        }
        self.config.audit.record(builder.finish());
    }
}
