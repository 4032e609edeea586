use std::time::Duration;

use crate::model::config::AutoScrollConfig;

use super::pointer::Point;
use super::tick::{TickHandle, TickScheduler};

/// An edge band never exceeds 1/MAX_BAND_SHARE of the viewport height
const MAX_BAND_SHARE: f32 = 3.0;

/// Which scrollable element the auto-scroller drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// The scrollable note list region
    Inner,
    /// The page-level scrolling element
    Page,
}

/// Geometry of a scroll container, in view pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerMetrics {
    /// Top of the visible viewport in view space
    pub viewport_top: f32,
    pub viewport_height: f32,
    pub content_height: f32,
    pub scroll_offset: f32,
}

impl ContainerMetrics {
    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn overflows(&self) -> bool {
        self.content_height > self.viewport_height
    }
}

/// Scroll containers exposed by the view. `metrics` returns `None` when the
/// container is not currently attached.
pub trait ScrollHost {
    fn metrics(&self, kind: ContainerKind) -> Option<ContainerMetrics>;
    fn set_scroll_offset(&mut self, kind: ContainerKind, offset: f32);
}

/// Prefer the inner list if its content overflows, else the page.
pub fn resolve_container(host: &dyn ScrollHost) -> ContainerKind {
    match host.metrics(ContainerKind::Inner) {
        Some(m) if m.overflows() => ContainerKind::Inner,
        _ => ContainerKind::Page,
    }
}

/// What one tick did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The handle was not the outstanding tick; nothing happened
    Stale,
    /// The tick ran without moving the container
    Idle,
    Scrolled { from: f32, to: f32 },
}

/// Scrolls the drag's container while the pointer sits near its top or
/// bottom edge. At most one tick is outstanding; `stop` cancels it.
#[derive(Debug, Clone)]
pub struct AutoScroller {
    config: AutoScrollConfig,
    container: Option<ContainerKind>,
    scheduled: Option<TickHandle>,
}

impl AutoScroller {
    pub fn new(config: AutoScrollConfig) -> Self {
        AutoScroller {
            config,
            container: None,
            scheduled: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.scheduled.is_some()
    }

    /// Container resolved for the current drag
    pub fn container(&self) -> Option<ContainerKind> {
        self.container
    }

    fn interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_ms.max(1))
    }

    /// Resolve the container and schedule the first tick. Calling it while
    /// running does nothing.
    pub fn start(&mut self, host: &dyn ScrollHost, scheduler: &mut dyn TickScheduler) {
        if self.scheduled.is_some() {
            return;
        }
        let container = resolve_container(host);
        log::debug!("event=autoscroll_start container={:?}", container);
        self.container = Some(container);
        self.scheduled = Some(scheduler.schedule(self.interval()));
    }

    /// Cancel the outstanding tick and forget the container. Idempotent.
    pub fn stop(&mut self, scheduler: &mut dyn TickScheduler) {
        if let Some(handle) = self.scheduled.take() {
            scheduler.cancel(handle);
            log::debug!("event=autoscroll_stop");
        }
        self.container = None;
    }

    /// Run one tick for `handle` and schedule the next one.
    pub fn on_tick(
        &mut self,
        handle: TickHandle,
        pointer: Option<Point>,
        host: &mut dyn ScrollHost,
        scheduler: &mut dyn TickScheduler,
    ) -> TickOutcome {
        if self.scheduled != Some(handle) {
            return TickOutcome::Stale;
        }
        let outcome = self.scroll_step(pointer, host);
        self.scheduled = Some(scheduler.schedule(self.interval()));
        outcome
    }

    fn scroll_step(&self, pointer: Option<Point>, host: &mut dyn ScrollHost) -> TickOutcome {
        let (Some(kind), Some(pointer)) = (self.container, pointer) else {
            return TickOutcome::Idle;
        };
        let Some(metrics) = host.metrics(kind) else {
            return TickOutcome::Idle;
        };
        let delta = self.scroll_delta(pointer.y, &metrics);
        if delta == 0.0 {
            return TickOutcome::Idle;
        }
        let from = metrics.scroll_offset;
        let to = (from + delta).clamp(0.0, metrics.max_offset());
        if to == from {
            return TickOutcome::Idle;
        }
        host.set_scroll_offset(kind, to);
        TickOutcome::Scrolled { from, to }
    }

    /// Signed scroll amount for one tick: negative toward the top edge,
    /// positive toward the bottom, zero outside both edge bands.
    ///
    /// Each band covers at most a third of the viewport so short lists keep
    /// a middle zone where the pointer can rest without scrolling.
    pub fn scroll_delta(&self, pointer_y: f32, metrics: &ContainerMetrics) -> f32 {
        let band = self
            .config
            .edge_band
            .min(metrics.viewport_height / MAX_BAND_SHARE);
        if band <= 0.0 {
            return 0.0;
        }
        let from_top = pointer_y - metrics.viewport_top;
        let from_bottom = metrics.viewport_top + metrics.viewport_height - pointer_y;
        if from_top < band && from_top <= from_bottom {
            -self.speed(1.0 - from_top / band)
        } else if from_bottom < band {
            self.speed(1.0 - from_bottom / band)
        } else {
            0.0
        }
    }

    /// Speed for edge closeness `t` (0 at the band's inner border, 1 at the
    /// edge). Monotonic in `t`.
    fn speed(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        let min = self.config.min_speed.max(0.0);
        let max = self.config.max_speed.max(min);
        let eased = t.powf(self.config.exponent.max(0.0));
        min + (max - min) * eased
    }
}
