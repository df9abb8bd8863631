//! # Engine Orchestration
//!
//! Frame N:
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │ 1. DRAIN EVENTS   resize / text change → re-enter Measuring        │
//! │ 2. COMPLETE FIT   deferred phase-B measurement (paint boundary)    │
//! │ 3. SMOOTH         smoothed += (raw - smoothed) / 15                │
//! │ 4. MEASURE        re-query every glyph box, recompute centers      │
//! │ 5. MAP            distance → stretch/weight/slant/opacity          │
//! │ 6. RENDER         batch commands, hand to the surface              │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Single-writer discipline: host listeners write the raw pointer cell; the
//! loop is its only reader and the only writer of the smoothed position and
//! of glyph attribute state. Structural events are queued, never handled
//! inside the notification.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use glyphpress_core::Vec2;

use crate::attr::{AttributeMapper, AxisToggles};
use crate::config::PressureConfig;
use crate::error::EngineResult;
use crate::events::{EventBus, EventSender, StructuralEvent};
use crate::fit::{measured_height, LayoutFitter, PendingFit};
use crate::glyph::TextBlock;
use crate::pointer::{PointerHandle, PointerTracker};
use crate::render::Renderer;
use crate::smoothing::Smoother;
use crate::surface::{FrameClock, PressureSurface};

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, not yet mounted.
    Uninitialized,
    /// Mounted with a fit in flight; the loop keeps rendering with
    /// last-known attributes until the fit lands.
    Measuring,
    /// Mounted, fit settled, loop live.
    Running,
    /// Torn down; listeners severed, no further tick executes.
    Disposed,
}

/// Cancellation token for the animation loop.
///
/// Cloneable; any holder may cancel. Checked at every loop iteration, so
/// once issued no further tick executes - even one already scheduled.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    /// Shared cancelled flag.
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true once cancellation has been issued.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Frame timing statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    /// Frames recorded.
    pub frames: u64,
    /// Sum of frame times in microseconds.
    pub total_us: u64,
    /// Slowest frame in microseconds.
    pub max_frame_us: u64,
}

impl FrameStats {
    /// Records one frame.
    pub fn record(&mut self, frame_us: u64) {
        self.frames += 1;
        self.total_us += frame_us;
        self.max_frame_us = self.max_frame_us.max(frame_us);
    }

    /// Average frame time in milliseconds.
    #[must_use]
    pub fn avg_frame_ms(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        (self.total_us as f64 / self.frames as f64) / 1000.0
    }
}

/// The engine: one text block reacting to one shared pointer signal.
pub struct PressureEngine<S: PressureSurface> {
    /// Engine configuration.
    config: PressureConfig,
    /// Host measurement and rendering surface.
    surface: S,
    /// Lifecycle state.
    state: EngineState,
    /// Raw pointer cell written by host listeners.
    tracker: PointerTracker,
    /// Smoothed pointer, owned by the loop.
    smoother: Smoother,
    /// Glyph run and sizing state.
    block: TextBlock,
    /// Fitting math.
    fitter: LayoutFitter,
    /// Distance-to-attribute mapping.
    mapper: AttributeMapper,
    /// Command batching.
    renderer: Renderer,
    /// Structural event channel; dropped on dispose to sever senders.
    events: Option<EventBus>,
    /// Fit awaiting its phase-B measurement.
    pending_fit: Option<PendingFit>,
    /// Block posture needs re-emitting this frame.
    block_dirty: bool,
    /// Loop cancellation token.
    cancel: CancelToken,
    /// Frame timing.
    stats: FrameStats,
}

impl<S: PressureSurface> PressureEngine<S> {
    /// Creates an engine over the given surface.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration fails validation.
    pub fn new(config: PressureConfig, surface: S) -> EngineResult<Self> {
        config.validate()?;

        let block = TextBlock::new(&config.text, config.min_font_size);
        let fitter = LayoutFitter::new(config.min_font_size, config.scale);
        let mapper = AttributeMapper::new(AxisToggles {
            width: config.width,
            weight: config.weight,
            italic: config.italic,
            alpha: config.alpha,
        });
        let renderer = Renderer::new(&config);

        tracing::debug!(
            glyphs = block.glyph_count(),
            vertical_fit = config.scale,
            "engine created"
        );

        Ok(Self {
            config,
            surface,
            state: EngineState::Uninitialized,
            tracker: PointerTracker::new(),
            smoother: Smoother::new(Vec2::ZERO),
            block,
            fitter,
            mapper,
            renderer,
            events: Some(EventBus::new()),
            pending_fit: None,
            block_dirty: false,
            cancel: CancelToken::new(),
            stats: FrameStats::default(),
        })
    }

    /// Mounts the engine: seeds the pointer, runs the fitter, arms the loop.
    ///
    /// A second mount is a no-op.
    pub fn mount(&mut self) {
        if self.state != EngineState::Uninitialized {
            tracing::warn!(state = ?self.state, "mount ignored");
            return;
        }
        self.state = EngineState::Measuring;

        if let Some(container) = self.surface.container_rect() {
            let center = container.center();
            self.tracker.seed(center);
            self.smoother.set_immediate(center);
        }

        self.begin_fit();
        if self.pending_fit.is_none() {
            self.state = EngineState::Running;
        }
        tracing::info!(glyphs = self.block.glyph_count(), "engine mounted");
    }

    /// Returns a handle for host pointer/touch listeners.
    #[must_use]
    pub fn pointer(&self) -> PointerHandle {
        self.tracker.handle()
    }

    /// Returns a sender for host resize/text-change notifications.
    ///
    /// Sends after disposal fail harmlessly.
    #[must_use]
    pub fn events(&self) -> Option<EventSender> {
        self.events.as_ref().map(EventBus::sender)
    }

    /// Returns the loop cancellation token.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns the lifecycle state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PressureConfig {
        &self.config
    }

    /// Returns the text block.
    #[must_use]
    pub fn block(&self) -> &TextBlock {
        &self.block
    }

    /// Returns the host surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Returns mutable access to the host surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Returns accumulated frame statistics.
    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Starts a fit: phase A now, phase B (if vertical-fit) next frame.
    ///
    /// No container geometry means no fit; the frame no-ops and a later
    /// resize event retries.
    fn begin_fit(&mut self) {
        let Some(container) = self.surface.container_rect() else {
            tracing::debug!("fit skipped: no container geometry");
            return;
        };
        self.block.container = container;

        let base = self
            .fitter
            .base_font_size(container.width, self.block.glyph_count());
        self.block.base_font_size = base;

        if self.fitter.vertical_fit() {
            // Keep the pre-reset scale across back-to-back refits so a
            // degenerate measurement can restore it.
            let prev = self
                .pending_fit
                .map_or(self.block.scale_y, |p| p.prev_scale);
            self.pending_fit = Some(PendingFit::new(prev));
        } else {
            self.pending_fit = None;
        }
        self.block.scale_y = 1.0;
        self.block.line_height = 1.0;
        self.block_dirty = true;

        if self.state == EngineState::Running && self.pending_fit.is_some() {
            self.state = EngineState::Measuring;
        }
        tracing::debug!(base_font_size = base, "fit phase A applied");
    }

    /// Completes a pending fit once its paint boundary has passed.
    fn complete_pending_fit(&mut self) {
        let Some(mut pending) = self.pending_fit else {
            return;
        };
        if !pending.ready() {
            self.pending_fit = Some(pending);
            return;
        }

        let measured = measured_height(self.surface.block_rect());
        let container_h = self.block.container.height;
        let scale = self
            .fitter
            .vertical_scale(container_h, measured, pending.prev_scale);

        if measured <= 0.0 || container_h <= 0.0 {
            tracing::warn!(
                measured,
                container_h,
                "degenerate fit measurement, keeping previous scale"
            );
        }
        self.block.scale_y = scale;
        self.block.line_height = scale;
        self.block_dirty = true;
        self.pending_fit = None;
        self.state = EngineState::Running;
        tracing::debug!(scale_y = scale, "fit phase B complete");
    }

    /// Drains queued structural events.
    fn drain_events(&mut self) {
        let mut pending = Vec::new();
        if let Some(bus) = &self.events {
            while let Some(event) = bus.try_recv() {
                pending.push(event);
            }
        }
        for event in pending {
            match event {
                StructuralEvent::Resized { container } => {
                    self.block.container = container;
                    self.begin_fit();
                }
                StructuralEvent::TextChanged { text } => {
                    self.block.rebuild(&text);
                    self.config.text = text;
                    self.begin_fit();
                }
            }
        }
    }

    /// Re-queries every glyph's live bounding box and recomputes centers.
    ///
    /// Required every frame: prior attribute changes may have shifted
    /// layout. A missing box leaves that glyph's center untouched.
    fn update_geometry(&mut self) {
        for index in 0..self.block.glyph_count() {
            if let Some(rect) = self.surface.glyph_rect(index) {
                self.block.glyphs_mut()[index].center = rect.center();
            }
        }
    }

    /// Maps pointer distance to attributes for every glyph.
    fn map_attributes(&mut self, pointer: Vec2) {
        let Some(block_rect) = self.surface.block_rect() else {
            return;
        };
        let max_distance = block_rect.width / 2.0;
        for glyph in self.block.glyphs_mut() {
            glyph.attrs = self.mapper.map(glyph.center, pointer, max_distance);
        }
    }

    /// Batches and applies this frame's render commands.
    fn render_frame(&mut self) {
        self.renderer.begin_frame();
        if self.block_dirty {
            self.renderer.push_block(
                self.block.base_font_size,
                self.block.line_height,
                self.block.scale_y,
            );
            self.block_dirty = false;
        }
        for glyph in self.block.glyphs() {
            self.renderer.push_glyph(glyph);
        }
        self.surface.apply(self.renderer.commands());
    }

    /// Runs one frame of the pipeline.
    ///
    /// No-op unless mounted; no-op after cancellation or disposal.
    pub fn tick(&mut self) {
        if !matches!(self.state, EngineState::Measuring | EngineState::Running)
            || self.cancel.is_cancelled()
        {
            return;
        }
        let start = Instant::now();

        self.drain_events();
        self.complete_pending_fit();

        let raw = self.tracker.get();
        let pointer = self.smoother.advance(raw);

        self.update_geometry();
        self.map_attributes(pointer);
        self.render_frame();

        self.stats.record(start.elapsed().as_micros() as u64);
    }

    /// Drives the loop against a frame clock until cancelled.
    ///
    /// The token is checked before every tick; once cancellation is issued,
    /// no further tick executes. Disposes the engine on exit.
    pub fn run<C: FrameClock>(&mut self, clock: &mut C) {
        while !self.cancel.is_cancelled() && self.state != EngineState::Disposed {
            self.tick();
            clock.wait_next_frame();
        }
        self.dispose();
    }

    /// Tears the engine down.
    ///
    /// Cancels the loop and severs listener channels in one step; there is
    /// no partial-teardown state. Pointer handles still held by the host
    /// keep writing into a private cell nothing reads. Idempotent.
    pub fn dispose(&mut self) {
        if self.state == EngineState::Disposed {
            return;
        }
        self.cancel.cancel();
        self.events = None;
        self.state = EngineState::Disposed;
        tracing::info!(frames = self.stats.frames, "engine disposed");
    }
}

impl<S: PressureSurface> Drop for PressureEngine<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessSurface;
    use glyphpress_core::Rect;

    fn engine(config: PressureConfig, container: Rect) -> PressureEngine<HeadlessSurface> {
        let surface = HeadlessSurface::new(container, &config.text);
        PressureEngine::new(config, surface).unwrap()
    }

    #[test]
    fn test_mount_transitions_to_running() {
        let mut engine = engine(PressureConfig::default(), Rect::new(0.0, 0.0, 800.0, 400.0));
        assert_eq!(engine.state(), EngineState::Uninitialized);

        engine.mount();
        assert_eq!(engine.state(), EngineState::Running);

        // Repeated mounts are ignored.
        engine.mount();
        assert_eq!(engine.state(), EngineState::Running);
    }

    #[test]
    fn test_mount_with_vertical_fit_measures_first() {
        let config = PressureConfig {
            scale: true,
            ..Default::default()
        };
        let mut engine = engine(config, Rect::new(0.0, 0.0, 800.0, 400.0));
        engine.mount();
        assert_eq!(engine.state(), EngineState::Measuring);

        // Phase A lands on the first tick, phase B on the second.
        engine.tick();
        assert_eq!(engine.state(), EngineState::Measuring);
        engine.tick();
        assert_eq!(engine.state(), EngineState::Running);
        assert!(engine.block().scale_y > 1.0);
    }

    #[test]
    fn test_resize_reenters_measuring_without_stopping() {
        let config = PressureConfig {
            scale: true,
            ..Default::default()
        };
        let mut engine = engine(config, Rect::new(0.0, 0.0, 800.0, 400.0));
        engine.mount();
        for _ in 0..3 {
            engine.tick();
        }
        assert_eq!(engine.state(), EngineState::Running);

        let sender = engine.events().unwrap();
        engine
            .surface_mut()
            .set_container(Rect::new(0.0, 0.0, 400.0, 200.0));
        assert!(sender.send(StructuralEvent::Resized {
            container: Rect::new(0.0, 0.0, 400.0, 200.0),
        }));

        engine.tick();
        assert_eq!(engine.state(), EngineState::Measuring);
        // The loop kept rendering while measuring.
        assert!(engine.surface().frames_applied() > 3);

        engine.tick();
        assert_eq!(engine.state(), EngineState::Running);
        assert_eq!(engine.block().base_font_size, 400.0 / (9.0 / 2.0));
    }

    #[test]
    fn test_text_change_rebuilds_glyphs() {
        let mut engine = engine(PressureConfig::default(), Rect::new(0.0, 0.0, 800.0, 400.0));
        engine.mount();
        assert_eq!(engine.block().glyph_count(), 9); // "Compressa"

        let sender = engine.events().unwrap();
        engine.surface_mut().set_text("AB");
        assert!(sender.send(StructuralEvent::TextChanged {
            text: "AB".to_string(),
        }));
        engine.tick();

        assert_eq!(engine.block().glyph_count(), 2);
        assert_eq!(engine.block().base_font_size, 800.0);
    }

    #[test]
    fn test_dispose_is_deterministic_and_idempotent() {
        let mut engine = engine(PressureConfig::default(), Rect::new(0.0, 0.0, 800.0, 400.0));
        engine.mount();
        engine.tick();
        let frames = engine.surface().frames_applied();

        let token = engine.cancel_token();
        token.cancel();
        engine.tick();
        assert_eq!(engine.surface().frames_applied(), frames);

        engine.dispose();
        assert_eq!(engine.state(), EngineState::Disposed);
        assert!(engine.events().is_none());
        engine.dispose();
        assert_eq!(engine.state(), EngineState::Disposed);
    }

    #[test]
    fn test_run_stops_on_cancellation() {
        let mut engine = engine(PressureConfig::default(), Rect::new(0.0, 0.0, 800.0, 400.0));
        engine.mount();

        // Cancel from "outside" after a bounded number of frames.
        struct CountdownClock {
            remaining: u32,
            token: CancelToken,
        }
        impl FrameClock for CountdownClock {
            fn wait_next_frame(&mut self) {
                self.remaining -= 1;
                if self.remaining == 0 {
                    self.token.cancel();
                }
            }
        }

        let mut clock = CountdownClock {
            remaining: 10,
            token: engine.cancel_token(),
        };
        engine.run(&mut clock);

        assert_eq!(engine.state(), EngineState::Disposed);
        assert_eq!(engine.stats().frames, 10);
    }

    #[test]
    fn test_smoothed_pointer_drives_attributes() {
        let mut engine = engine(PressureConfig::default(), Rect::new(0.0, 0.0, 900.0, 300.0));
        engine.mount();

        let pointer = engine.pointer();
        pointer.pointer_moved(50.0, 100.0);

        engine.tick();
        engine.tick();

        // Glyph 0 sits closest to the pointer; it must outweigh glyph 8.
        let glyphs = engine.block().glyphs();
        assert!(glyphs[0].attrs.weight > glyphs[8].attrs.weight);
        assert!(glyphs[0].attrs.stretch > glyphs[8].attrs.stretch);
    }
}
