//! Flow gauge displayer - hosts a `GaugeFrame` in a GTK `DrawingArea`
//!
//! The frame clock only runs while the gauge needs frames. Once an
//! animation settles the tick callback removes itself; `request_frame`
//! attaches it again after the gauge changes.

use gtk4::{glib, prelude::*, DrawingArea};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;

use flow_gauge_core::GaugeFrame;
use flow_gauge_render::{CairoSurface, FlowRenderer};
use flow_gauge_types::Rect;

/// Shared handle to the gauge; the widget callbacks and the demo controls
/// all run on the GTK main thread.
pub type SharedGauge = Rc<RefCell<GaugeFrame<FlowRenderer>>>;

/// Outcome of one frame clock tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStep {
    pub redraw: bool,
    pub keep_ticking: bool,
}

#[derive(Default)]
struct FrameState {
    widget: RefCell<Option<glib::WeakRef<DrawingArea>>>,
    /// Whether a tick callback is attached
    ticking: Cell<bool>,
    /// Bounds that arrived while the gauge was borrowed
    pending_bounds: Cell<Option<Rect>>,
}

#[derive(Clone)]
pub struct FlowDisplayer {
    gauge: SharedGauge,
    state: Rc<FrameState>,
}

impl FlowDisplayer {
    pub fn new(gauge: GaugeFrame<FlowRenderer>) -> Self {
        Self {
            gauge: Rc::new(RefCell::new(gauge)),
            state: Rc::new(FrameState::default()),
        }
    }

    pub fn gauge(&self) -> SharedGauge {
        self.gauge.clone()
    }

    /// Whether the frame clock callback is currently attached.
    pub fn is_ticking(&self) -> bool {
        self.state.ticking.get()
    }

    /// Apply new drawable bounds, or keep them for the next tick if the
    /// gauge is busy.
    pub fn set_bounds(&self, bounds: Rect) {
        match self.gauge.try_borrow_mut() {
            Ok(mut gauge) => gauge.on_bounds_changed(bounds),
            Err(_) => {
                log::debug!("Gauge busy, deferring bounds {:?}", bounds);
                self.state.pending_bounds.set(Some(bounds));
            }
        }
        self.request_frame();
    }

    /// Advance the gauge to `now`.
    pub fn advance(&self, now: Instant) -> FrameStep {
        let Ok(mut gauge) = self.gauge.try_borrow_mut() else {
            // Try again next frame
            return FrameStep {
                redraw: false,
                keep_ticking: true,
            };
        };
        if let Some(bounds) = self.state.pending_bounds.take() {
            gauge.on_bounds_changed(bounds);
        }
        let redraw = gauge.tick(now);
        FrameStep {
            redraw,
            keep_ticking: gauge.needs_frame() || self.state.pending_bounds.get().is_some(),
        }
    }

    /// Make sure the frame clock runs until the gauge settles. Call after
    /// changing the gauge.
    pub fn request_frame(&self) {
        let widget = self
            .state
            .widget
            .borrow()
            .as_ref()
            .and_then(|w| w.upgrade());
        if let Some(widget) = widget {
            self.attach_tick(&widget);
        }
    }

    fn attach_tick(&self, widget: &DrawingArea) {
        if self.state.ticking.replace(true) {
            return;
        }
        let this = self.clone();
        // Synchronized with the display refresh through the frame clock
        widget.add_tick_callback(move |area, _frame_clock| {
            let step = this.advance(Instant::now());
            if step.redraw {
                area.queue_draw();
            }
            if step.keep_ticking {
                glib::ControlFlow::Continue
            } else {
                this.state.ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }

    pub fn create_widget(&self) -> DrawingArea {
        let drawing_area = DrawingArea::new();

        // Gauges look best in square layouts
        drawing_area.set_size_request(200, 200);
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);

        *self.state.widget.borrow_mut() = Some(drawing_area.downgrade());

        let this = self.clone();
        drawing_area.connect_resize(move |_, width, height| {
            this.set_bounds(Rect::from_size(width as f64, height as f64));
        });

        let gauge = self.gauge.clone();
        drawing_area.set_draw_func(move |_, cr, _width, _height| {
            // Skip the frame if a control handler holds the gauge; the next
            // tick redraws
            let Ok(gauge) = gauge.try_borrow() else {
                return;
            };
            gauge.on_frame(&mut CairoSurface::new(cr));
        });

        self.attach_tick(&drawing_area);

        drawing_area
    }
}
