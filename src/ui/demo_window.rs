//! Demo window: a gauge plus controls to feed it values and calibration

use anyhow::Error;
use gtk4::prelude::*;
use gtk4::{
    glib, Application, ApplicationWindow, Box as GtkBox, Button, CheckButton, Entry, Label,
    Orientation,
};
use log::{info, warn};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use flow_gauge_core::GaugeFrame;
use flow_gauge_render::FlowRenderer;

use crate::config::DemoSettings;
use crate::displayers::{FlowDisplayer, SharedGauge};
use crate::ui::demo_input::{
    parse_breakpoints, parse_labels, parse_ticks_between, parse_value, random_value,
};

/// Wires the demo controls to the gauge
pub struct DemoController {
    displayer: FlowDisplayer,
    gauge: SharedGauge,
    settings: RefCell<DemoSettings>,
    settings_path: Option<PathBuf>,
    value_entry: Entry,
    breakpoints_entry: Entry,
    labels_entry: Entry,
    ticks_entry: Entry,
    animate_check: CheckButton,
    reset_check: CheckButton,
    status_label: Label,
}

impl DemoController {
    fn value_flags(&self) -> (bool, bool) {
        (self.animate_check.is_active(), self.reset_check.is_active())
    }

    fn report(&self, message: &str) {
        info!("{}", message);
        self.status_label.set_text(message);
    }

    fn report_error(&self, err: Error) {
        warn!("{:#}", err);
        self.status_label.set_text(&format!("{:#}", err));
    }

    fn apply_value(&self, value: f64) {
        let (animate, reset) = self.value_flags();
        self.gauge.borrow_mut().set_value(value, animate, reset);
        self.displayer.request_frame();
        self.report(&format!("Value set to {}", value));
    }

    /// Set a random integer value within the gauge's range.
    pub fn set_random_value(&self) {
        let (min, max) = {
            let gauge = self.gauge.borrow();
            (gauge.min(), gauge.max())
        };
        let value = random_value(&mut rand::thread_rng(), min, max);
        self.apply_value(value);
    }

    /// Set the value typed into the value entry.
    pub fn set_entered_value(&self) {
        match parse_value(&self.value_entry.text()) {
            Ok(value) => self.apply_value(value),
            Err(e) => self.report_error(e),
        }
    }

    /// Apply the break-points, labels and tick count typed into the
    /// calibration entries.
    pub fn set_calibration(&self) {
        let breakpoints = match parse_breakpoints(&self.breakpoints_entry.text()) {
            Ok(b) => b,
            Err(e) => return self.report_error(e),
        };
        let ticks_between = match parse_ticks_between(&self.ticks_entry.text()) {
            Ok(t) => t,
            Err(e) => return self.report_error(e),
        };
        let labels = parse_labels(&self.labels_entry.text());

        let result = self.gauge.borrow_mut().set_calibration(
            breakpoints.clone(),
            labels.clone(),
            ticks_between,
        );
        if let Err(e) = result {
            return self.report_error(e.into());
        }
        self.displayer.request_frame();

        let mut settings = self.settings.borrow_mut();
        settings.breakpoints = breakpoints;
        settings.labels = labels.unwrap_or_default();
        settings.ticks_between = ticks_between;
        let gauge = self.gauge.borrow();
        self.report(&format!(
            "Calibration set: range [{}, {}], {} ticks",
            gauge.min(),
            gauge.max(),
            gauge.calibration().total_ticks()
        ));
    }

    /// Persist the current inputs.
    pub fn save_settings(&self) {
        let mut settings = self.settings.borrow_mut();
        let (animate, reset) = self.value_flags();
        settings.animate = animate;
        settings.reset_from_zero = reset;

        let result = match &self.settings_path {
            Some(path) => settings.save_to_path(path),
            None => settings.save(),
        };
        if let Err(e) = result {
            warn!("Failed to save settings: {:#}", e);
        }
    }
}

fn labeled_entry(row: &GtkBox, label: &str, text: &str, placeholder: &str) -> Entry {
    let label = Label::new(Some(label));
    label.set_width_chars(14);
    label.set_xalign(0.0);
    row.append(&label);

    let entry = Entry::builder()
        .text(text)
        .placeholder_text(placeholder)
        .hexpand(true)
        .build();
    row.append(&entry);
    entry
}

fn join_breakpoints(breakpoints: &[f64]) -> String {
    breakpoints
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn build_gauge(settings: &DemoSettings) -> GaugeFrame<FlowRenderer> {
    settings.build_gauge().unwrap_or_else(|e| {
        warn!("{:#}; starting without calibration", e);
        let mut gauge = GaugeFrame::new(FlowRenderer::new(settings.style.clone()));
        gauge.set_animation_duration(settings.animation_duration());
        gauge.set_info(settings.info.as_str());
        gauge.set_unit_info(settings.unit.as_str());
        gauge
    })
}

/// Build the demo window for `app`.
pub fn build_demo_window(
    app: &Application,
    settings: DemoSettings,
    settings_path: Option<PathBuf>,
    initial_value: Option<f64>,
) -> ApplicationWindow {
    let window = ApplicationWindow::builder()
        .application(app)
        .title("Flow Gauge")
        .default_width(settings.window_width)
        .default_height(settings.window_height)
        .build();

    let content = GtkBox::new(Orientation::Vertical, 6);
    content.set_margin_start(12);
    content.set_margin_end(12);
    content.set_margin_top(12);
    content.set_margin_bottom(12);

    let displayer = FlowDisplayer::new(build_gauge(&settings));
    content.append(&displayer.create_widget());

    // Value row
    let value_row = GtkBox::new(Orientation::Horizontal, 6);
    let value_entry = labeled_entry(&value_row, "Value:", "", "e.g. 420");
    let set_value_button = Button::with_label("Set value");
    let random_button = Button::with_label("Random");
    value_row.append(&set_value_button);
    value_row.append(&random_button);
    content.append(&value_row);

    let flags_row = GtkBox::new(Orientation::Horizontal, 12);
    let animate_check = CheckButton::with_label("Animate");
    animate_check.set_active(settings.animate);
    let reset_check = CheckButton::with_label("Reset from zero");
    reset_check.set_active(settings.reset_from_zero);
    flags_row.append(&animate_check);
    flags_row.append(&reset_check);
    content.append(&flags_row);

    // Calibration rows
    let breakpoints_row = GtkBox::new(Orientation::Horizontal, 6);
    let breakpoints_entry = labeled_entry(
        &breakpoints_row,
        "Break-points:",
        &join_breakpoints(&settings.breakpoints),
        "ascending integers",
    );
    content.append(&breakpoints_row);

    let labels_row = GtkBox::new(Orientation::Horizontal, 6);
    let labels_entry = labeled_entry(
        &labels_row,
        "Labels:",
        &settings.labels.join(" "),
        "one per break-point",
    );
    content.append(&labels_row);

    let ticks_row = GtkBox::new(Orientation::Horizontal, 6);
    let ticks_entry = labeled_entry(
        &ticks_row,
        "Small ticks:",
        &settings.ticks_between.to_string(),
        "between break-points",
    );
    let set_calibration_button = Button::with_label("Set calibration");
    ticks_row.append(&set_calibration_button);
    content.append(&ticks_row);

    let status_label = Label::new(None);
    status_label.set_xalign(0.0);
    status_label.set_wrap(true);
    content.append(&status_label);

    window.set_child(Some(&content));

    let controller = Rc::new(DemoController {
        gauge: displayer.gauge(),
        displayer,
        settings: RefCell::new(settings),
        settings_path,
        value_entry,
        breakpoints_entry,
        labels_entry,
        ticks_entry,
        animate_check,
        reset_check,
        status_label,
    });

    let c = controller.clone();
    set_value_button.connect_clicked(move |_| c.set_entered_value());
    let c = controller.clone();
    controller.value_entry.connect_activate(move |_| c.set_entered_value());
    let c = controller.clone();
    random_button.connect_clicked(move |_| c.set_random_value());
    let c = controller.clone();
    set_calibration_button.connect_clicked(move |_| c.set_calibration());

    let c = controller.clone();
    window.connect_close_request(move |_| {
        c.save_settings();
        glib::Propagation::Proceed
    });

    if let Some(value) = initial_value {
        controller.apply_value(value);
    }

    window
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_breakpoints_round_trips_through_parser() {
        let breakpoints = vec![350.0, 550.0, 600.0, -20.0];
        let text = join_breakpoints(&breakpoints);
        assert_eq!(text, "350 550 600 -20");
        assert_eq!(parse_breakpoints(&text).unwrap(), breakpoints);
    }

    #[test]
    fn test_invalid_settings_fall_back_to_uncalibrated_gauge() {
        let settings = DemoSettings {
            breakpoints: vec![3.0, 2.0, 1.0],
            unit: "GB".to_string(),
            ..DemoSettings::default()
        };
        let gauge = build_gauge(&settings);
        assert!(gauge.calibration().is_empty());
        assert_eq!(gauge.unit_info(), "GB");
        assert_eq!(gauge.max(), 1000.0);
    }
}
