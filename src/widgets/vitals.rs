//! System vitals panel: two gauges fed by a metric simulator.
//!
//! The widget owns its [`MetricSimulator`] and both gauges. Every new snapshot
//! retargets the gauges, which then sweep to the new value over
//! [`GAUGE_TRANSITION_MS`](crate::config::GAUGE_TRANSITION_MS).

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use tracing::{debug, warn};

use super::{gauge::draw_gauge, panel::PanelShell};
use crate::{
    colors::{BLUE, INDIGO},
    gauge::{AnimatedGauge, GaugeReading, GaugeRenderer},
    random::RandomSource,
    simulator::{MetricSimulator, VitalsSnapshot},
};

pub const CPU_LABEL: &str = "CPU";
pub const MEMORY_LABEL: &str = "MEMORY";

/// Panel title.
const TITLE: &str = "System Vitals";

/// Vertical position of the gauge centers within the content area.
const GAUGE_ROW_FRACTION: f32 = 0.42;

/// Panel owning a simulator and its CPU/memory gauges.
pub struct SystemVitals<R: RandomSource> {
    panel: PanelShell,
    simulator: MetricSimulator<R>,
    cpu: AnimatedGauge,
    memory: AnimatedGauge,
}

impl<R: RandomSource> SystemVitals<R> {
    /// Create a stopped widget covering `bounds`.
    pub fn new(
        bounds: Rectangle,
        simulator: MetricSimulator<R>,
    ) -> Self {
        Self {
            panel: PanelShell::titled(bounds, TITLE),
            simulator,
            cpu: AnimatedGauge::new(GaugeRenderer::default(), CPU_LABEL, INDIGO),
            memory: AnimatedGauge::new(GaugeRenderer::default(), MEMORY_LABEL, BLUE),
        }
    }

    /// Start sampling; the first snapshot is applied immediately.
    pub fn start(
        &mut self,
        now_ms: u64,
    ) {
        if let Some(snapshot) = self.simulator.start(now_ms) {
            self.apply(snapshot, now_ms);
        }
    }

    /// Run due simulator ticks. Returns `true` if the gauges were retargeted.
    pub fn update(
        &mut self,
        now_ms: u64,
    ) -> bool {
        match self.simulator.poll(now_ms) {
            Some(snapshot) => {
                self.apply(snapshot, now_ms);
                true
            }
            None => false,
        }
    }

    /// Apply any tick due at `now_ms`, then stop sampling. The gauges keep
    /// their last values.
    pub fn stop(
        &mut self,
        now_ms: u64,
    ) -> bool {
        self.update(now_ms);
        self.simulator.stop(now_ms)
    }

    fn apply(
        &mut self,
        snapshot: VitalsSnapshot,
        now_ms: u64,
    ) {
        debug!(tick = snapshot.tick, cpu = snapshot.cpu, memory = snapshot.memory, "vitals updated");
        for (gauge, value) in [(&mut self.cpu, snapshot.cpu), (&mut self.memory, snapshot.memory)] {
            let renderer = *gauge.renderer();
            match GaugeReading::new(value as f32, renderer.max(), gauge.view().label, gauge.view().color) {
                Ok(reading) => gauge.set_reading(&reading, now_ms),
                Err(err) => warn!(%err, "rejected gauge reading"),
            }
        }
    }

    #[inline]
    pub const fn simulator(&self) -> &MetricSimulator<R> { &self.simulator }

    #[inline]
    pub const fn cpu(&self) -> &AnimatedGauge { &self.cpu }

    #[inline]
    pub const fn memory(&self) -> &AnimatedGauge { &self.memory }

    #[inline]
    pub const fn panel(&self) -> &PanelShell { &self.panel }

    /// Gauge centers at rest, CPU first.
    pub fn gauge_centers(&self) -> [Point; 2] {
        let area = self.panel.content_area();
        let y = area.top_left.y + (area.size.height as f32 * GAUGE_ROW_FRACTION) as i32;
        let quarter = area.size.width as i32 / 4;
        [
            Point::new(area.top_left.x + quarter, y),
            Point::new(area.top_left.x + quarter * 3, y),
        ]
    }

    /// Draw the panel and both gauges at `now_ms`.
    pub fn draw<D>(
        &self,
        display: &mut D,
        now_ms: u64,
        offset: Point,
        visibility: f32,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.panel.draw(display, offset, visibility);
        let [cpu_center, memory_center] = self.gauge_centers();
        draw_gauge(display, cpu_center + offset, &self.cpu.view_at(now_ms), visibility);
        draw_gauge(display, memory_center + offset, &self.memory.view_at(now_ms), visibility);
    }
}
