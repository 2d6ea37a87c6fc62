//! Span overlays for marks on the chart.

use eframe::egui::{Color32, Stroke};
use egui_plot::{PlotUi, Polygon, VLine};
use h5mark_core::MarkCollection;

use crate::util::{mark_fill_color, to_color32};

/// Vertical extent used when the dataset has no Y values.
const FALLBACK_Y: (f64, f64) = (0.0, 1.0);

/// One drawn span, derived from a mark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanOverlay {
    pub xmin: f64,
    pub xmax: f64,
    pub fill: Color32,
    pub edge: Color32,
}

/// Keeps one overlay per mark, in collection order.
///
/// Overlays are a derived view and are rebuilt in full on every sync.
#[derive(Debug, Default)]
pub struct PlotOverlayManager {
    overlays: Vec<SpanOverlay>,
}

impl PlotOverlayManager {
    /// Drops every overlay and creates one per mark.
    pub fn sync(&mut self, marks: &MarkCollection) {
        self.overlays.clear();
        self.overlays.extend(marks.iter().map(|mark| SpanOverlay {
            xmin: mark.xmin(),
            xmax: mark.xmax(),
            fill: mark_fill_color(mark.color()),
            edge: to_color32(mark.color().with_alpha_f(1.0)),
        }));
    }

    pub fn overlays(&self) -> &[SpanOverlay] {
        &self.overlays
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Paints every overlay as a band covering `y_range`.
    pub fn draw(&self, plot_ui: &mut PlotUi, y_range: Option<(f64, f64)>) {
        for overlay in &self.overlays {
            draw_span(
                plot_ui,
                (overlay.xmin, overlay.xmax),
                y_range,
                overlay.fill,
                overlay.edge,
            );
        }
    }
}

/// Paints a filled vertical band with edge lines.
pub fn draw_span(
    plot_ui: &mut PlotUi,
    (xmin, xmax): (f64, f64),
    y_range: Option<(f64, f64)>,
    fill: Color32,
    edge: Color32,
) {
    let (ymin, ymax) = y_range.unwrap_or(FALLBACK_Y);
    let points = vec![[xmin, ymin], [xmax, ymin], [xmax, ymax], [xmin, ymax]];
    plot_ui.polygon(
        Polygon::new(points)
            .stroke(Stroke::new(0.0, Color32::TRANSPARENT))
            .fill_color(fill),
    );
    plot_ui.vline(VLine::new(xmin).color(edge).width(1.0));
    plot_ui.vline(VLine::new(xmax).color(edge).width(1.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use h5mark_core::{Mark, Rgba};

    fn marks(spans: &[(f64, f64, Rgba)]) -> MarkCollection {
        MarkCollection::from_marks(
            spans
                .iter()
                .map(|&(lo, hi, color)| Mark::new(lo, hi, color).unwrap())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_sync_is_one_to_one() {
        let mut manager = PlotOverlayManager::default();
        let collection = marks(&[(0.0, 1.0, Rgba::RED), (2.0, 3.0, Rgba::BLUE)]);
        manager.sync(&collection);

        assert_eq!(manager.len(), collection.len());
        for (overlay, mark) in manager.overlays().iter().zip(collection.iter()) {
            assert_eq!((overlay.xmin, overlay.xmax), (mark.xmin(), mark.xmax()));
        }

        manager.sync(&MarkCollection::new());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_fill_alpha_is_fixed() {
        let mut manager = PlotOverlayManager::default();
        let translucent = Rgba::GREEN.with_alpha_f(0.2);
        manager.sync(&marks(&[(0.0, 1.0, translucent), (1.0, 2.0, Rgba::GREEN)]));

        let fills: Vec<u8> = manager.overlays().iter().map(|o| o.fill.a()).collect();
        assert_eq!(fills, vec![128, 128]);
        assert_eq!(manager.overlays()[0].edge, to_color32(Rgba::GREEN));
    }

    #[test]
    fn test_sync_follows_deletions() {
        let mut collection = marks(&[(0.0, 1.0, Rgba::RED), (2.0, 3.0, Rgba::BLUE)]);
        let mut manager = PlotOverlayManager::default();
        manager.sync(&collection);

        collection.delete(0).unwrap();
        manager.sync(&collection);
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.overlays()[0].xmin, 2.0);
    }
}
