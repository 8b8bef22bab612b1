//! Cursor readouts: what the probe reports at a world location

use std::fmt;

use pv_core::{LocationFormatter, ReadoutRow, ReadoutSample, ViewSurface, WorldLocation};
use tracing::warn;

mod overlay;

pub use overlay::{OverlayState, PanelWindow, ReadoutOverlay};

/// The rows contributed by all layers, in layer order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReadoutTable {
    pub rows: Vec<ReadoutRow>,
}

impl ReadoutTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the label column
    fn label_width(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.label.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// A complete readout: location header, optional separator, layer table.
///
/// The default value is the empty readout shown when there is nothing to
/// report (no location, or a layer failed).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Readout {
    pub header: String,
    /// Whether a separator sits between the header and the table
    pub separator: bool,
    pub table: ReadoutTable,
}

impl Readout {
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && !self.separator && self.table.is_empty()
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }

        write!(f, "{}", self.header)?;
        if self.separator {
            let width = self.header.chars().count().max(1);
            write!(f, "\n{}", "-".repeat(width))?;
        }

        let label_width = self.table.label_width();
        for row in &self.table.rows {
            write!(f, "\n{:<width$}  {}", format!("{}:", row.label), row.value, width = label_width + 1)?;
        }
        Ok(())
    }
}

/// Build the readout for `location` on `surface`.
///
/// The animation step is read once. When `include_displays` is set every
/// active layer is asked for its rows in layer order; any layer failure
/// discards the whole readout (and the samples gathered during this call)
/// and yields the empty readout.
pub fn compute_readout(
    surface: &dyn ViewSurface,
    formatter: &dyn LocationFormatter,
    location: Option<&WorldLocation>,
    include_displays: bool,
    include_altitude: bool,
    samples: &mut Vec<ReadoutSample>,
) -> Readout {
    let Some(location) = location else {
        return Readout::default();
    };

    let animation = surface.animation();
    let sample_mark = samples.len();
    let mut table = ReadoutTable::default();

    if include_displays {
        for layer in surface.active_layers() {
            match layer.readout_at(location, animation.time, animation.frame, samples) {
                Ok(rows) => table.rows.extend(rows),
                Err(e) => {
                    warn!(view = surface.name(), error = %e, "computing cursor readouts");
                    samples.truncate(sample_mark);
                    return Readout::default();
                }
            }
        }
    }

    Readout {
        header: formatter.format(location, include_altitude),
        separator: !table.is_empty(),
        table,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Test doubles shared by the readout, overlay and holder tests

    use parking_lot::{Mutex, RwLock};
    use pv_core::{
        AnimationState, OverlayLayer, ReadoutError, ReadoutRow, ReadoutSample, ScreenPoint,
        ViewBounds, ViewSurface, WorldLocation,
    };
    use std::sync::Arc;

    /// Layer answering with fixed rows, or failing
    pub struct FixedLayer {
        pub name: String,
        pub rows: Vec<ReadoutRow>,
        pub fail: bool,
        pub calls: Mutex<Vec<(f64, usize)>>,
    }

    impl FixedLayer {
        pub fn new(name: &str, rows: &[(&str, &str)]) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                rows: rows.iter().map(|(l, v)| ReadoutRow::new(*l, *v)).collect(),
                fail: false,
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn failing(name: &str) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                rows: Vec::new(),
                fail: true,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    impl OverlayLayer for FixedLayer {
        fn name(&self) -> &str {
            &self.name
        }

        fn readout_at(
            &self,
            location: &WorldLocation,
            time: f64,
            frame: usize,
            samples: &mut Vec<ReadoutSample>,
        ) -> Result<Vec<ReadoutRow>, ReadoutError> {
            self.calls.lock().push((time, frame));
            if self.fail {
                return Err(ReadoutError::layer(&self.name, "no data"));
            }
            samples.push(ReadoutSample {
                layer: self.name.clone(),
                value: self.rows.len() as f64,
                unit: None,
                location: *location,
                time,
                range: None,
            });
            Ok(self.rows.clone())
        }
    }

    /// Flat view mapping x to longitude and y to latitude, 1 degree per pixel
    pub struct FlatSurface {
        pub layers: RwLock<Vec<Arc<dyn OverlayLayer>>>,
        pub animation: AnimationState,
        pub bounds: RwLock<ViewBounds>,
        pub animation_reads: Mutex<usize>,
    }

    impl FlatSurface {
        pub fn new(layers: Vec<Arc<dyn OverlayLayer>>) -> Arc<Self> {
            Arc::new(Self {
                layers: RwLock::new(layers),
                animation: AnimationState { frame: 3, time: 7200.0 },
                bounds: RwLock::new(ViewBounds {
                    origin: ScreenPoint::new(100.0, 100.0),
                    width: 360.0,
                    height: 180.0,
                }),
                animation_reads: Mutex::new(0),
            })
        }
    }

    impl ViewSurface for FlatSurface {
        fn name(&self) -> &str {
            "Flat"
        }

        fn screen_to_world(&self, x: f32, y: f32) -> Result<WorldLocation, ReadoutError> {
            if !(0.0..=360.0).contains(&x) || !(0.0..=180.0).contains(&y) {
                return Err(ReadoutError::OffSurface { x, y });
            }
            Ok(WorldLocation::new(90.0 - y as f64, x as f64 - 180.0))
        }

        fn active_layers(&self) -> Vec<Arc<dyn OverlayLayer>> {
            self.layers.read().clone()
        }

        fn animation(&self) -> AnimationState {
            *self.animation_reads.lock() += 1;
            self.animation
        }

        fn screen_bounds(&self) -> ViewBounds {
            *self.bounds.read()
        }

        fn set_screen_bounds(&self, bounds: ViewBounds) {
            *self.bounds.write() = bounds;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{FixedLayer, FlatSurface};
    use super::*;
    use pv_core::LatLonFormatter;
    use std::sync::Arc;

    fn here() -> WorldLocation {
        WorldLocation::new(40.0, -105.0).with_altitude(1600.0)
    }

    #[test]
    fn test_no_location_is_empty() {
        let surface = FlatSurface::new(vec![FixedLayer::new("T", &[("T", "1")])]);
        let readout = compute_readout(surface.as_ref(), &LatLonFormatter::default(), None, true, true, &mut Vec::new());
        assert!(readout.is_empty());
        assert_eq!(readout.to_string(), "");
    }

    #[test]
    fn test_no_layers_has_header_and_empty_table() {
        let surface = FlatSurface::new(Vec::new());
        let formatter = LatLonFormatter::default();
        let readout = compute_readout(surface.as_ref(), &formatter, Some(&here()), true, true, &mut Vec::new());

        assert!(!readout.is_empty());
        assert_eq!(readout.header, formatter.format(&here(), true));
        assert!(!readout.separator);
        assert!(readout.table.is_empty());
        assert_eq!(readout.to_string(), readout.header);
    }

    #[test]
    fn test_single_separator_when_layers_report() {
        let surface = FlatSurface::new(vec![
            FixedLayer::new("Temperature", &[("Temperature", "21.5 C")]),
            FixedLayer::new("Empty", &[]),
            FixedLayer::new("Wind", &[("Speed", "4 m/s"), ("Direction", "270")]),
        ]);
        let readout = compute_readout(surface.as_ref(), &LatLonFormatter::default(), Some(&here()), true, false, &mut Vec::new());

        assert!(readout.separator);
        let labels: Vec<_> = readout.table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Temperature", "Speed", "Direction"]);

        let text = readout.to_string();
        let separators = text.lines().filter(|l| !l.is_empty() && l.chars().all(|c| c == '-')).count();
        assert_eq!(separators, 1);
        assert_eq!(text.lines().count(), 5);
    }

    #[test]
    fn test_empty_layers_insert_no_separator() {
        let surface = FlatSurface::new(vec![FixedLayer::new("Empty", &[])]);
        let readout = compute_readout(surface.as_ref(), &LatLonFormatter::default(), Some(&here()), true, true, &mut Vec::new());
        assert!(!readout.separator);
        assert!(!readout.to_string().contains("--"));
    }

    #[test]
    fn test_failure_discards_partial_output() {
        let first = FixedLayer::new("First", &[("First", "1")]);
        let third = FixedLayer::new("Third", &[("Third", "3")]);
        let surface = FlatSurface::new(vec![first.clone(), FixedLayer::failing("Second"), third.clone()]);

        let mut samples = Vec::new();
        let readout = compute_readout(surface.as_ref(), &LatLonFormatter::default(), Some(&here()), true, true, &mut samples);

        assert!(readout.is_empty());
        assert_eq!(readout.to_string(), "");
        assert!(samples.is_empty());
        assert_eq!(first.calls.lock().len(), 1);
        assert!(third.calls.lock().is_empty());
    }

    #[test]
    fn test_displays_excluded() {
        let layer = FixedLayer::new("T", &[("T", "1")]);
        let surface = FlatSurface::new(vec![layer.clone()]);
        let readout = compute_readout(surface.as_ref(), &LatLonFormatter::default(), Some(&here()), false, true, &mut Vec::new());

        assert!(!readout.separator);
        assert!(layer.calls.lock().is_empty());
    }

    #[test]
    fn test_animation_read_once_and_passed_to_layers() {
        let a = FixedLayer::new("A", &[("A", "1")]);
        let b = FixedLayer::new("B", &[("B", "2")]);
        let surface = FlatSurface::new(vec![a.clone(), b.clone()]);

        let mut samples = Vec::new();
        compute_readout(surface.as_ref(), &LatLonFormatter::default(), Some(&here()), true, true, &mut samples);

        assert_eq!(*surface.animation_reads.lock(), 1);
        assert_eq!(*a.calls.lock(), vec![(7200.0, 3)]);
        assert_eq!(*b.calls.lock(), vec![(7200.0, 3)]);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].layer, "A");
    }

    #[test]
    fn test_table_columns_aligned() {
        let surface = FlatSurface::new(vec![Arc::new(FixedLayer {
            name: "Mixed".to_string(),
            rows: vec![ReadoutRow::new("T", "1"), ReadoutRow::new("Pressure", "1013 hPa")],
            fail: false,
            calls: Default::default(),
        }) as Arc<dyn pv_core::OverlayLayer>]);
        let readout = compute_readout(surface.as_ref(), &|_: &WorldLocation, _: bool| "hdr".to_string(), Some(&here()), true, true, &mut Vec::new());

        assert_eq!(readout.to_string(), "hdr\n---\nT:         1\nPressure:  1013 hPa");
    }
}
