use crate::TrendPoint;

/// Pixel geometry of the trend chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for PlotArea {
    fn default() -> Self {
        Self {
            width: 320.,
            height: 180.,
            padding: 16.,
        }
    }
}

impl PlotArea {
    /// Vertical band of the reps series as (y of minimum, y of maximum).
    #[must_use]
    pub fn reps_band(&self) -> (f64, f64) {
        (self.height / 2. - self.padding / 2., self.padding)
    }

    /// Vertical band of the weight series as (y of minimum, y of maximum).
    #[must_use]
    pub fn weight_band(&self) -> (f64, f64) {
        (self.height - self.padding, self.height / 2. + self.padding / 2.)
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn x_positions(&self, count: usize) -> Vec<f64> {
        if count == 1 {
            return vec![self.width / 2.];
        }
        let left = self.padding;
        let right = self.width - self.padding;
        (0..count)
            .map(|i| left + i as f64 * (right - left) / (count - 1) as f64)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub min: f64,
    pub max: f64,
    pub start: f64,
    pub end: f64,
}

impl LinearScale {
    /// Fit a scale to the value range of `values`, or `None` if there are no values.
    pub fn fit(values: impl IntoIterator<Item = f64>, (start, end): (f64, f64)) -> Option<Self> {
        let (min, max) = values.into_iter().fold(None, |bounds, v| match bounds {
            None => Some((v, v)),
            Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
        })?;
        Some(Self {
            min,
            max,
            start,
            end,
        })
    }

    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        if self.max > self.min {
            self.start + ((value - self.min) / (self.max - self.min)) * (self.end - self.start)
        } else {
            self.mid()
        }
    }

    #[must_use]
    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedPoint {
    pub point: TrendPoint,
    pub x: f64,
    pub reps_y: f64,
    pub weight_y: f64,
}

/// Reps and weight of a series laid out as two independently scaled lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendProjection {
    pub rep_scale: LinearScale,
    pub weight_scale: LinearScale,
    pub points: Vec<ProjectedPoint>,
    selected: usize,
}

impl TrendProjection {
    #[must_use]
    pub fn x_positions(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected_point(&self) -> &ProjectedPoint {
        &self.points[self.selected]
    }

    /// Select the point with the given key. The selection is kept if no point matches.
    pub fn select(&mut self, key: &str) -> bool {
        match self.points.iter().position(|p| p.point.key() == key) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn summary(&self) -> String {
        self.selected_point().point.summary()
    }
}

/// Lay out a filtered series for display.
///
/// Returns `None` for an empty series. The selected point is the one
/// matching `selected_key`, or the last point if there is no such point.
#[must_use]
pub fn project_trend(
    points: &[TrendPoint],
    selected_key: Option<&str>,
    area: &PlotArea,
) -> Option<TrendProjection> {
    let rep_scale = LinearScale::fit(points.iter().map(|p| p.reps), area.reps_band())?;
    let weight_scale = LinearScale::fit(points.iter().map(|p| p.weight), area.weight_band())?;

    let projected = points
        .iter()
        .zip(area.x_positions(points.len()))
        .map(|(point, x)| ProjectedPoint {
            point: point.clone(),
            x,
            reps_y: rep_scale.map(point.reps),
            weight_y: weight_scale.map(point.weight),
        })
        .collect::<Vec<_>>();

    let mut projection = TrendProjection {
        rep_scale,
        weight_scale,
        selected: projected.len() - 1,
        points: projected,
    };

    if let Some(key) = selected_key {
        projection.select(key);
    }

    Some(projection)
}
