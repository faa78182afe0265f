//! Built-in demo datasets.
//!
//! The demo project seeds each sheet with the classic experiment-vs-model
//! example: measured points next to a slightly offset model prediction over
//! the same x range. With `noise > 0` the y values get reproducible gaussian
//! jitter, which is useful for producing larger throwaway datasets.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{DatasetKind, Project, SheetLayout};
use crate::error::AppError;
use crate::sheet::Grid;

pub const DEMO_ROWS: usize = 10;
pub const DEMO_SEED: u64 = 42;

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub layout: SheetLayout,
    pub rows: usize,
    pub noise: f64,
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            layout: SheetLayout::PerSeries,
            rows: DEMO_ROWS,
            noise: 0.0,
            seed: DEMO_SEED,
        }
    }
}

impl DemoConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.rows == 0 {
            return Err(AppError::new(2, "Demo rows must be > 0."));
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(AppError::new(2, "Demo noise must be a finite value >= 0."));
        }
        Ok(())
    }
}

struct Seed {
    label: &'static str,
    x: &'static [f64],
    y: &'static [f64],
}

const X_BASE: &[f64] = &[1.0, 2.0, 3.0, 4.0, 5.0];
const X_SHIFTED: &[f64] = &[1.5, 2.5, 3.5, 4.5, 5.5];

fn seeds(layout: SheetLayout, kind: DatasetKind) -> &'static [Seed] {
    match (layout, kind) {
        (SheetLayout::Shared, DatasetKind::Experiment) => &[Seed {
            label: "Exp1",
            x: X_BASE,
            y: &[10.0, 15.0, 13.0, 17.0, 20.0],
        }],
        (SheetLayout::Shared, DatasetKind::Model) => &[Seed {
            label: "Model1",
            x: X_BASE,
            y: &[9.0, 14.0, 13.5, 16.8, 19.5],
        }],
        (SheetLayout::PerSeries, DatasetKind::Experiment) => &[
            Seed {
                label: "Exp-Series1",
                x: X_BASE,
                y: &[10.0, 15.0, 13.0, 17.0, 20.0],
            },
            Seed {
                label: "Exp-Series2",
                x: X_SHIFTED,
                y: &[11.0, 16.0, 14.0, 18.0, 21.0],
            },
        ],
        (SheetLayout::PerSeries, DatasetKind::Model) => &[
            Seed {
                label: "Model-Series1",
                x: X_BASE,
                y: &[9.0, 14.0, 13.5, 16.8, 19.5],
            },
            Seed {
                label: "Model-Series2",
                x: X_SHIFTED,
                y: &[10.5, 15.5, 13.0, 17.5, 20.0],
            },
        ],
    }
}

/// Build a demo project, seeded and ready to plot.
pub fn demo_project(config: &DemoConfig) -> Result<Project, AppError> {
    config.validate()?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let noise = if config.noise > 0.0 {
        Some(
            Normal::new(0.0, config.noise)
                .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?,
        )
    } else {
        None
    };

    let mut project = Project::empty(config.layout, config.rows);
    for kind in [DatasetKind::Experiment, DatasetKind::Model] {
        fill_grid(
            project.grid_mut(kind),
            seeds(config.layout, kind),
            noise,
            &mut rng,
        );
    }
    project.normalize();
    Ok(project)
}

fn fill_grid(grid: &mut Grid, seeds: &[Seed], noise: Option<Normal<f64>>, rng: &mut StdRng) {
    for (k, seed) in seeds.iter().enumerate() {
        while grid.row_count() < seed.x.len() {
            grid.add_row();
        }
        // Label on the first row only; blank rows below continue the series.
        grid.set_cell(0, grid.label_col(k), seed.label);
        for (row, (&x, &y)) in seed.x.iter().zip(seed.y).enumerate() {
            let y = match noise {
                Some(n) => y + n.sample(rng),
                None => y,
            };
            grid.set_cell(row, grid.x_col(k), format!("{x}"));
            let y_text = if noise.is_some() {
                format!("{y:.3}")
            } else {
                format!("{y}")
            };
            grid.set_cell(row, grid.y_col(k), y_text);
        }
    }
}
