use {
    crate::{
        defaults::{keys::*, DefaultTable},
        document::{coerce, Coerce, Document},
        error::{Error, Result},
    },
    log::{debug, info},
    serde::Serialize,
    std::{f64::consts::PI, fmt::Debug, path::Path, str::FromStr},
};

/// Resolved simulation parameters
///
/// Built once from a source document and a default table, then only read.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameters {
    pub grid: Grid,
    pub time: Time,
    pub physics: Physics,
    pub initial: InitialCondition,
    pub output: Output,
    pub kernel: Kernel,
    pub writer: Writer,
    pub graphics: Graphics,
}

/// Spatial grid, the derived quantities only exist through `Grid::new`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    length: usize,
    dealiasing_coef: f64,
    step: f64,
    lambda: f64,
    dealiasing_wave_number: usize,
}

impl Grid {
    pub fn new(length: usize, dealiasing_coef: f64) -> Self {
        Grid {
            length,
            dealiasing_coef,
            step: 2.0 * PI / length as f64,
            lambda: 1.0 / (length as f64).powi(2),
            // Truncates towards zero, negative coefficients saturate to 0
            dealiasing_wave_number: (length as f64 * (dealiasing_coef / 2.0)) as usize,
        }
    }

    /// Number of grid points along each axis
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn dealiasing_coef(&self) -> f64 {
        self.dealiasing_coef
    }

    /// Grid spacing, 2π / length
    pub fn step(&self) -> f64 {
        self.step
    }

    /// 1 / length²
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Cutoff wavenumber above which spectral modes are truncated
    pub fn dealiasing_wave_number(&self) -> usize {
        self.dealiasing_wave_number
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Time {
    /// Simulation end time
    pub simulation_time: f64,
    /// Courant–Friedrichs–Lewy number
    pub cfl: f64,
    pub max_time_step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Physics {
    /// Kinematic viscosity nu
    pub viscosity: f64,
    /// Magnetic diffusivity eta
    pub resistivity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitialCondition {
    pub kinetic_energy: f64,
    pub magnetic_energy: f64,
    pub average_wave_number: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Output {
    /// Interval between outputs
    pub step: f64,
    pub start: f64,
    pub stop: f64,
}

/// GPU kernel launch layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kernel {
    block_dim_x: usize,
    block_dim_y: usize,
    shared_length: usize,
    linear_length: usize,
}

impl Kernel {
    /// Fails when `shared_length` is zero or `grid_length²` does not fit in a
    /// `usize`. Callers are expected to pick a `shared_length` dividing
    /// `grid_length²`, the quotient is truncated otherwise.
    pub fn new(
        block_dim_x: usize,
        block_dim_y: usize,
        shared_length: usize,
        grid_length: usize,
    ) -> Result<Self> {
        let linear_length = grid_length
            .checked_mul(grid_length)
            .ok_or(Error::GridTooLarge(grid_length))?
            .checked_div(shared_length)
            .ok_or(Error::ZeroSharedLength)?;

        Ok(Kernel {
            block_dim_x,
            block_dim_y,
            shared_length,
            linear_length,
        })
    }

    pub fn block_dim_x(&self) -> usize {
        self.block_dim_x
    }

    pub fn block_dim_y(&self) -> usize {
        self.block_dim_y
    }

    pub fn shared_length(&self) -> usize {
        self.shared_length
    }

    pub fn linear_length(&self) -> usize {
        self.linear_length
    }
}

/// Which fields are written to disk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Writer {
    pub save_data: bool,
    pub save_png: bool,
    pub save_vorticity: bool,
    pub save_current: bool,
    pub save_stream: bool,
    pub save_potential: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graphics {
    /// Whether fields are rendered while the simulation runs
    pub show: bool,
    pub textures_count: usize,
    pub window_width: usize,
    pub window_height: usize,
    pub color_map: String,
}

impl Parameters {
    /// Resolves every option against `defaults`.
    ///
    /// Options are resolved in dependency order: the grid first, then the output
    /// interval (its stop time defaults to a multiple of the resolved step), then
    /// the kernel layout (its linear length depends on the grid length), then the
    /// independent groups.
    pub fn resolve(document: &Document, defaults: &DefaultTable) -> Result<Self> {
        let r = Resolver { document, defaults };

        let grid = Grid::new(r.value(GRID_LENGTH)?, r.value(DEALIASING_COEF)?);

        let output = {
            let step: f64 = r.value(OUTPUT_STEP)?;
            let stop = match r.explicit(OUTPUT_STOP)? {
                Some(stop) => stop,
                None => {
                    let stop = step * defaults.max_outputs() as f64;
                    debug!("{} = {:?} (derived)", OUTPUT_STOP, stop);
                    stop
                }
            };

            Output {
                step,
                start: r.value(OUTPUT_START)?,
                stop,
            }
        };

        // There is no DimBlockY option, the y dimension follows DimBlockX
        let kernel = Kernel::new(
            r.value(DIM_BLOCK_X)?,
            r.value(DIM_BLOCK_X)?,
            r.value(SHARED_LENGTH)?,
            grid.length(),
        )?;

        Ok(Parameters {
            grid,
            time: Time {
                simulation_time: r.value(TIME)?,
                cfl: r.value(CFL)?,
                max_time_step: r.value(MAX_TIME_STEP)?,
            },
            physics: Physics {
                viscosity: r.value(NU)?,
                resistivity: r.value(ETA)?,
            },
            initial: InitialCondition {
                kinetic_energy: r.value(KINETIC_ENERGY)?,
                magnetic_energy: r.value(MAGNETIC_ENERGY)?,
                average_wave_number: r.value(AVERAGE_WN)?,
            },
            output,
            kernel,
            writer: Writer {
                save_data: r.value(SAVE_DATA)?,
                save_png: r.value(SAVE_PNG)?,
                save_vorticity: r.value(SAVE_VORTICITY)?,
                save_current: r.value(SAVE_CURRENT)?,
                save_stream: r.value(SAVE_STREAM)?,
                save_potential: r.value(SAVE_POTENTIAL)?,
            },
            graphics: Graphics {
                show: r.value(SHOW_GRAPHICS)?,
                textures_count: r.value(TEXTURES_COUNT)?,
                window_width: r.value(WINDOW_WIDTH)?,
                window_height: r.value(WINDOW_HEIGHT)?,
                color_map: r.value(COLOR_MAP)?,
            },
        })
    }

    /// Loads the document at `path` and resolves it against the global defaults
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let document = Document::load(path)?;

        info!("Loaded simulation parameters from \"{}\"", path.display());

        Self::resolve(&document, DefaultTable::global())
    }
}

impl FromStr for Parameters {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Self::resolve(&text.parse::<Document>()?, DefaultTable::global())
    }
}

struct Resolver<'a> {
    document: &'a Document,
    defaults: &'a DefaultTable,
}

impl<'a> Resolver<'a> {
    /// Document value if present, default otherwise
    fn value<T: Coerce + Debug>(&self, key: &'static str) -> Result<T> {
        if let Some(value) = self.explicit(key)? {
            return Ok(value);
        }

        let value = self
            .defaults
            .get(key)
            .ok_or_else(|| Error::MissingDefault {
                key: key.to_owned(),
            })
            .and_then(|value| coerce(key, value))?;

        debug!("{} = {:?} (default)", key, value);

        Ok(value)
    }

    /// Document value only
    fn explicit<T: Coerce + Debug>(&self, key: &'static str) -> Result<Option<T>> {
        self.document
            .get(key)
            .map(|value| {
                let value = coerce(key, value)?;
                debug!("{} = {:?} (document)", key, value);
                Ok(value)
            })
            .transpose()
    }
}
