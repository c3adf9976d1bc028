use {
    lazy_static::lazy_static,
    serde_yaml::Value,
    std::collections::BTreeMap,
};

/// Output stop time is `OutputStep` times this when `OutputStop` is absent
pub const MAX_OUTPUTS: usize = 100;

/// Option names recognised in a source document
pub mod keys {
    pub const GRID_LENGTH: &str = "GridLength";
    pub const TIME: &str = "Time";
    pub const DEALIASING_COEF: &str = "DealiasingCoef";
    pub const MAX_TIME_STEP: &str = "MaxTimeStep";
    pub const CFL: &str = "CFL";
    pub const NU: &str = "nu";
    pub const ETA: &str = "eta";
    pub const KINETIC_ENERGY: &str = "KineticEnergy";
    pub const MAGNETIC_ENERGY: &str = "MagneticEnergy";
    pub const AVERAGE_WN: &str = "AverageWN";
    pub const OUTPUT_STEP: &str = "OutputStep";
    pub const OUTPUT_START: &str = "OutputStart";
    pub const OUTPUT_STOP: &str = "OutputStop";
    pub const DIM_BLOCK_X: &str = "DimBlockX";
    pub const SHARED_LENGTH: &str = "SharedLength";
    pub const SAVE_DATA: &str = "SaveData";
    pub const SAVE_PNG: &str = "SavePNG";
    pub const SAVE_VORTICITY: &str = "SaveVorticity";
    pub const SAVE_CURRENT: &str = "SaveCurrent";
    pub const SAVE_STREAM: &str = "SaveStream";
    pub const SAVE_POTENTIAL: &str = "SavePotential";
    pub const SHOW_GRAPHICS: &str = "ShowGraphics";
    pub const TEXTURES_COUNT: &str = "TexturesCount";
    pub const WINDOW_WIDTH: &str = "WindowWidth";
    pub const WINDOW_HEIGHT: &str = "WindowHeight";
    pub const COLOR_MAP: &str = "ColorMap";
}

lazy_static! {
    static ref DEFAULTS: DefaultTable = DefaultTable::default();
}

/// Default value for every option, consulted when the source document omits it.
///
/// `OutputStop` has no entry: its default is derived from the resolved output step
/// and `max_outputs`.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultTable {
    values: BTreeMap<&'static str, Value>,
    max_outputs: usize,
}

impl DefaultTable {
    /// Empty table, every option must then be supplied by `with` or the document
    pub fn new(max_outputs: usize) -> Self {
        DefaultTable {
            values: BTreeMap::new(),
            max_outputs,
        }
    }

    /// Process-wide table built on first use
    pub fn global() -> &'static DefaultTable {
        &DEFAULTS
    }

    pub fn with<V: Into<Value>>(mut self, key: &'static str, value: V) -> Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn max_outputs(&self) -> usize {
        self.max_outputs
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }
}

impl Default for DefaultTable {
    fn default() -> Self {
        use keys::*;

        DefaultTable::new(MAX_OUTPUTS)
            // Simulation
            .with(GRID_LENGTH, 512)
            .with(TIME, 10.0)
            .with(DEALIASING_COEF, 2.0 / 3.0)
            .with(MAX_TIME_STEP, 0.01)
            .with(CFL, 0.5)
            // Equation coefficients
            .with(NU, 1.0e-3)
            .with(ETA, 1.0e-3)
            // Initial condition
            .with(KINETIC_ENERGY, 0.5)
            .with(MAGNETIC_ENERGY, 0.5)
            .with(AVERAGE_WN, 10)
            // Output
            .with(OUTPUT_STEP, 0.1)
            .with(OUTPUT_START, 0.0)
            // Kernel launch
            .with(DIM_BLOCK_X, 32)
            .with(SHARED_LENGTH, 1024)
            // Writer
            .with(SAVE_DATA, false)
            .with(SAVE_PNG, false)
            .with(SAVE_VORTICITY, true)
            .with(SAVE_CURRENT, true)
            .with(SAVE_STREAM, false)
            .with(SAVE_POTENTIAL, false)
            // Graphics
            .with(SHOW_GRAPHICS, false)
            .with(TEXTURES_COUNT, 4)
            .with(WINDOW_WIDTH, 1200)
            .with(WINDOW_HEIGHT, 1000)
            .with(COLOR_MAP, "Thermal")
    }
}
